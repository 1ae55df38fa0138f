use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::ReportError;
use crate::layout::open_maybe_gz;

const DEFAULT_CONFIG: &str = include_str!("../config/default_config.json");

/// Code tables for sequences, sequence variants and phase-encoding directions.
///
/// Every table is strict: an unmapped code is a [`ReportError::ConfigLookup`].
/// Optional acquisition fields (acceleration factors, flip angle) are handled
/// by the describers and never reach these tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    #[serde(rename = "seq")]
    pub sequences: BTreeMap<String, String>,
    #[serde(rename = "seqvar")]
    pub variants: BTreeMap<String, String>,
    #[serde(rename = "dir")]
    pub directions: BTreeMap<String, String>,
}

impl ReportConfig {
    pub fn builtin() -> Result<Self, ReportError> {
        Self::from_json(DEFAULT_CONFIG)
    }

    pub fn from_json(text: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let mut reader = open_maybe_gz(path)?;
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_json(&text).map_err(|e| {
            ReportError::Configuration(format!("{}: {e}", path.display()))
        })
    }

    pub fn sequence(&self, code: &str) -> Result<&str, ReportError> {
        lookup(&self.sequences, "seq", code)
    }

    pub fn variant(&self, code: &str) -> Result<&str, ReportError> {
        lookup(&self.variants, "seqvar", code)
    }

    pub fn direction(&self, code: &str) -> Result<&str, ReportError> {
        lookup(&self.directions, "dir", code)
    }
}

fn lookup<'a>(
    table: &'a BTreeMap<String, String>,
    name: &'static str,
    code: &str,
) -> Result<&'a str, ReportError> {
    table
        .get(code)
        .map(String::as_str)
        .ok_or_else(|| ReportError::ConfigLookup {
            table: name,
            code: code.to_string(),
        })
}

/// How a field map's `IntendedFor` references are matched to dataset files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetMatching {
    /// First file whose path contains the referenced file name.
    #[default]
    Containment,
    /// The file whose name equals the referenced file name.
    Exact,
}

/// Per-call query filter and behaviour switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub subject: String,
    pub session: Option<String>,
    pub target_matching: TargetMatching,
}

impl ReportOptions {
    pub fn for_subject(subject: &str) -> Self {
        Self {
            subject: subject.to_string(),
            session: None,
            target_matching: TargetMatching::default(),
        }
    }

    pub fn with_session(mut self, session: Option<&str>) -> Self {
        self.session = session.map(str::to_string);
        self
    }

    pub fn with_target_matching(mut self, mode: TargetMatching) -> Self {
        self.target_matching = mode;
        self
    }

    /// Entity filter shared by run and echo lookups.
    pub fn base_query(&self) -> crate::model::Entities {
        let mut query = crate::model::Entities::new();
        query.insert("subject".to_string(), self.subject.clone());
        if let Some(session) = &self.session {
            query.insert("session".to_string(), session.clone());
        }
        query
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config/tests.rs"]
mod tests;
