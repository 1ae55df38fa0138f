use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::ReportError;

pub mod json;
pub mod lexical;
pub mod text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A group that produced no paragraph, and why.
#[derive(Debug)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub severity: Severity,
    pub error: ReportError,
}

impl Diagnostic {
    pub fn new(path: PathBuf, error: ReportError) -> Self {
        let severity = if error.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        };
        Self {
            path,
            severity,
            error,
        }
    }
}

/// Tasks that already have a functional paragraph. Threaded through calls so a
/// caller can describe several file sets without repeating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenTasks {
    tasks: BTreeSet<String>,
}

impl SeenTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, task: &str) -> bool {
        self.tasks.contains(task)
    }

    /// Returns `false` when the task was already present.
    pub fn insert(&mut self, task: &str) -> bool {
        self.tasks.insert(task.to_string())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(String::as_str)
    }
}

#[derive(Debug, Default)]
pub struct Report {
    pub paragraphs: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub seen_tasks: SeenTasks,
}

impl Report {
    pub fn narrative(&self) -> String {
        text::render_narrative(&self.paragraphs)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}
