//! Paragraph generators, one per acquisition modality, plus the clauses they share.

use std::path::Path;

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::model::{ImageGeometry, MetadataRecord};
use crate::report::lexical::{join_list, num_to_display, value_to_display};

pub mod anat;
pub mod dwi;
pub mod fmap;
pub mod func;
pub mod general;
pub mod sizes;
pub mod targets;

use sizes::SizeDescriptor;

/// Everything a describer reads for one association group.
#[derive(Debug, Clone, Copy)]
pub struct DescribeInputs<'a> {
    pub path: &'a Path,
    pub metadata: &'a MetadataRecord,
    pub geometry: &'a ImageGeometry,
    pub sizes: &'a SizeDescriptor,
    pub config: &'a ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceLabels {
    pub sequences: String,
    pub variants: String,
}

/// Maps `ScanningSequence` and `SequenceVariant` codes through the config tables.
/// `GR_IR` becomes `gradient recalled and inversion recovery (GR/IR)`.
pub fn sequence_labels(
    config: &ReportConfig,
    metadata: &MetadataRecord,
) -> Result<SequenceLabels, ReportError> {
    let seq_codes = split_codes(metadata, "ScanningSequence");
    let mut sequences = Vec::with_capacity(seq_codes.len());
    for code in &seq_codes {
        sequences.push(config.sequence(code)?);
    }
    let mut sequences = join_list(&sequences);
    if !seq_codes.is_empty() {
        sequences.push_str(&format!(" ({})", seq_codes.join("/")));
    }

    let mut variants = Vec::new();
    for code in split_codes(metadata, "SequenceVariant") {
        variants.push(config.variant(&code)?);
    }

    Ok(SequenceLabels {
        sequences,
        variants: join_list(&variants),
    })
}

fn split_codes(metadata: &MetadataRecord, key: &str) -> Vec<String> {
    metadata
        .str_list(key)
        .unwrap_or_default()
        .iter()
        .flat_map(|s| s.split('_'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoTimes {
    /// Milliseconds, already joined for display.
    pub te: String,
    pub kind: &'static str,
}

pub fn echo_times(metadata: &MetadataRecord) -> EchoTimes {
    let to_ms = |values: &[f64]| {
        let shown: Vec<String> = values.iter().map(|t| num_to_display(t * 1000.0)).collect();
        join_list(&shown)
    };
    if let Some(list) = metadata.f64_list("EchoTime").filter(|l| !l.is_empty()) {
        let kind = if list.len() > 1 {
            "multi-echo"
        } else {
            "single-echo"
        };
        return EchoTimes {
            te: to_ms(&list),
            kind,
        };
    }
    if let Some(te) = metadata.f64("EchoTime") {
        return EchoTimes {
            te: to_ms(&[te]),
            kind: "single-echo",
        };
    }
    if let (Some(te1), Some(te2)) = (metadata.f64("EchoTime1"), metadata.f64("EchoTime2")) {
        return EchoTimes {
            te: to_ms(&[te1, te2]),
            kind: "multi-echo",
        };
    }
    EchoTimes {
        te: "UNKNOWN".to_string(),
        kind: "UNKNOWN-echo",
    }
}

pub fn tr_clause(metadata: &MetadataRecord) -> String {
    let tr = metadata
        .f64("RepetitionTime")
        .map(|tr| num_to_display(tr * 1000.0))
        .unwrap_or_else(|| "UNKNOWN".to_string());
    format!("repetition time, TR={tr}ms")
}

pub fn te_clause(echoes: &EchoTimes) -> String {
    format!("echo time, TE={}ms", echoes.te)
}

pub fn flip_angle_clause(metadata: &MetadataRecord) -> String {
    let fa = metadata
        .get("FlipAngle")
        .map(value_to_display)
        .unwrap_or_else(|| "UNKNOWN".to_string());
    format!("flip angle, FA={fa}<deg>")
}

pub fn fov_clause(sizes: &SizeDescriptor) -> String {
    format!("field of view, FOV={}mm", sizes.fov)
}

pub fn matrix_clause(sizes: &SizeDescriptor) -> String {
    format!("matrix size={}", sizes.matrix_size)
}

pub fn voxel_clause(sizes: &SizeDescriptor) -> String {
    format!("voxel size={}mm", sizes.voxel_size)
}

/// Acceleration factors are optional: unset or <= 1 means not applied.
pub fn applied_factor(metadata: &MetadataRecord, key: &str) -> Option<f64> {
    metadata.f64(key).filter(|f| *f > 1.0)
}

pub fn multiband_clause(metadata: &MetadataRecord) -> Option<String> {
    applied_factor(metadata, "MultibandAccelerationFactor")
        .map(|f| format!("MB factor={}", num_to_display(f)))
}

pub fn inplane_clause(metadata: &MetadataRecord) -> Option<String> {
    applied_factor(metadata, "ParallelReductionFactorInPlane")
        .map(|f| format!("in-plane acceleration factor={}", num_to_display(f)))
}

pub fn join_parameters(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Clauses every modality reports in this order: TR, TE, FA, FOV, matrix, voxel size.
pub fn acquisition_clauses(inputs: &DescribeInputs<'_>, echoes: &EchoTimes) -> Vec<String> {
    vec![
        tr_clause(inputs.metadata),
        te_clause(echoes),
        flip_angle_clause(inputs.metadata),
        fov_clause(inputs.sizes),
        matrix_clause(inputs.sizes),
        voxel_clause(inputs.sizes),
    ]
}

#[cfg(test)]
#[path = "../../tests/src_inline/describe/tests.rs"]
mod tests;
