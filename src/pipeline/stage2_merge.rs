use serde_json::Value;

use crate::config::ReportOptions;
use crate::error::ReportError;
use crate::layout::DatasetLayout;
use crate::model::file::natural_cmp;
use crate::model::{AcquisitionFile, MetadataRecord, Modality};
use crate::pipeline::stage1_group::AssociationGroup;

/// Sidecar of the group's representative file, checked against the modality's
/// required fields, with `EchoTime` widened to a list for multi-echo data.
pub fn merge_metadata(
    layout: &dyn DatasetLayout,
    group: &AssociationGroup<'_>,
    modality: Modality,
    options: &ReportOptions,
) -> Result<MetadataRecord, ReportError> {
    let rep = group.representative();
    let mut metadata = layout.get_metadata(&rep.path);
    if metadata.is_empty() {
        return Err(ReportError::MissingMetadata {
            path: rep.path.clone(),
        });
    }
    for &field in modality.required_fields() {
        if !metadata.contains(field) {
            return Err(ReportError::MissingField {
                path: rep.path.clone(),
                field,
            });
        }
    }

    let widened = match (modality, rep.entity("task")) {
        (Modality::Functional, Some(task)) => task_echo_times(layout, options, task, &rep.suffix)
            .or_else(|| group_echo_times(layout, group)),
        _ => group_echo_times(layout, group),
    };
    if let Some(times) = widened {
        metadata.insert(
            "EchoTime",
            Value::Array(times.into_iter().map(Value::from).collect()),
        );
    }
    Ok(metadata)
}

/// Echo times of one file per echo of the task, ascending by echo index.
/// `None` unless the task has at least two echoes.
pub fn task_echo_times(
    layout: &dyn DatasetLayout,
    options: &ReportOptions,
    task: &str,
    suffix: &str,
) -> Option<Vec<f64>> {
    let mut query = options.base_query();
    query.insert("task".to_string(), task.to_string());
    let mut echoes: Vec<String> = layout.get_echoes(&query).into_iter().collect();
    if echoes.len() < 2 {
        return None;
    }
    echoes.sort_by(|a, b| natural_cmp(a, b));

    let mut times = Vec::with_capacity(echoes.len());
    for echo in &echoes {
        let mut echo_query = query.clone();
        echo_query.insert("echo".to_string(), echo.clone());
        let files = layout.resolve_associated_files(&echo_query, &[suffix]);
        let Some(first) = files.first() else {
            continue;
        };
        if let Some(te) = layout.get_metadata(&first.path).f64("EchoTime") {
            times.push(te);
        }
    }
    (times.len() > 1).then_some(times)
}

/// Echo times across the group's own files that share the representative's suffix.
pub fn group_echo_times(
    layout: &dyn DatasetLayout,
    group: &AssociationGroup<'_>,
) -> Option<Vec<f64>> {
    let rep = group.representative();
    let mut per_echo: Vec<(&str, &AcquisitionFile)> = Vec::new();
    for &file in group.files().iter().filter(|f| f.suffix == rep.suffix) {
        let Some(echo) = file.entity("echo") else {
            continue;
        };
        if !per_echo.iter().any(|(e, _)| *e == echo) {
            per_echo.push((echo, file));
        }
    }
    if per_echo.len() < 2 {
        return None;
    }
    per_echo.sort_by(|a, b| natural_cmp(a.0, b.0));

    let times: Vec<f64> = per_echo
        .iter()
        .filter_map(|(_, file)| layout.get_metadata(&file.path).f64("EchoTime"))
        .collect();
    (times.len() > 1).then_some(times)
}

/// `max(1, runs of the task)` for the subject/session in `options`.
pub fn count_runs(layout: &dyn DatasetLayout, options: &ReportOptions, task: &str) -> usize {
    let mut query = options.base_query();
    query.insert("task".to_string(), task.to_string());
    layout.get_runs(&query).len().max(1)
}

/// Files in the group that are distinct scans rather than extra echoes or
/// parts of the representative: same suffix, echo and part. A `dir-AP` /
/// `dir-PA` diffusion pair yields two scans.
pub fn scan_files<'a>(group: &AssociationGroup<'a>) -> Vec<&'a AcquisitionFile> {
    let rep = group.representative();
    group
        .files()
        .iter()
        .copied()
        .filter(|f| {
            f.suffix == rep.suffix
                && f.entity("echo") == rep.entity("echo")
                && f.entity("part") == rep.entity("part")
        })
        .collect()
}

pub fn count_scans(group: &AssociationGroup<'_>) -> usize {
    scan_files(group).len().max(1)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_merge.rs"]
mod tests;
