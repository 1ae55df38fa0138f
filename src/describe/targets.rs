use crate::config::TargetMatching;
use crate::error::ReportError;
use crate::layout::DatasetLayout;
use crate::model::{AcquisitionFile, MetadataRecord};
use crate::report::lexical::{join_list, to_ordinal_words};

/// Scans a field map was acquired for, grouped by label in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReference {
    pub label: String,
    pub runs: Vec<i64>,
}

/// `bids::sub-01/func/sub-01_task-rest_bold.nii.gz` -> `sub-01_task-rest_bold.nii.gz`.
pub fn reference_basename(reference: &str) -> &str {
    let reference = reference.strip_prefix("bids::").unwrap_or(reference);
    reference.rsplit('/').next().unwrap_or(reference)
}

pub fn find_target<'a>(
    candidates: &'a [AcquisitionFile],
    name: &str,
    mode: TargetMatching,
) -> Option<&'a AcquisitionFile> {
    match mode {
        TargetMatching::Exact => candidates.iter().find(|f| f.file_name() == name),
        TargetMatching::Containment => {
            let mut hits = candidates
                .iter()
                .filter(|f| f.path.to_string_lossy().contains(name));
            let first = hits.next()?;
            let extra = hits.count();
            if extra > 0 {
                crate::warn!(
                    "field map target '{}' matches {} files; using {}",
                    name,
                    extra + 1,
                    first.path.display()
                );
            }
            Some(first)
        }
    }
}

pub fn resolve_targets(
    layout: &dyn DatasetLayout,
    metadata: &MetadataRecord,
    mode: TargetMatching,
) -> Vec<TargetReference> {
    let Some(references) = metadata.str_list("IntendedFor") else {
        return Vec::new();
    };
    let candidates = layout.all_files();
    let mut grouped: Vec<TargetReference> = Vec::new();

    for reference in &references {
        let name = reference_basename(reference);
        let Some(target) = find_target(&candidates, name, mode) else {
            crate::warn!("field map target '{}' not found in dataset", reference);
            continue;
        };
        let run = match target.entity("run") {
            Some(run) => match run.parse::<i64>() {
                Ok(run) => run,
                Err(_) => {
                    crate::warn!("field map target {} has non-numeric run '{}'", name, run);
                    continue;
                }
            },
            None => 1,
        };
        let label = target_label(layout, target);
        match grouped.iter_mut().find(|g| g.label == label) {
            Some(group) => group.runs.push(run),
            None => grouped.push(TargetReference {
                label,
                runs: vec![run],
            }),
        }
    }

    for group in &mut grouped {
        group.runs.sort_unstable();
        group.runs.dedup();
    }
    grouped
}

fn target_label(layout: &dyn DatasetLayout, target: &AcquisitionFile) -> String {
    let suffix = target.suffix.to_uppercase();
    if suffix == "BOLD" {
        let meta = layout.get_metadata(&target.path);
        let task = meta
            .str("TaskName")
            .map(str::to_string)
            .or_else(|| target.entity("task").map(str::to_string))
            .unwrap_or_else(|| "UNKNOWN".to_string());
        format!("{task} {suffix} scan")
    } else {
        format!("{suffix} scan")
    }
}

/// `" for the first and second runs of the rest BOLD scan"`, or empty when the
/// field map declares no targets.
pub fn describe_targets(
    layout: &dyn DatasetLayout,
    metadata: &MetadataRecord,
    mode: TargetMatching,
) -> Result<String, ReportError> {
    let targets = resolve_targets(layout, metadata, mode);
    if targets.is_empty() {
        return Ok(String::new());
    }
    let mut parts = Vec::with_capacity(targets.len());
    for target in &targets {
        let mut ordinals = Vec::with_capacity(target.runs.len());
        for &run in &target.runs {
            ordinals.push(to_ordinal_words(run)?);
        }
        let plural = if target.runs.len() > 1 { "s" } else { "" };
        parts.push(format!(
            "{} run{plural} of the {}",
            join_list(&ordinals),
            target.label
        ));
    }
    Ok(format!(" for the {}", join_list(&parts)))
}

#[cfg(test)]
#[path = "../../tests/src_inline/describe/targets.rs"]
mod tests;
