use crate::config::{ReportConfig, ReportOptions};
use crate::describe::anat::describe_anat;
use crate::describe::dwi::{describe_dwi, read_bvals, shared_direction_count, union_bvals};
use crate::describe::fmap::describe_fmap;
use crate::describe::func::describe_func;
use crate::describe::general::{final_paragraph, general_acquisition_info};
use crate::describe::sizes::{SLICE_AXIS, extract_sizes};
use crate::describe::DescribeInputs;
use crate::error::ReportError;
use crate::layout::{DatasetLayout, ImageReader};
use crate::model::{AcquisitionFile, MetadataRecord, Modality};
use crate::pipeline::stage1_group::{AssociationGroup, run_stage1};
use crate::pipeline::stage2_merge::{count_runs, count_scans, merge_metadata, scan_files};
use crate::report::{Diagnostic, Report, SeenTasks};

const UNKNOWN_TASK: &str = "UNKNOWN";

#[derive(Clone, Copy)]
pub struct Stage3Inputs<'a> {
    pub layout: &'a dyn DatasetLayout,
    pub images: &'a dyn ImageReader,
    pub config: &'a ReportConfig,
    pub options: &'a ReportOptions,
    pub files: &'a [AcquisitionFile],
}

struct Described {
    paragraph: String,
    metadata: MetadataRecord,
}

/// Builds the ordered paragraph list for one subject's files.
///
/// Output order: scanner sentence, one paragraph per described group in
/// encounter order, provenance sentence. A group that fails contributes
/// nothing but a diagnostic. `seen` carries tasks described by earlier calls
/// and is returned updated.
pub fn run_stage3(inputs: &Stage3Inputs<'_>, seen: SeenTasks) -> Report {
    let groups = run_stage1(inputs.layout, inputs.files);
    crate::info!(
        "describing {} association group(s) from {} file(s) for subject {}",
        groups.len(),
        inputs.files.len(),
        inputs.options.subject
    );

    let mut report = Report {
        seen_tasks: seen,
        ..Report::default()
    };
    let mut provenance: Option<MetadataRecord> = None;

    for group in &groups {
        let rep = group.representative();
        let Some(modality) = Modality::from_datatype(&rep.datatype) else {
            crate::debug!(
                "skipping {}: datatype '{}' is not described",
                rep.path.display(),
                rep.datatype
            );
            continue;
        };
        let task = rep.entity("task").unwrap_or(UNKNOWN_TASK);
        if modality == Modality::Functional && report.seen_tasks.contains(task) {
            crate::debug!(
                "task '{}' already described; folding {} into its run count",
                task,
                rep.path.display()
            );
            continue;
        }

        match describe_group(inputs, group, modality, task) {
            Ok(described) => {
                if report.paragraphs.is_empty() {
                    report
                        .paragraphs
                        .push(general_acquisition_info(&described.metadata));
                }
                report.paragraphs.push(described.paragraph);
                if provenance.is_none() && described.metadata.contains("ConversionSoftware") {
                    provenance = Some(described.metadata);
                }
                if modality == Modality::Functional {
                    report.seen_tasks.insert(task);
                }
            }
            Err(error) => {
                if error.is_warning() {
                    crate::warn!("skipping {}: {}", rep.path.display(), error);
                } else {
                    crate::error!("cannot describe {}: {}", rep.path.display(), error);
                }
                report.diagnostics.push(Diagnostic::new(rep.path.clone(), error));
            }
        }
    }

    if !report.paragraphs.is_empty() {
        report.paragraphs.push(final_paragraph(provenance.as_ref()));
    }
    report
}

fn describe_group(
    inputs: &Stage3Inputs<'_>,
    group: &AssociationGroup<'_>,
    modality: Modality,
    task: &str,
) -> Result<Described, ReportError> {
    let rep = group.representative();
    let metadata = merge_metadata(inputs.layout, group, modality, inputs.options)?;
    let geometry = inputs.images.image_geometry(&rep.path)?;
    let sizes = extract_sizes(&rep.path, &geometry, &metadata, SLICE_AXIS)?;
    let di = DescribeInputs {
        path: &rep.path,
        metadata: &metadata,
        geometry: &geometry,
        sizes: &sizes,
        config: inputs.config,
    };

    let paragraph = match modality {
        Modality::Functional => {
            let n_runs = count_runs(inputs.layout, inputs.options, task);
            describe_func(&di, task, n_runs)?
        }
        Modality::Anatomical => describe_anat(&di, &rep.suffix, count_scans(group))?,
        Modality::Diffusion => {
            let scans = scan_files(group);
            let mut bval_lists = Vec::with_capacity(scans.len());
            let mut counts = Vec::with_capacity(scans.len());
            for scan in &scans {
                bval_lists.push(read_bvals(inputs.layout, &scan.companion_path(".bval"))?);
                counts.push(if scan.path == rep.path {
                    Some(geometry.volumes())
                } else {
                    inputs.images.image_geometry(&scan.path).ok().map(|g| g.volumes())
                });
            }
            let n_dirs = shared_direction_count(&counts);
            if n_dirs.is_none() {
                crate::warn!(
                    "diffusion scans grouped with {} differ in gradient count; omitting it",
                    rep.path.display()
                );
            }
            describe_dwi(&di, &union_bvals(&bval_lists), n_dirs, scans.len().max(1))?
        }
        Modality::FieldMap => describe_fmap(&di, inputs.layout, inputs.options.target_matching)?,
    };

    Ok(Described {
        paragraph,
        metadata,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_report.rs"]
mod tests;
