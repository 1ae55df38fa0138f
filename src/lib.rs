//! Methods-section generator for BIDS datasets.
//!
//! Groups a subject's acquisition files into logical acquisitions, describes
//! each with its scanner parameters, and assembles the paragraphs of an MRI
//! data-acquisition methods section.

pub mod config;
pub mod describe;
pub mod error;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod tracing;

pub use config::{ReportConfig, ReportOptions, TargetMatching};
pub use error::ReportError;
pub use layout::{DatasetLayout, ImageReader, InMemoryLayout, NiftiHeaderReader};
pub use model::{AcquisitionFile, ImageGeometry, MetadataRecord, Modality};
pub use pipeline::stage3_report::{Stage3Inputs, run_stage3};
pub use report::{Diagnostic, Report, SeenTasks, Severity};

/// Describes `files` for one subject. Convenience wrapper over [`run_stage3`].
pub fn generate_report(
    layout: &dyn DatasetLayout,
    images: &dyn ImageReader,
    config: &ReportConfig,
    options: &ReportOptions,
    files: &[AcquisitionFile],
    seen: SeenTasks,
) -> Report {
    run_stage3(
        &Stage3Inputs {
            layout,
            images,
            config,
            options,
            files,
        },
        seen,
    )
}

#[cfg(test)]
#[path = "../tests/src_inline/fixtures.rs"]
pub(crate) mod fixtures;
