use std::path::Path;

use serde_json::{Value, json};

use crate::config::{ReportConfig, ReportOptions};
use crate::describe::sizes::{SLICE_AXIS, SizeDescriptor, extract_sizes};
use crate::layout::InMemoryLayout;
use crate::model::{AcquisitionFile, ImageGeometry, MetadataRecord};

pub fn meta(value: Value) -> MetadataRecord {
    serde_json::from_value(value).unwrap()
}

pub fn config() -> ReportConfig {
    ReportConfig::builtin().unwrap()
}

pub fn options() -> ReportOptions {
    ReportOptions::for_subject("01")
}

pub fn t1w() -> AcquisitionFile {
    AcquisitionFile::new(
        "sub-01/anat/sub-01_T1w.nii.gz",
        "anat",
        "T1w",
        &[("subject", "01")],
    )
}

pub fn bold(task: &str, run: Option<&str>) -> AcquisitionFile {
    let mut name = format!("sub-01_task-{task}");
    let mut entities = vec![("subject", "01"), ("task", task)];
    if let Some(run) = run {
        name.push_str(&format!("_run-{run}"));
        entities.push(("run", run));
    }
    AcquisitionFile::new(
        format!("sub-01/func/{name}_bold.nii.gz"),
        "func",
        "bold",
        &entities,
    )
}

pub fn bold_meta() -> MetadataRecord {
    meta(json!({
        "RepetitionTime": 2.0,
        "EchoTime": 0.03,
        "MagneticFieldStrength": 3,
        "Manufacturer": "Siemens",
        "ManufacturersModelName": "Prisma",
    }))
}

pub fn bold_geometry() -> ImageGeometry {
    ImageGeometry::new(&[64, 64, 30, 150], &[3.0, 3.0, 4.0])
}

pub fn sizes_for(geometry: &ImageGeometry, metadata: &MetadataRecord) -> SizeDescriptor {
    extract_sizes(Path::new("image.nii.gz"), geometry, metadata, SLICE_AXIS).unwrap()
}

/// One T1w and one resting-state BOLD run.
pub fn scenario_layout() -> (InMemoryLayout, Vec<AcquisitionFile>) {
    let anat = t1w();
    let func = bold("rest", None);
    let mut layout = InMemoryLayout::new();
    layout.insert(
        anat.clone(),
        meta(json!({
            "EchoTime": 0.003,
            "MagneticFieldStrength": 3,
            "Manufacturer": "Siemens",
            "ManufacturersModelName": "Prisma",
        })),
        Some(ImageGeometry::new(&[256, 256, 180], &[1.0, 1.0, 1.0])),
    );
    layout.insert(func.clone(), bold_meta(), Some(bold_geometry()));
    (layout, vec![anat, func])
}
