use super::*;
use std::path::Path;

use serde_json::json;

use crate::fixtures::{bold_geometry, bold_meta, config, sizes_for};

#[test]
fn test_describe_func_single_run() {
    let metadata = bold_meta();
    let geometry = bold_geometry();
    let sizes = sizes_for(&geometry, &metadata);
    let config = config();
    let inputs = DescribeInputs {
        path: Path::new("sub-01/func/sub-01_task-rest_bold.nii.gz"),
        metadata: &metadata,
        geometry: &geometry,
        sizes: &sizes,
        config: &config,
    };
    let text = describe_func(&inputs, "rest", 1).unwrap();
    assert_eq!(
        text,
        "One run of rest task single-echo fMRI data were collected (30 slices; \
         repetition time, TR=2000ms; echo time, TE=30ms; flip angle, FA=UNKNOWN<deg>; \
         field of view, FOV=192x192x120mm; matrix size=64x64x30; voxel size=3x3x4mm). \
         Run duration was 5:00 minutes, during which 150 functional volumes were acquired."
    );
}

#[test]
fn test_describe_func_uses_task_name_and_acceleration() {
    let mut metadata = bold_meta();
    metadata.insert("TaskName", json!("n-back"));
    metadata.insert("ScanningSequence", json!("EP"));
    metadata.insert("SequenceVariant", json!("SK"));
    metadata.insert("MultibandAccelerationFactor", json!(4));
    metadata.insert("ParallelReductionFactorInPlane", json!(2));
    metadata.insert("SliceTiming", json!([0.0, 1.0, 0.5, 1.5]));
    let geometry = bold_geometry();
    let sizes = sizes_for(&geometry, &metadata);
    let config = config();
    let inputs = DescribeInputs {
        path: Path::new("sub-01/func/sub-01_task-nback_bold.nii.gz"),
        metadata: &metadata,
        geometry: &geometry,
        sizes: &sizes,
        config: &config,
    };
    let text = describe_func(&inputs, "nback", 3).unwrap();
    assert!(text.starts_with(
        "Three runs of n-back segmented k-space echo planar (EP) single-echo fMRI data"
    ));
    assert!(text.contains("(4 slices in interleaved order; repetition time"));
    assert!(text.contains("; MB factor=4; in-plane acceleration factor=2)."));
}

#[test]
fn test_describe_func_requires_tr() {
    let metadata = crate::fixtures::meta(json!({"EchoTime": 0.03}));
    let geometry = bold_geometry();
    let sizes = sizes_for(&geometry, &metadata);
    let config = config();
    let inputs = DescribeInputs {
        path: Path::new("bold.nii.gz"),
        metadata: &metadata,
        geometry: &geometry,
        sizes: &sizes,
        config: &config,
    };
    assert!(matches!(
        describe_func(&inputs, "rest", 1),
        Err(ReportError::MissingField {
            field: "RepetitionTime",
            ..
        })
    ));
}

#[test]
fn test_run_duration_rounds_up() {
    assert_eq!(run_duration_secs(150, 2.0), 300);
    assert_eq!(run_duration_secs(100, 0.7), 70);
    assert_eq!(run_duration_secs(3, 0.7), 3);
    assert_eq!(run_duration_secs(0, 2.0), 0);
}
