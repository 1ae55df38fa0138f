use super::*;
use std::path::Path;

use serde_json::json;

use crate::fixtures::{bold, bold_meta, config, meta, sizes_for};
use crate::layout::InMemoryLayout;
use crate::model::ImageGeometry;

fn phasediff_meta() -> crate::model::MetadataRecord {
    meta(json!({
        "PhaseEncodingDirection": "j-",
        "EchoTime1": 0.00492,
        "EchoTime2": 0.00738,
        "RepetitionTime": 0.5,
        "FlipAngle": 60,
        "ScanningSequence": "GR",
        "SequenceVariant": "SP",
        "IntendedFor": [
            "func/sub-01_task-rest_run-1_bold.nii.gz",
            "func/sub-01_task-rest_run-2_bold.nii.gz",
        ],
    }))
}

#[test]
fn test_describe_fmap_with_targets() {
    let mut layout = InMemoryLayout::new();
    layout
        .insert(bold("rest", Some("1")), bold_meta(), None)
        .insert(bold("rest", Some("2")), bold_meta(), None);

    let metadata = phasediff_meta();
    let geometry = ImageGeometry::new(&[64, 64, 30], &[3.0, 3.0, 4.0]);
    let sizes = sizes_for(&geometry, &metadata);
    let config = config();
    let inputs = DescribeInputs {
        path: Path::new("sub-01/fmap/sub-01_phasediff.nii.gz"),
        metadata: &metadata,
        geometry: &geometry,
        sizes: &sizes,
        config: &config,
    };
    let text = describe_fmap(&inputs, &layout, TargetMatching::Containment).unwrap();
    assert_eq!(
        text,
        "A spoiled gradient recalled (GR) field map (phase encoding: anterior to posterior; \
         30 slices; repetition time, TR=500ms; echo time, TE=4.92 and 7.38ms; \
         flip angle, FA=60<deg>; field of view, FOV=192x192x120mm; matrix size=64x64x30; \
         voxel size=3x3x4mm) was acquired for the first and second runs of the rest BOLD scan."
    );
}

#[test]
fn test_describe_fmap_without_targets() {
    let layout = InMemoryLayout::new();
    let metadata = meta(json!({"PhaseEncodingDirection": "i", "EchoTime": 0.05}));
    let geometry = ImageGeometry::new(&[64, 64, 30], &[3.0, 3.0, 4.0]);
    let sizes = sizes_for(&geometry, &metadata);
    let config = config();
    let inputs = DescribeInputs {
        path: Path::new("sub-01/fmap/sub-01_dir-AP_epi.nii.gz"),
        metadata: &metadata,
        geometry: &geometry,
        sizes: &sizes,
        config: &config,
    };
    let text = describe_fmap(&inputs, &layout, TargetMatching::Containment).unwrap();
    assert!(text.starts_with("A field map (phase encoding: left to right;"));
    assert!(text.ends_with("voxel size=3x3x4mm) was acquired."));
}

#[test]
fn test_describe_fmap_direction_errors() {
    let layout = InMemoryLayout::new();
    let geometry = ImageGeometry::new(&[64, 64, 30], &[3.0, 3.0, 4.0]);
    let config = config();

    let missing = meta(json!({"EchoTime": 0.05}));
    let sizes = sizes_for(&geometry, &missing);
    let inputs = DescribeInputs {
        path: Path::new("sub-01/fmap/sub-01_epi.nii.gz"),
        metadata: &missing,
        geometry: &geometry,
        sizes: &sizes,
        config: &config,
    };
    assert!(matches!(
        describe_fmap(&inputs, &layout, TargetMatching::Exact),
        Err(ReportError::MissingField {
            field: "PhaseEncodingDirection",
            ..
        })
    ));

    let unknown = meta(json!({"PhaseEncodingDirection": "x"}));
    let inputs = DescribeInputs {
        metadata: &unknown,
        ..inputs
    };
    assert!(matches!(
        describe_fmap(&inputs, &layout, TargetMatching::Exact),
        Err(ReportError::ConfigLookup { table: "dir", .. })
    ));
}
