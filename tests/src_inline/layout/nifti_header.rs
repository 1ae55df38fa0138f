use super::*;

#[test]
fn test_geometry_from_4d_header() {
    let dim = [4, 64, 64, 30, 150, 1, 1, 1];
    let pixdim = [-1.0, 3.0, 3.0, 4.0, 2.0, 0.0, 0.0, 0.0];
    let geometry = geometry_from_header(&dim, &pixdim).unwrap();
    assert_eq!(geometry.shape, vec![64, 64, 30, 150]);
    assert_eq!(geometry.voxel_size, vec![3.0, 3.0, 4.0]);
    assert_eq!(geometry.volumes(), 150);
}

#[test]
fn test_geometry_takes_absolute_spacing() {
    let dim = [3, 256, 256, 180, 1, 1, 1, 1];
    let pixdim = [1.0, -1.0, 1.0, -1.2, 0.0, 0.0, 0.0, 0.0];
    let geometry = geometry_from_header(&dim, &pixdim).unwrap();
    assert_eq!(geometry.voxel_size, vec![1.0, 1.0, 1.2]);
    assert_eq!(geometry.volumes(), 1);
}

#[test]
fn test_geometry_rejects_2d_and_truncated() {
    assert!(geometry_from_header(&[2, 64, 64, 1], &[1.0, 1.0, 1.0, 1.0]).is_err());
    assert!(geometry_from_header(&[5, 64, 64, 30], &[1.0; 8]).is_err());
    assert!(geometry_from_header(&[], &[]).is_err());
}

#[test]
fn test_missing_file_is_image_error() {
    let reader = NiftiHeaderReader::new(std::env::temp_dir());
    let err = reader
        .image_geometry(Path::new("bids_methods_missing/sub-01_T1w.nii"))
        .unwrap_err();
    match err {
        ReportError::Image { path, .. } => {
            assert!(path.ends_with("bids_methods_missing/sub-01_T1w.nii"));
        }
        other => panic!("unexpected {other:?}"),
    }
}
