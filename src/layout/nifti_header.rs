use std::path::{Path, PathBuf};

use ::nifti::NiftiHeader;

use crate::error::ReportError;
use crate::layout::ImageReader;
use crate::model::ImageGeometry;

/// Reads image geometry from NIfTI-1 headers (`.nii` / `.nii.gz`) below a dataset root.
/// Only the header is parsed; voxel data is never touched.
#[derive(Debug, Clone)]
pub struct NiftiHeaderReader {
    root: PathBuf,
}

impl NiftiHeaderReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl ImageReader for NiftiHeaderReader {
    fn image_geometry(&self, path: &Path) -> Result<ImageGeometry, ReportError> {
        let full = self.resolve(path);
        let header = NiftiHeader::from_file(&full).map_err(|e| ReportError::Image {
            path: full.clone(),
            reason: e.to_string(),
        })?;
        let dim: Vec<usize> = header.dim.iter().map(|&d| d as usize).collect();
        let pixdim: Vec<f64> = header.pixdim.iter().map(|&p| p as f64).collect();
        geometry_from_header(&dim, &pixdim).map_err(|reason| ReportError::Image {
            path: full,
            reason,
        })
    }
}

/// `dim[0]` holds the number of axes, `dim[1..]` their sizes; `pixdim` is laid out alike.
pub fn geometry_from_header(dim: &[usize], pixdim: &[f64]) -> Result<ImageGeometry, String> {
    let ndim = dim.first().copied().unwrap_or(0);
    if ndim < 3 {
        return Err(format!("expected at least 3 dimensions, header declares {ndim}"));
    }
    if dim.len() <= ndim || pixdim.len() < 4 {
        return Err("truncated dim/pixdim arrays".to_string());
    }
    let shape = dim[1..=ndim].to_vec();
    let voxel_size = pixdim[1..4].iter().map(|p| p.abs()).collect();
    Ok(ImageGeometry { shape, voxel_size })
}

#[cfg(test)]
#[path = "../../tests/src_inline/layout/nifti_header.rs"]
mod tests;
