use serde::{Deserialize, Serialize};

/// Voxel grid of an image: spatial dimensions first, then an optional
/// fourth axis (time points or diffusion gradients).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGeometry {
    pub shape: Vec<usize>,
    pub voxel_size: Vec<f64>,
}

impl ImageGeometry {
    pub fn new(shape: &[usize], voxel_size: &[f64]) -> Self {
        Self {
            shape: shape.to_vec(),
            voxel_size: voxel_size.to_vec(),
        }
    }

    pub fn is_volumetric(&self) -> bool {
        self.shape.len() >= 3 && self.voxel_size.len() >= 3
    }

    /// Size of the fourth axis; a 3D image counts as a single volume.
    pub fn volumes(&self) -> usize {
        self.shape.get(3).copied().unwrap_or(1)
    }
}
