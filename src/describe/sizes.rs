use std::path::Path;

use crate::error::ReportError;
use crate::model::{ImageGeometry, MetadataRecord};
use crate::report::lexical::num_to_display;

/// Axis of the voxel grid that holds slices.
pub const SLICE_AXIS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceOrder {
    SequentialAscending,
    SequentialDescending,
    Interleaved,
}

impl SliceOrder {
    pub fn phrase(self) -> &'static str {
        match self {
            SliceOrder::SequentialAscending => "sequential ascending",
            SliceOrder::SequentialDescending => "sequential descending",
            SliceOrder::Interleaved => "interleaved",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizeDescriptor {
    pub fov: String,
    pub voxel_size: String,
    pub matrix_size: String,
    pub n_slices: usize,
    pub slice_order: Option<SliceOrder>,
}

impl SizeDescriptor {
    /// `" in interleaved order"`, or empty without slice timing.
    pub fn order_phrase(&self) -> String {
        self.slice_order
            .map(|o| format!(" in {} order", o.phrase()))
            .unwrap_or_default()
    }

    pub fn slice_clause(&self) -> String {
        format!("{} slices{}", self.n_slices, self.order_phrase())
    }
}

pub fn extract_sizes(
    path: &Path,
    geometry: &ImageGeometry,
    metadata: &MetadataRecord,
    slice_axis: usize,
) -> Result<SizeDescriptor, ReportError> {
    if !geometry.is_volumetric() {
        return Err(ReportError::Image {
            path: path.to_path_buf(),
            reason: format!(
                "expected three spatial dimensions, got shape {:?}",
                geometry.shape
            ),
        });
    }
    let dims = &geometry.shape[..3];
    let zooms = &geometry.voxel_size[..3];

    let voxel_size = join_x(zooms.iter().map(|&z| num_to_display(z)));
    let fov = join_x(
        dims.iter()
            .zip(zooms)
            .map(|(&n, &z)| num_to_display(n as f64 * z)),
    );
    let matrix_size = join_x(dims.iter().map(|n| n.to_string()));

    let timing = metadata
        .f64_list("SliceTiming")
        .filter(|times| !times.is_empty());
    let (n_slices, slice_order) = match timing {
        Some(times) => (times.len(), Some(infer_slice_order(&times))),
        None => {
            let declared = metadata
                .f64("NumberOfSlices")
                .filter(|n| *n >= 1.0)
                .map(|n| n as usize);
            let from_image = geometry.shape.get(slice_axis).copied().unwrap_or(dims[2]);
            (declared.unwrap_or(from_image), None)
        }
    };

    Ok(SizeDescriptor {
        fov,
        voxel_size,
        matrix_size,
        n_slices,
        slice_order,
    })
}

/// Times are compared after dropping repeats (first occurrence kept), so the
/// per-band repeats of a multiband acquisition do not read as interleaved.
/// Ascending wins when only one distinct time remains.
pub fn infer_slice_order(times: &[f64]) -> SliceOrder {
    let mut distinct: Vec<f64> = Vec::with_capacity(times.len());
    for &t in times {
        if !distinct.contains(&t) {
            distinct.push(t);
        }
    }
    if distinct.windows(2).all(|w| w[0] < w[1]) {
        SliceOrder::SequentialAscending
    } else if distinct.windows(2).all(|w| w[0] > w[1]) {
        SliceOrder::SequentialDescending
    } else {
        SliceOrder::Interleaved
    }
}

fn join_x(parts: impl Iterator<Item = String>) -> String {
    parts.collect::<Vec<_>>().join("x")
}

#[cfg(test)]
#[path = "../../tests/src_inline/describe/sizes.rs"]
mod tests;
