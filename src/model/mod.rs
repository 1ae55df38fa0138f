pub mod file;
pub mod geometry;
pub mod metadata;
pub mod modality;

pub use file::{AcquisitionFile, Entities, MULTICONTRAST_ENTITIES};
pub use geometry::ImageGeometry;
pub use metadata::MetadataRecord;
pub use modality::Modality;

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
