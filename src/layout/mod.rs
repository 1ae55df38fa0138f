use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::ReportError;
use crate::model::{AcquisitionFile, Entities, ImageGeometry, MetadataRecord};

pub mod memory;
pub mod nifti_header;

pub use memory::InMemoryLayout;
pub use nifti_header::NiftiHeaderReader;

/// Query surface of an indexed dataset.
pub trait DatasetLayout {
    /// Files carrying every entity in `entities` whose suffix is one of `suffixes`,
    /// in index order.
    fn resolve_associated_files(&self, entities: &Entities, suffixes: &[&str])
    -> Vec<AcquisitionFile>;

    /// Resolved sidecar metadata; an empty record means no sidecar was found.
    fn get_metadata(&self, path: &Path) -> MetadataRecord;

    fn get_runs(&self, query: &Entities) -> BTreeSet<String>;

    fn get_echoes(&self, query: &Entities) -> BTreeSet<String>;

    /// Every image file in the dataset; candidates for field-map targets.
    fn all_files(&self) -> Vec<AcquisitionFile>;

    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

pub trait ImageReader {
    fn image_geometry(&self, path: &Path) -> Result<ImageGeometry, ReportError>;
}

pub fn open_maybe_gz(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
