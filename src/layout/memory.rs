use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ReportError;
use crate::layout::{DatasetLayout, ImageReader, open_maybe_gz};
use crate::model::{AcquisitionFile, Entities, ImageGeometry, MetadataRecord};

/// On-disk description of an indexed dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub files: Vec<ManifestEntry>,
    /// Inline contents of companion files such as `.bval`, keyed by path.
    #[serde(default)]
    pub auxiliary: BTreeMap<PathBuf, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    #[serde(flatten)]
    pub file: AcquisitionFile,
    #[serde(default)]
    pub metadata: MetadataRecord,
    #[serde(default)]
    pub shape: Option<Vec<usize>>,
    #[serde(default)]
    pub voxel_size: Option<Vec<f64>>,
}

/// Dataset index held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLayout {
    files: Vec<AcquisitionFile>,
    metadata: BTreeMap<PathBuf, MetadataRecord>,
    geometry: BTreeMap<PathBuf, ImageGeometry>,
    auxiliary: BTreeMap<PathBuf, String>,
    root: Option<PathBuf>,
}

impl InMemoryLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let mut reader = open_maybe_gz(path)?;
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let manifest: Manifest = serde_json::from_str(&text).map_err(|e| {
            ReportError::Configuration(format!("invalid manifest {}: {e}", path.display()))
        })?;
        let layout = Self::from_manifest(manifest);
        crate::info!(
            "loaded manifest {} ({} files)",
            path.display(),
            layout.files.len()
        );
        Ok(layout)
    }

    pub fn from_manifest(manifest: Manifest) -> Self {
        let mut layout = Self::new();
        for entry in manifest.files {
            let geometry = match (entry.shape, entry.voxel_size) {
                (Some(shape), Some(voxel_size)) => Some(ImageGeometry { shape, voxel_size }),
                (Some(shape), None) => {
                    let voxel_size = vec![1.0; shape.len().min(3)];
                    Some(ImageGeometry { shape, voxel_size })
                }
                _ => None,
            };
            layout.insert(entry.file, entry.metadata, geometry);
        }
        layout.auxiliary = manifest.auxiliary;
        layout
    }

    pub fn insert(
        &mut self,
        file: AcquisitionFile,
        metadata: MetadataRecord,
        geometry: Option<ImageGeometry>,
    ) -> &mut Self {
        if let Some(geometry) = geometry {
            self.geometry.insert(file.path.clone(), geometry);
        }
        if !metadata.is_empty() {
            self.metadata.insert(file.path.clone(), metadata);
        }
        self.files.push(file);
        self
    }

    pub fn insert_auxiliary(&mut self, path: impl Into<PathBuf>, contents: &str) -> &mut Self {
        self.auxiliary.insert(path.into(), contents.to_string());
        self
    }

    /// Directory that relative companion-file paths are read from.
    pub fn set_root(&mut self, root: &Path) -> &mut Self {
        self.root = Some(root.to_path_buf());
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files of one subject (and optionally one session), in path order.
    pub fn subject_files(&self, subject: &str, session: Option<&str>) -> Vec<AcquisitionFile> {
        let mut out: Vec<AcquisitionFile> = self
            .files
            .iter()
            .filter(|f| f.entity("subject") == Some(subject))
            .filter(|f| session.is_none() || f.entity("session") == session)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.path.cmp(&b.path));
        out
    }

    fn entity_values(&self, query: &Entities, entity: &str) -> BTreeSet<String> {
        self.files
            .iter()
            .filter(|f| f.matches(query))
            .filter_map(|f| f.entity(entity).map(str::to_string))
            .collect()
    }
}

impl DatasetLayout for InMemoryLayout {
    fn resolve_associated_files(
        &self,
        entities: &Entities,
        suffixes: &[&str],
    ) -> Vec<AcquisitionFile> {
        self.files
            .iter()
            .filter(|f| suffixes.contains(&f.suffix.as_str()) && f.matches(entities))
            .cloned()
            .collect()
    }

    fn get_metadata(&self, path: &Path) -> MetadataRecord {
        self.metadata.get(path).cloned().unwrap_or_default()
    }

    fn get_runs(&self, query: &Entities) -> BTreeSet<String> {
        self.entity_values(query, "run")
    }

    fn get_echoes(&self, query: &Entities) -> BTreeSet<String> {
        self.entity_values(query, "echo")
    }

    fn all_files(&self) -> Vec<AcquisitionFile> {
        self.files.clone()
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        if let Some(text) = self.auxiliary.get(path) {
            return Ok(text.clone());
        }
        match &self.root {
            Some(root) if path.is_relative() => std::fs::read_to_string(root.join(path)),
            _ => std::fs::read_to_string(path),
        }
    }
}

impl ImageReader for InMemoryLayout {
    fn image_geometry(&self, path: &Path) -> Result<ImageGeometry, ReportError> {
        self.geometry
            .get(path)
            .cloned()
            .ok_or_else(|| ReportError::Image {
                path: path.to_path_buf(),
                reason: "no shape recorded in the dataset index".to_string(),
            })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/layout/memory.rs"]
mod tests;
