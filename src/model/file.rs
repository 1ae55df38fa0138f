use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Entity name -> value, e.g. `subject -> 01`, `task -> rest`, `run -> 2`.
pub type Entities = BTreeMap<String, String>;

/// Entities whose values may differ between files of one logical acquisition.
pub const MULTICONTRAST_ENTITIES: &[&str] = &["echo", "part", "ch", "direction"];

/// One scan instance as produced by the dataset index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionFile {
    pub path: PathBuf,
    pub datatype: String,
    pub suffix: String,
    #[serde(default)]
    pub entities: Entities,
}

impl AcquisitionFile {
    pub fn new(
        path: impl Into<PathBuf>,
        datatype: &str,
        suffix: &str,
        entities: &[(&str, &str)],
    ) -> Self {
        Self {
            path: path.into(),
            datatype: datatype.to_string(),
            suffix: suffix.to_string(),
            entities: entities
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn entity(&self, name: &str) -> Option<&str> {
        self.entities.get(name).map(String::as_str)
    }

    /// Entities with the multi-contrast ones removed.
    pub fn grouping_entities(&self) -> Entities {
        self.entities
            .iter()
            .filter(|(k, _)| !MULTICONTRAST_ENTITIES.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Same path with the image extension swapped, e.g. `.nii.gz` -> `.bval`.
    pub fn companion_path(&self, extension: &str) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = name
            .strip_suffix(".nii.gz")
            .or_else(|| name.strip_suffix(".nii"))
            .unwrap_or(&name);
        let companion = format!("{stem}{extension}");
        match self.path.parent() {
            Some(parent) if parent != Path::new("") => parent.join(companion),
            _ => PathBuf::from(companion),
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn matches(&self, query: &Entities) -> bool {
        query
            .iter()
            .all(|(k, v)| self.entities.get(k).is_some_and(|have| have == v))
    }
}

/// Orders entity values numerically when both parse, lexically otherwise.
pub fn natural_cmp(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}
