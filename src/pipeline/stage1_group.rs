use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::layout::DatasetLayout;
use crate::model::AcquisitionFile;

/// Suffix families recorded as separate files of one acquisition.
pub const MULTICONTRAST_SUFFIXES: &[&[&str]] = &[
    &["bold", "phase"],
    &["phase1", "phase2", "phasediff", "magnitude1", "magnitude2"],
];

/// Files that together form one logical acquisition. Only [`run_stage1`]
/// builds groups, so `files` is never empty and `anchor` is always in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationGroup<'a> {
    pub(crate) files: Vec<&'a AcquisitionFile>,
    /// Position in `files` of the file that opened the group.
    pub(crate) anchor: usize,
}

impl<'a> AssociationGroup<'a> {
    pub fn files(&self) -> &[&'a AcquisitionFile] {
        &self.files
    }

    pub fn anchor(&self) -> &'a AcquisitionFile {
        self.files[self.anchor]
    }

    /// File whose sidecar describes the group: earliest suffix of the family
    /// (`bold` before `phase`, `phasediff` before magnitudes), then file order.
    pub fn representative(&self) -> &'a AcquisitionFile {
        let class = suffix_class(&self.anchor().suffix);
        self.files
            .iter()
            .enumerate()
            .min_by_key(|(pos, f)| {
                let rank = class
                    .iter()
                    .position(|s| *s == f.suffix)
                    .unwrap_or(class.len());
                (rank, *pos)
            })
            .map(|(_, f)| *f)
            .unwrap_or_else(|| self.anchor())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, file: &AcquisitionFile) -> bool {
        self.files.iter().any(|f| f.path == file.path)
    }
}

/// The companion family a suffix belongs to, or the suffix alone.
pub fn suffix_class(suffix: &str) -> Vec<&str> {
    MULTICONTRAST_SUFFIXES
        .iter()
        .find(|family| family.contains(&suffix))
        .map(|family| family.to_vec())
        .unwrap_or_else(|| vec![suffix])
}

/// Partitions `files` into association groups, in first-seen order.
///
/// Index results are restricted to the input set and to files whose
/// non-multi-contrast entities and datatype equal the opening file's, so every
/// input file lands in exactly one group whatever the index returns.
pub fn run_stage1<'a>(
    layout: &dyn DatasetLayout,
    files: &'a [AcquisitionFile],
) -> Vec<AssociationGroup<'a>> {
    let by_path: HashMap<&Path, &'a AcquisitionFile> =
        files.iter().rev().map(|f| (f.path.as_path(), f)).collect();
    let mut absorbed: HashSet<&Path> = HashSet::new();
    let mut groups = Vec::new();

    for file in files {
        if absorbed.contains(file.path.as_path()) {
            continue;
        }
        let entities = file.grouping_entities();
        let suffixes = suffix_class(&file.suffix);

        let mut members: Vec<&'a AcquisitionFile> = Vec::new();
        for candidate in layout.resolve_associated_files(&entities, &suffixes) {
            let Some(&input) = by_path.get(candidate.path.as_path()) else {
                continue;
            };
            if absorbed.contains(input.path.as_path())
                || members.iter().any(|m| m.path == input.path)
                || input.datatype != file.datatype
                || !suffixes.contains(&input.suffix.as_str())
                || input.grouping_entities() != entities
            {
                continue;
            }
            members.push(input);
        }

        let anchor = match members.iter().position(|m| m.path == file.path) {
            Some(pos) => pos,
            None => {
                members.insert(0, file);
                0
            }
        };
        for &member in &members {
            absorbed.insert(member.path.as_path());
        }
        crate::debug!(
            "grouped {} file(s) with {}",
            members.len(),
            file.path.display()
        );
        groups.push(AssociationGroup {
            files: members,
            anchor,
        });
    }

    groups
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_group.rs"]
mod tests;
