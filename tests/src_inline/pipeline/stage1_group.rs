use super::*;
use std::collections::BTreeSet;

use crate::fixtures::{bold, t1w};
use crate::layout::InMemoryLayout;
use crate::model::{Entities, MetadataRecord};

fn echo_bold(echo: &str) -> AcquisitionFile {
    AcquisitionFile::new(
        format!("sub-01/func/sub-01_task-rest_echo-{echo}_bold.nii.gz"),
        "func",
        "bold",
        &[("subject", "01"), ("task", "rest"), ("echo", echo)],
    )
}

fn fmap(suffix: &str) -> AcquisitionFile {
    AcquisitionFile::new(
        format!("sub-01/fmap/sub-01_{suffix}.nii.gz"),
        "fmap",
        suffix,
        &[("subject", "01")],
    )
}

fn layout_of(files: &[AcquisitionFile]) -> InMemoryLayout {
    let mut layout = InMemoryLayout::new();
    for file in files {
        layout.insert(file.clone(), MetadataRecord::new(), None);
    }
    layout
}

fn assert_partition(files: &[AcquisitionFile], groups: &[AssociationGroup<'_>]) {
    let total: usize = groups.iter().map(|g| g.len()).sum();
    assert_eq!(total, files.len());
    for file in files {
        let owners = groups.iter().filter(|g| g.contains(file)).count();
        assert_eq!(owners, 1, "{} in {} groups", file.path.display(), owners);
    }
}

/// Index that ignores the query and returns every file it knows.
struct GreedyLayout(Vec<AcquisitionFile>);

impl DatasetLayout for GreedyLayout {
    fn resolve_associated_files(&self, _: &Entities, _: &[&str]) -> Vec<AcquisitionFile> {
        self.0.clone()
    }

    fn get_metadata(&self, _: &Path) -> MetadataRecord {
        MetadataRecord::new()
    }

    fn get_runs(&self, _: &Entities) -> BTreeSet<String> {
        BTreeSet::new()
    }

    fn get_echoes(&self, _: &Entities) -> BTreeSet<String> {
        BTreeSet::new()
    }

    fn all_files(&self) -> Vec<AcquisitionFile> {
        self.0.clone()
    }
}

#[test]
fn test_groups_echoes_and_fieldmap_family() {
    let files = vec![
        t1w(),
        echo_bold("1"),
        echo_bold("2"),
        fmap("magnitude1"),
        fmap("magnitude2"),
        fmap("phasediff"),
        bold("nback", None),
    ];
    let layout = layout_of(&files);
    let groups = run_stage1(&layout, &files);

    assert_eq!(groups.len(), 4);
    assert_partition(&files, &groups);
    assert_eq!(groups[0].anchor().suffix, "T1w");
    assert_eq!(groups[1].len(), 2);
    assert_eq!(groups[2].len(), 3);
    assert_eq!(groups[2].anchor().suffix, "magnitude1");
    assert_eq!(groups[2].representative().suffix, "phasediff");
    assert_eq!(groups[3].anchor().entity("task"), Some("nback"));
}

#[test]
fn test_runs_stay_separate() {
    let files = vec![bold("rest", Some("1")), bold("rest", Some("2"))];
    let layout = layout_of(&files);
    let groups = run_stage1(&layout, &files);
    assert_eq!(groups.len(), 2);
    assert_partition(&files, &groups);
}

#[test]
fn test_partition_survives_greedy_index() {
    let files = vec![t1w(), echo_bold("1"), echo_bold("2"), fmap("phasediff")];
    let mut everything = files.clone();
    everything.push(bold("outside", None));
    let layout = GreedyLayout(everything);

    let groups = run_stage1(&layout, &files);
    assert_partition(&files, &groups);
    assert_eq!(groups.len(), 3);
    assert!(groups.iter().all(|g| !g.is_empty()));
}

#[test]
fn test_unindexed_file_forms_own_group() {
    let files = vec![t1w(), echo_bold("1")];
    let layout = InMemoryLayout::new();
    let groups = run_stage1(&layout, &files);
    assert_eq!(groups.len(), 2);
    assert_partition(&files, &groups);
    assert_eq!(groups[1].anchor, 0);
}

#[test]
fn test_suffix_class() {
    assert_eq!(suffix_class("phase"), vec!["bold", "phase"]);
    assert_eq!(suffix_class("magnitude2").len(), 5);
    assert_eq!(suffix_class("T1w"), vec!["T1w"]);
}

#[test]
fn test_representative_prefers_bold_over_phase() {
    let phase = AcquisitionFile::new(
        "sub-01/func/sub-01_task-rest_part-phase_phase.nii.gz",
        "func",
        "phase",
        &[("subject", "01"), ("task", "rest"), ("part", "phase")],
    );
    let magnitude = AcquisitionFile::new(
        "sub-01/func/sub-01_task-rest_part-mag_bold.nii.gz",
        "func",
        "bold",
        &[("subject", "01"), ("task", "rest"), ("part", "mag")],
    );
    let files = vec![phase, magnitude];
    let layout = layout_of(&files);
    let groups = run_stage1(&layout, &files);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].representative().suffix, "bold");
}

#[test]
fn test_grouping_is_idempotent() {
    let files = vec![
        t1w(),
        echo_bold("1"),
        fmap("phasediff"),
        echo_bold("2"),
        bold("rest", Some("1")),
        bold("rest", Some("2")),
        fmap("magnitude1"),
    ];
    let layout = layout_of(&files);
    let first = run_stage1(&layout, &files);
    let second = run_stage1(&layout, &files);
    assert_eq!(first, second);
    assert_partition(&files, &first);
}

#[test]
fn test_every_group_anchor_is_in_range() {
    let files = vec![fmap("magnitude2"), fmap("phasediff"), t1w(), echo_bold("2")];
    let layout = GreedyLayout(files.clone());
    for group in run_stage1(&layout, &files) {
        assert!(group.anchor < group.files().len());
        assert!(group.files().contains(&group.anchor()));
        assert!(group.files().contains(&group.representative()));
    }
}
