use std::path::PathBuf;

use super::*;
use crate::report::{Diagnostic, SeenTasks};

#[test]
fn test_render_report_json_shape() {
    let mut seen = SeenTasks::new();
    seen.insert("rest");
    let report = Report {
        paragraphs: vec!["One.".to_string(), "Two.".to_string()],
        diagnostics: vec![Diagnostic::new(
            PathBuf::from("sub-01/func/sub-01_task-nback_bold.nii.gz"),
            ReportError::MissingMetadata {
                path: PathBuf::from("sub-01/func/sub-01_task-nback_bold.nii.gz"),
            },
        )],
        seen_tasks: seen,
    };

    let rendered = render_report_json(&report, "01", None).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(value["tool"], "bids-methods");
    assert_eq!(value["subject"], "01");
    assert!(value.get("session").is_none());
    assert_eq!(value["text"], "One. Two.");
    assert_eq!(value["paragraphs"].as_array().unwrap().len(), 2);
    assert_eq!(value["diagnostics"][0]["severity"], "warning");
    assert!(
        value["diagnostics"][0]["message"]
            .as_str()
            .unwrap()
            .contains("no sidecar metadata")
    );
    assert_eq!(value["described_tasks"][0], "rest");
}

#[test]
fn test_render_report_json_with_session() {
    let report = Report::default();
    let rendered = render_report_json(&report, "02", Some("pre")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["session"], "pre");
    assert_eq!(value["text"], "");
}
