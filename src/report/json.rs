use serde::Serialize;

use crate::describe::general::{TOOL_NAME, TOOL_VERSION};
use crate::error::ReportError;
use crate::report::{Report, Severity};

#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    tool: &'static str,
    version: &'static str,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<&'a str>,
    text: String,
    paragraphs: &'a [String],
    diagnostics: Vec<DiagnosticEntry>,
    described_tasks: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct DiagnosticEntry {
    path: String,
    severity: Severity,
    message: String,
}

pub fn render_report_json(
    report: &Report,
    subject: &str,
    session: Option<&str>,
) -> Result<String, ReportError> {
    let doc = ReportDocument {
        tool: TOOL_NAME,
        version: TOOL_VERSION,
        subject,
        session,
        text: report.narrative(),
        paragraphs: &report.paragraphs,
        diagnostics: report
            .diagnostics
            .iter()
            .map(|d| DiagnosticEntry {
                path: d.path.display().to_string(),
                severity: d.severity,
                message: d.error.to_string(),
            })
            .collect(),
        described_tasks: report.seen_tasks.iter().collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
