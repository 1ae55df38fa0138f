use crate::model::MetadataRecord;
use crate::report::lexical::{normalize_paragraph, value_to_display};

pub const TOOL_NAME: &str = env!("CARGO_PKG_NAME");
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scanner sentence; opens every report.
pub fn general_acquisition_info(metadata: &MetadataRecord) -> String {
    let field = |key: &str, fallback: &str| {
        metadata
            .get(key)
            .map(value_to_display)
            .unwrap_or_else(|| fallback.to_string())
    };
    let desc = format!(
        "MR data were acquired using a {tesla}-Tesla {manu} {model} MRI scanner.",
        tesla = field("MagneticFieldStrength", "UNKNOWN"),
        manu = field("Manufacturer", "MANUFACTURER"),
        model = field("ManufacturersModelName", "MODEL"),
    );
    normalize_paragraph(&desc)
}

/// Conversion and provenance sentence; closes every report.
pub fn final_paragraph(metadata: Option<&MetadataRecord>) -> String {
    let software = metadata.and_then(|m| {
        let soft = m.get("ConversionSoftware").map(value_to_display)?;
        Some(match m.get("ConversionSoftwareVersion").map(value_to_display) {
            Some(version) => format!(" using {soft} ({version})"),
            None => format!(" using {soft}"),
        })
    });
    let desc = format!(
        "Dicoms were converted to NIfTI-1 format{software}. This section was (in part) \
         generated automatically using {TOOL_NAME} ({TOOL_VERSION}).",
        software = software.unwrap_or_default(),
    );
    normalize_paragraph(&desc)
}

#[cfg(test)]
#[path = "../../tests/src_inline/describe/general.rs"]
mod tests;
