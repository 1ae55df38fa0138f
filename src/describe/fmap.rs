use crate::config::TargetMatching;
use crate::describe::targets::describe_targets;
use crate::describe::{
    DescribeInputs, acquisition_clauses, echo_times, join_parameters, sequence_labels,
};
use crate::error::ReportError;
use crate::layout::DatasetLayout;
use crate::report::lexical::normalize_paragraph;

/// Field-map paragraph, naming the scans it was acquired for when `IntendedFor` is set.
pub fn describe_fmap(
    inputs: &DescribeInputs<'_>,
    layout: &dyn DatasetLayout,
    matching: TargetMatching,
) -> Result<String, ReportError> {
    let metadata = inputs.metadata;
    let code = metadata
        .str("PhaseEncodingDirection")
        .ok_or_else(|| ReportError::MissingField {
            path: inputs.path.to_path_buf(),
            field: "PhaseEncodingDirection",
        })?;
    let direction = inputs.config.direction(code)?;
    let labels = sequence_labels(inputs.config, metadata)?;
    let echoes = echo_times(metadata);

    let mut parameters = vec![
        format!("phase encoding: {direction}"),
        format!("{} slices", inputs.sizes.n_slices),
    ];
    parameters.extend(acquisition_clauses(inputs, &echoes));

    let for_str = describe_targets(layout, metadata, matching)?;

    let desc = format!(
        "A {variants} {seqs} field map ({params}) was acquired{for_str}.",
        variants = labels.variants,
        seqs = labels.sequences,
        params = join_parameters(&parameters),
    );
    Ok(normalize_paragraph(&desc))
}

#[cfg(test)]
#[path = "../../tests/src_inline/describe/fmap.rs"]
mod tests;
