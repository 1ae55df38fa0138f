use crate::describe::{
    DescribeInputs, acquisition_clauses, echo_times, join_parameters, sequence_labels,
};
use crate::error::ReportError;
use crate::report::lexical::{normalize_paragraph, title_case, to_cardinal_words};

/// `T1w -> T1-weighted`; suffixes without a trailing `w` pass through.
pub fn weighted_suffix(suffix: &str) -> String {
    match suffix.strip_suffix('w') {
        Some(stem) if !stem.is_empty() => format!("{stem}-weighted"),
        _ => suffix.to_string(),
    }
}

/// Structural paragraph for one association group.
pub fn describe_anat(
    inputs: &DescribeInputs<'_>,
    suffix: &str,
    n_scans: usize,
) -> Result<String, ReportError> {
    let metadata = inputs.metadata;
    let labels = sequence_labels(inputs.config, metadata)?;
    let echoes = echo_times(metadata);
    let count = title_case(&to_cardinal_words(n_scans as i64)?);
    let (noun, verb) = if n_scans == 1 {
        ("scan", "was")
    } else {
        ("scans", "were")
    };

    let mut parameters = vec![inputs.sizes.slice_clause()];
    parameters.extend(acquisition_clauses(inputs, &echoes));

    let desc = format!(
        "{count} {suffix} {variants} {seqs} {echo} structural MRI {noun} {verb} collected ({params}).",
        suffix = weighted_suffix(suffix),
        variants = labels.variants,
        seqs = labels.sequences,
        echo = echoes.kind,
        params = join_parameters(&parameters),
    );
    Ok(normalize_paragraph(&desc))
}

#[cfg(test)]
#[path = "../../tests/src_inline/describe/anat.rs"]
mod tests;
