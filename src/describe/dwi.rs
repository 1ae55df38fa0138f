use std::path::Path;

use crate::describe::{
    DescribeInputs, acquisition_clauses, echo_times, join_parameters, multiband_clause,
    sequence_labels,
};
use crate::error::ReportError;
use crate::layout::DatasetLayout;
use crate::report::lexical::{count_phrase, join_list, normalize_paragraph, num_to_display};

/// Distinct b-values of a `.bval` file, ascending. Signs are ignored.
pub fn parse_bvals(path: &Path, text: &str) -> Result<Vec<f64>, ReportError> {
    let mut values = Vec::new();
    for token in text.split_whitespace() {
        let value: f64 = token
            .parse()
            .map_err(|_| ReportError::MalformedAuxiliaryFile {
                path: path.to_path_buf(),
                reason: format!("non-numeric b-value '{token}'"),
            })?;
        if !value.is_finite() {
            return Err(ReportError::MalformedAuxiliaryFile {
                path: path.to_path_buf(),
                reason: format!("non-finite b-value '{token}'"),
            });
        }
        values.push(value.abs());
    }
    if values.is_empty() {
        return Err(ReportError::MalformedAuxiliaryFile {
            path: path.to_path_buf(),
            reason: "no b-values found".to_string(),
        });
    }
    values.sort_by(f64::total_cmp);
    values.dedup();
    Ok(values)
}

pub fn read_bvals(layout: &dyn DatasetLayout, path: &Path) -> Result<Vec<f64>, ReportError> {
    let text = layout
        .read_text(path)
        .map_err(|e| ReportError::MalformedAuxiliaryFile {
            path: path.to_path_buf(),
            reason: format!("unreadable: {e}"),
        })?;
    parse_bvals(path, &text)
}

/// Distinct b-values across several scans of one acquisition, ascending.
pub fn union_bvals(lists: &[Vec<f64>]) -> Vec<f64> {
    let mut values: Vec<f64> = lists.iter().flatten().copied().collect();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

/// Gradient count shared by every scan, or `None` when a scan's count is
/// unknown or they disagree.
pub fn shared_direction_count(counts: &[Option<usize>]) -> Option<usize> {
    let first = (*counts.first()?)?;
    counts
        .iter()
        .all(|c| *c == Some(first))
        .then_some(first)
}

pub fn bvals_display(values: &[f64]) -> String {
    let shown: Vec<String> = values.iter().map(|&v| num_to_display(v)).collect();
    join_list(&shown)
}

/// Diffusion paragraph. `bvals` is the union over the group's scans; the
/// direction clause is left out when `n_dirs` is `None`.
pub fn describe_dwi(
    inputs: &DescribeInputs<'_>,
    bvals: &[f64],
    n_dirs: Option<usize>,
    n_runs: usize,
) -> Result<String, ReportError> {
    let metadata = inputs.metadata;
    let labels = sequence_labels(inputs.config, metadata)?;
    let run_str = count_phrase(n_runs, "run", "runs")?;
    let echoes = echo_times(metadata);

    let mut parameters = vec![inputs.sizes.slice_clause()];
    parameters.extend(acquisition_clauses(inputs, &echoes));
    parameters.push(format!("b-values of {} acquired", bvals_display(bvals)));
    if let Some(n_dirs) = n_dirs {
        let noun = if n_dirs == 1 { "direction" } else { "directions" };
        parameters.push(format!("{n_dirs} diffusion {noun}"));
    }
    parameters.extend(multiband_clause(metadata));

    let desc = format!(
        "{run_str} of {variants} {seqs} diffusion-weighted (dMRI) data were collected ({params}).",
        variants = labels.variants,
        seqs = labels.sequences,
        params = join_parameters(&parameters),
    );
    Ok(normalize_paragraph(&desc))
}

#[cfg(test)]
#[path = "../../tests/src_inline/describe/dwi.rs"]
mod tests;
