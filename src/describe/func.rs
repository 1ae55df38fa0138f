use crate::describe::{
    DescribeInputs, acquisition_clauses, echo_times, inplane_clause, join_parameters,
    multiband_clause, sequence_labels,
};
use crate::error::ReportError;
use crate::report::lexical::{count_phrase, format_duration, normalize_paragraph};

/// Functional (BOLD) paragraph for one task.
pub fn describe_func(
    inputs: &DescribeInputs<'_>,
    task: &str,
    n_runs: usize,
) -> Result<String, ReportError> {
    let metadata = inputs.metadata;
    let task_label = metadata
        .str("TaskName")
        .map(str::to_string)
        .unwrap_or_else(|| format!("{task} task"));
    let labels = sequence_labels(inputs.config, metadata)?;
    let run_str = count_phrase(n_runs, "run", "runs")?;
    let echoes = echo_times(metadata);

    let mut parameters = vec![inputs.sizes.slice_clause()];
    parameters.extend(acquisition_clauses(inputs, &echoes));
    parameters.extend(multiband_clause(metadata));
    parameters.extend(inplane_clause(metadata));

    let n_vols = inputs.geometry.volumes();
    let tr = metadata
        .f64("RepetitionTime")
        .ok_or_else(|| ReportError::MissingField {
            path: inputs.path.to_path_buf(),
            field: "RepetitionTime",
        })?;
    let duration = format_duration(run_duration_secs(n_vols, tr));

    let desc = format!(
        "{run_str} of {task_label} {variants} {seqs} {echo} fMRI data were collected ({params}). \
         Run duration was {duration} minutes, during which {n_vols} functional volumes were acquired.",
        variants = labels.variants,
        seqs = labels.sequences,
        echo = echoes.kind,
        params = join_parameters(&parameters),
    );
    Ok(normalize_paragraph(&desc))
}

/// `ceil(volumes * TR)`, ignoring floating-point dust below a microsecond.
pub fn run_duration_secs(n_vols: usize, tr: f64) -> u64 {
    let secs = n_vols as f64 * tr;
    let secs = (secs * 1e6).round() / 1e6;
    secs.ceil().max(0.0) as u64
}

#[cfg(test)]
#[path = "../../tests/src_inline/describe/func.rs"]
mod tests;
