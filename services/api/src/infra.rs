use metrics_exporter_prometheus::PrometheusHandle;
use std::io::{self, BufRead, Write};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Writes `label` and reads one line of the answer. End of input yields an
/// empty answer, which then fails validation like any other bad token.
pub(crate) fn prompt<R, W>(label: &str, input: &mut R, output: &mut W) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{label}: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Uses the supplied value or asks for it on the terminal.
pub(crate) fn value_or_prompt(value: Option<String>, label: &str) -> io::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => prompt(label, &mut io::stdin().lock(), &mut io::stdout()),
    }
}
