use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use user_dynamics_core::{SimulationParameters, Trajectory};
use user_dynamics_system_analytics::SummaryReport;

/// Everything a JSON export carries.
#[derive(Debug, Serialize)]
struct RunExport<'a> {
    parameters: &'a SimulationParameters,
    summary: &'a SummaryReport,
    trajectory: &'a Trajectory,
}

/// Writes one `time,active,processed,abandoned` row per step, preceded by a header.
pub(crate) fn write_csv<W: Write>(trajectory: &Trajectory, mut sink: W) -> Result<()> {
    writeln!(sink, "time,active,processed,abandoned").context("failed to write CSV header")?;
    for record in trajectory.records() {
        writeln!(
            sink,
            "{},{},{},{}",
            record.time, record.active, record.processed, record.abandoned
        )
        .context("failed to write CSV row")?;
    }
    sink.flush().context("failed to flush CSV output")
}

/// Writes parameters, summary and trajectory as a pretty-printed JSON document.
pub(crate) fn write_json<W: Write>(
    parameters: &SimulationParameters,
    summary: &SummaryReport,
    trajectory: &Trajectory,
    mut sink: W,
) -> Result<()> {
    let export = RunExport {
        parameters,
        summary,
        trajectory,
    };
    serde_json::to_writer_pretty(&mut sink, &export).context("failed to write JSON output")?;
    writeln!(sink).context("failed to write JSON output")?;
    sink.flush().context("failed to flush JSON output")
}
