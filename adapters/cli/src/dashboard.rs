use anyhow::{Context, Result};
use user_dynamics_core::{SimulationParameters, Trajectory, DASHBOARD_SUBTITLE, DASHBOARD_TITLE};
use user_dynamics_rendering::{
    palette, Dashboard, LineChart, LineStyle, MetricPresentation, Series,
};
use user_dynamics_system_analytics::{Metric, SummaryReport};

use crate::scenario_transfer;

const CHART_TITLE: &str = "Dinámica de Usuarios en el Sistema Web";

/// Presentation options chosen on the command line.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ChartOptions {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) grid: bool,
    pub(crate) explain: bool,
}

/// Assembles the dashboard describing a finished run.
pub(crate) fn build(
    parameters: &SimulationParameters,
    trajectory: &Trajectory,
    summary: &SummaryReport,
    options: ChartOptions,
) -> Result<Dashboard> {
    let time = trajectory.time();
    let chart = LineChart::new(CHART_TITLE, options.width, options.height)
        .context("invalid chart dimensions")?
        .with_axis_labels("Tiempo (segundos)", "Cantidad de Usuarios")
        .with_grid(options.grid)
        .with_series(Series::from_columns(
            "Usuarios Activos",
            '*',
            LineStyle::Solid,
            palette::ROYAL_BLUE,
            time,
            trajectory.active(),
        ))
        .with_series(Series::from_columns(
            "Usuarios Procesados",
            '+',
            LineStyle::Dashed,
            palette::SEA_GREEN,
            time,
            trajectory.processed(),
        ))
        .with_series(Series::from_columns(
            "Usuarios que Abandonan",
            'x',
            LineStyle::DashDot,
            palette::FIREBRICK,
            time,
            trajectory.abandoned(),
        ));

    let footer = scenario_transfer::encode(parameters)
        .map(|code| format!("Escenario: {code}"))
        .context("failed to encode scenario code")?;

    Ok(Dashboard {
        title: DASHBOARD_TITLE.to_owned(),
        subtitle: DASHBOARD_SUBTITLE.to_owned(),
        headline: presentations(summary.headline_metrics()),
        details: presentations(summary.run_metrics()),
        chart,
        explain: options.explain,
        footer: Some(footer),
        accent: palette::HEADING,
    })
}

fn presentations(metrics: Vec<Metric>) -> Vec<MetricPresentation> {
    metrics
        .into_iter()
        .map(|metric| MetricPresentation::new(metric.label, metric.value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use user_dynamics_system_analytics::Analytics;
    use user_dynamics_system_user_flow::simulate;

    fn options() -> ChartOptions {
        ChartOptions {
            width: 60,
            height: 14,
            grid: true,
            explain: false,
        }
    }

    #[test]
    fn dashboard_carries_all_three_series() {
        let parameters = SimulationParameters::default();
        let trajectory = simulate(&parameters).expect("valid defaults");
        let summary = Analytics::new().summarize(&parameters, &trajectory);

        let dashboard = build(&parameters, &trajectory, &summary, options()).expect("dashboard");

        assert_eq!(dashboard.chart.series.len(), 3);
        assert!(dashboard
            .chart
            .series
            .iter()
            .all(|series| series.points.len() == trajectory.len()));
        assert_eq!(dashboard.headline.len(), 3);
        let footer = dashboard.footer.expect("scenario footer");
        assert!(footer.starts_with("Escenario: flow:v1:"));
    }

    #[test]
    fn undersized_charts_are_reported() {
        let parameters = SimulationParameters::default();
        let trajectory = simulate(&parameters).expect("valid defaults");
        let summary = Analytics::new().summarize(&parameters, &trajectory);
        let options = ChartOptions {
            width: 5,
            ..options()
        };

        let error = build(&parameters, &trajectory, &summary, options).expect_err("too small");
        assert!(format!("{error:#}").contains("too small"));
    }
}
