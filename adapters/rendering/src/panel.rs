use std::fmt;

use crate::{chart::LineChart, Color};

/// Explanation of the model printed on request.
pub const MODEL_EXPLANATION: &str = "\
Esta maqueta utiliza un modelo simplificado de flujo de usuarios basado en tasas diferenciales:

  Ecuación principal:  dU/dt = λ - µ - α

  λ = Tasa de llegada de nuevos usuarios.
  µ = Tasa de procesamiento de usuarios.
  α = Usuarios que abandonan el sistema.

  - Control de saturación de servidor.
  - Abandono proporcional a la congestión.
  - Evolución temporal de procesos simultáneos.";

/// Line printed once a run completes.
pub const COMPLETION_MESSAGE: &str =
    "¡Simulación completa! Ajusta los parámetros para explorar diferentes escenarios.";

/// Label and formatted value shown in a metric box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricPresentation {
    /// Caption of the metric.
    pub label: String,
    /// Formatted value.
    pub value: String,
}

impl MetricPresentation {
    /// Creates a new metric descriptor.
    #[must_use]
    pub fn new<L, V>(label: L, value: V) -> Self
    where
        L: Into<String>,
        V: Into<String>,
    {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Everything a dashboard frame displays.
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    /// Main heading.
    pub title: String,
    /// Line under the heading.
    pub subtitle: String,
    /// Metrics drawn as boxes side by side.
    pub headline: Vec<MetricPresentation>,
    /// Metrics listed under the boxes.
    pub details: Vec<MetricPresentation>,
    /// Chart drawn under the metrics.
    pub chart: LineChart,
    /// Whether to append [`MODEL_EXPLANATION`].
    pub explain: bool,
    /// Optional footer, e.g. a code that reproduces the run.
    pub footer: Option<String>,
    /// Accent color for headings.
    pub accent: Color,
}

impl Dashboard {
    /// Renders the whole dashboard as text.
    #[must_use]
    pub fn render(&self, colored: bool) -> String {
        Frame {
            dashboard: self,
            colored,
        }
        .to_string()
    }
}

struct Frame<'a> {
    dashboard: &'a Dashboard,
    colored: bool,
}

impl Frame<'_> {
    fn accent(&self, text: &str) -> String {
        if self.colored {
            format!(
                "{}{text}{}",
                self.dashboard.accent.ansi_foreground(),
                Color::ANSI_RESET
            )
        } else {
            text.to_owned()
        }
    }
}

impl fmt::Display for Frame<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dashboard = self.dashboard;
        let rule = "─".repeat(dashboard.chart.width.max(40));

        writeln!(f, "{}", self.accent(&dashboard.title))?;
        writeln!(f, "{}", dashboard.subtitle)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{}", self.accent("Resumen del Sistema"))?;
        for line in metric_boxes(&dashboard.headline) {
            writeln!(f, "{line}")?;
        }

        let width = dashboard
            .details
            .iter()
            .map(|metric| metric.label.chars().count())
            .max()
            .unwrap_or(0);
        for metric in &dashboard.details {
            writeln!(f, "  {:<width$}  {}", metric.label, metric.value)?;
        }

        writeln!(f)?;
        f.write_str(&dashboard.chart.render(self.colored))?;

        if dashboard.explain {
            writeln!(f)?;
            writeln!(f, "{}", self.accent("¿Cómo funciona este modelo?"))?;
            writeln!(f, "{MODEL_EXPLANATION}")?;
        }

        writeln!(f)?;
        writeln!(f, "{COMPLETION_MESSAGE}")?;
        if let Some(footer) = &dashboard.footer {
            writeln!(f, "{footer}")?;
        }
        Ok(())
    }
}

/// Lays metrics out as bordered boxes on a shared row.
#[must_use]
pub fn metric_boxes(metrics: &[MetricPresentation]) -> Vec<String> {
    let mut lines = vec![String::new(); 4];
    for (index, metric) in metrics.iter().enumerate() {
        let inner = metric
            .label
            .chars()
            .count()
            .max(metric.value.chars().count())
            + 2;
        let separator = if index == 0 { "" } else { " " };
        let border = "─".repeat(inner);

        lines[0].push_str(&format!("{separator}┌{border}┐"));
        lines[1].push_str(&format!("{separator}│{}│", centered(&metric.label, inner)));
        lines[2].push_str(&format!("{separator}│{}│", centered(&metric.value, inner)));
        lines[3].push_str(&format!("{separator}└{border}┘"));
    }
    lines
}

fn centered(text: &str, width: usize) -> String {
    let length = text.chars().count();
    let left = width.saturating_sub(length) / 2;
    let right = width.saturating_sub(length + left);
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}
