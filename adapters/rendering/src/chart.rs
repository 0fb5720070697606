use crate::{
    canvas::{trace_line, Canvas},
    Color, RenderingError,
};

const GRID_GLYPH: char = '·';
const DOT_GLYPH: char = '.';
const Y_TICKS: usize = 5;
const X_TICKS: usize = 6;
const MIN_PLOT_WIDTH: usize = 20;
const MIN_PLOT_HEIGHT: usize = 5;
const MAX_PLOT_WIDTH: usize = 1000;
const MAX_PLOT_HEIGHT: usize = 200;

/// Stroke pattern applied along a series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineStyle {
    /// Every cell on the path is drawn.
    Solid,
    /// Two cells drawn, one skipped.
    Dashed,
    /// Two cells drawn, a gap, a dot, a gap.
    DashDot,
}

impl LineStyle {
    /// Glyph drawn at position `index` along the path, or `None` for a gap.
    #[must_use]
    pub fn glyph_at(self, index: usize, marker: char) -> Option<char> {
        match self {
            Self::Solid => Some(marker),
            Self::Dashed => (index % 3 != 2).then_some(marker),
            Self::DashDot => match index % 5 {
                0 | 1 => Some(marker),
                3 => Some(DOT_GLYPH),
                _ => None,
            },
        }
    }

    fn sample(self, marker: char, length: usize) -> String {
        (0..length)
            .map(|index| self.glyph_at(index, marker).unwrap_or(' '))
            .collect()
    }
}

/// Named sequence of points drawn as one line.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// Legend label.
    pub label: String,
    /// Glyph used for the stroke.
    pub marker: char,
    /// Stroke pattern.
    pub style: LineStyle,
    /// Foreground color used when colored output is requested.
    pub color: Color,
    /// Points in drawing order.
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Pairs `xs` with `ys` into a new series; extra values on either side are dropped.
    #[must_use]
    pub fn from_columns<T>(
        label: T,
        marker: char,
        style: LineStyle,
        color: Color,
        xs: &[f64],
        ys: &[f64],
    ) -> Self
    where
        T: Into<String>,
    {
        Self {
            label: label.into(),
            marker,
            style,
            color,
            points: xs.iter().copied().zip(ys.iter().copied()).collect(),
        }
    }
}

/// Character-cell line chart with axes, tick labels, legend and optional grid.
///
/// Series listed first take precedence where strokes overlap.
#[derive(Clone, Debug, PartialEq)]
pub struct LineChart {
    /// Title centered above the plot.
    pub title: String,
    /// Caption printed under the horizontal axis.
    pub x_label: String,
    /// Caption printed above the vertical axis.
    pub y_label: String,
    /// Plot area width in cells, excluding the axis gutter.
    pub width: usize,
    /// Plot area height in cells.
    pub height: usize,
    /// Whether to draw faint grid lines at tick positions.
    pub grid: bool,
    /// Series to plot.
    pub series: Vec<Series>,
    /// Color applied to the title.
    pub title_color: Color,
}

impl LineChart {
    /// Creates an empty chart with the provided plot dimensions.
    ///
    /// Plots must be between 20x5 and 1000x200 cells.
    pub fn new<T>(title: T, width: usize, height: usize) -> Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        if width < MIN_PLOT_WIDTH || height < MIN_PLOT_HEIGHT {
            return Err(RenderingError::ChartTooSmall { width, height });
        }
        if width > MAX_PLOT_WIDTH || height > MAX_PLOT_HEIGHT {
            return Err(RenderingError::ChartTooLarge { width, height });
        }

        Ok(Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            width,
            height,
            grid: true,
            series: Vec::new(),
            title_color: Color::from_rgb_u8(0x15, 0x43, 0x60),
        })
    }

    /// Sets the axis captions.
    #[must_use]
    pub fn with_axis_labels<X, Y>(mut self, x_label: X, y_label: Y) -> Self
    where
        X: Into<String>,
        Y: Into<String>,
    {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    /// Enables or disables the background grid.
    #[must_use]
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Appends a series.
    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    fn x_range(&self) -> (f64, f64) {
        let (min, max) = finite_bounds(
            self.series
                .iter()
                .flat_map(|series| series.points.iter().map(|point| point.0)),
        );
        match (min, max) {
            (Some(min), Some(max)) if max > min => (min, max),
            (Some(min), _) => (min, min + 1.0),
            _ => (0.0, 1.0),
        }
    }

    /// Vertical range always includes zero and leaves 10% headroom above the data.
    fn y_range(&self) -> (f64, f64) {
        let (min, max) = finite_bounds(
            self.series
                .iter()
                .flat_map(|series| series.points.iter().map(|point| point.1)),
        );
        let min = min.unwrap_or(0.0).min(0.0);
        let max = max.unwrap_or(0.0).max(0.0);
        let headroom = (max - min) * 0.1;
        if max + headroom > min {
            (min, max + headroom)
        } else {
            (min, min + 1.0)
        }
    }

    /// Renders the chart into text lines.
    #[must_use]
    pub fn render_lines(&self, colored: bool) -> Vec<String> {
        let (x_min, x_max) = self.x_range();
        let (y_min, y_max) = self.y_range();

        let tick_rows: Vec<usize> = (0..Y_TICKS)
            .map(|tick| tick * (self.height - 1) / (Y_TICKS - 1))
            .collect();
        let tick_columns: Vec<usize> = (0..X_TICKS)
            .map(|tick| tick * (self.width - 1) / (X_TICKS - 1))
            .collect();

        let y_labels: Vec<String> = tick_rows
            .iter()
            .map(|&row| {
                let fraction = 1.0 - row as f64 / (self.height - 1) as f64;
                format!("{:.0}", y_min + (y_max - y_min) * fraction)
            })
            .collect();
        let gutter = y_labels
            .iter()
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(1);

        let mut plot = Canvas::new(self.width, self.height);
        if self.grid {
            self.draw_grid(&mut plot, &tick_rows, &tick_columns);
        }
        for series in &self.series {
            draw_series(&mut plot, series, (x_min, x_max), (y_min, y_max));
        }
        self.draw_legend(&mut plot);

        let mut lines = Vec::with_capacity(self.height + 5);
        lines.push(center(
            &self.title,
            gutter + 2 + self.width,
            colored.then_some(self.title_color),
        ));
        lines.push(self.y_label.clone());

        for row in 0..plot.height() {
            let (label, axis) = match tick_rows.iter().position(|&tick| tick == row) {
                Some(index) => (y_labels[index].as_str(), '┤'),
                None => ("", '│'),
            };
            lines.push(format!(
                "{label:>gutter$} {axis}{}",
                plot.row_to_string(row, colored)
            ));
        }

        let mut axis: String = (0..plot.width())
            .map(|column| {
                if tick_columns.contains(&column) {
                    '┬'
                } else {
                    '─'
                }
            })
            .collect();
        axis.insert(0, '└');
        lines.push(format!("{:gutter$} {axis}", ""));

        let mut tick_labels = Canvas::new(self.width + 8, 1);
        for &column in &tick_columns {
            let value = x_min + (x_max - x_min) * column as f64 / (self.width - 1) as f64;
            let label = format!("{value:.0}");
            let start = (column + 1).saturating_sub(label.chars().count() / 2);
            tick_labels.text(start, 0, &label, None);
        }
        let tick_row = format!("{:gutter$} {}", "", tick_labels.row_to_string(0, false));
        lines.push(tick_row.trim_end().to_owned());
        lines.push(center(&self.x_label, gutter + 2 + self.width, None));

        lines
    }

    /// Renders the chart into a single newline-terminated string.
    #[must_use]
    pub fn render(&self, colored: bool) -> String {
        let mut output = self.render_lines(colored).join("\n");
        output.push('\n');
        output
    }

    fn draw_grid(&self, canvas: &mut Canvas, tick_rows: &[usize], tick_columns: &[usize]) {
        let color = Some(Color::from_rgb_u8(0x80, 0x80, 0x80).lighten(0.4));
        for &row in tick_rows {
            for column in (0..self.width).step_by(2) {
                canvas.set(column, row, GRID_GLYPH, color);
            }
        }
        for &column in tick_columns {
            for row in (0..self.height).step_by(2) {
                canvas.set(column, row, GRID_GLYPH, color);
            }
        }
    }

    /// Legend sits in the upper right corner of the plot area.
    fn draw_legend(&self, canvas: &mut Canvas) {
        let entries: Vec<(String, Color)> = self
            .series
            .iter()
            .map(|series| {
                (
                    format!(
                        " {} {} ",
                        series.style.sample(series.marker, 4),
                        series.label
                    ),
                    series.color,
                )
            })
            .collect();
        let Some(legend_width) = entries.iter().map(|(text, _)| text.chars().count()).max()
        else {
            return;
        };
        if legend_width > canvas.width() || entries.len() > canvas.height() {
            return;
        }

        let column = canvas.width() - legend_width;
        for (row, (text, color)) in entries.iter().enumerate() {
            let padded = format!("{text:<legend_width$}");
            canvas.text(column, row, &padded, Some(*color));
        }
    }
}

fn draw_series(canvas: &mut Canvas, series: &Series, x_range: (f64, f64), y_range: (f64, f64)) {
    let width = canvas.width();
    let height = canvas.height();
    let to_cell = |x: f64, y: f64| -> Option<(usize, usize)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let x_norm = (x - x_range.0) / (x_range.1 - x_range.0);
        let y_norm = (y - y_range.0) / (y_range.1 - y_range.0);
        let column = (x_norm * (width - 1) as f64)
            .round()
            .clamp(0.0, (width - 1) as f64);
        let row = ((1.0 - y_norm) * (height - 1) as f64)
            .round()
            .clamp(0.0, (height - 1) as f64);
        Some((column as usize, row as usize))
    };

    let cells: Vec<(usize, usize)> = series
        .points
        .iter()
        .filter_map(|&(x, y)| to_cell(x, y))
        .collect();

    let mut path: Vec<(usize, usize)> = Vec::new();
    match cells.as_slice() {
        [] => return,
        [single] => path.push(*single),
        _ => {
            for pair in cells.windows(2) {
                trace_line(pair[0], pair[1], |column, row| {
                    if path.last() != Some(&(column, row)) {
                        path.push((column, row));
                    }
                });
            }
        }
    }

    for (index, &(column, row)) in path.iter().enumerate() {
        let Some(glyph) = series.style.glyph_at(index, series.marker) else {
            continue;
        };
        let free = canvas
            .get(column, row)
            .map_or(false, |cell| cell.glyph == ' ' || cell.glyph == GRID_GLYPH);
        if free {
            canvas.set(column, row, glyph, Some(series.color));
        }
    }
}

fn finite_bounds(values: impl Iterator<Item = f64>) -> (Option<f64>, Option<f64>) {
    values
        .filter(|value| value.is_finite())
        .fold((None, None), |(min, max), value| {
            (
                Some(min.map_or(value, |current: f64| current.min(value))),
                Some(max.map_or(value, |current: f64| current.max(value))),
            )
        })
}

fn center(text: &str, width: usize, color: Option<Color>) -> String {
    let length = text.chars().count();
    let padding = width.saturating_sub(length) / 2;
    let mut line = " ".repeat(padding);
    match color {
        Some(color) => {
            line.push_str(&color.ansi_foreground());
            line.push_str(text);
            line.push_str(Color::ANSI_RESET);
        }
        None => line.push_str(text),
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{LineChart, LineStyle, Series};
    use crate::{Color, RenderingError};

    fn ramp_chart(width: usize, height: usize) -> LineChart {
        let xs: Vec<f64> = (0..=10).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| x * 2.0).collect();
        LineChart::new("Ramp", width, height)
            .expect("valid size")
            .with_axis_labels("x", "y")
            .with_series(Series::from_columns(
                "ramp",
                '*',
                LineStyle::Solid,
                Color::from_rgb_u8(255, 0, 0),
                &xs,
                &ys,
            ))
    }

    #[test]
    fn dashed_styles_leave_gaps() {
        assert_eq!(LineStyle::Solid.sample('#', 5), "#####");
        assert_eq!(LineStyle::Dashed.sample('#', 6), "## ## ");
        assert_eq!(LineStyle::DashDot.sample('#', 5), "## . ");
    }

    #[test]
    fn rejects_tiny_plots() {
        assert_eq!(
            LineChart::new("tiny", 4, 2),
            Err(RenderingError::ChartTooSmall {
                width: 4,
                height: 2
            })
        );
    }

    #[test]
    fn rejects_oversized_plots() {
        assert_eq!(
            LineChart::new("huge", usize::MAX, 10),
            Err(RenderingError::ChartTooLarge {
                width: usize::MAX,
                height: 10
            })
        );
        assert_eq!(
            LineChart::new("tall", 40, 100_000),
            Err(RenderingError::ChartTooLarge {
                width: 40,
                height: 100_000
            })
        );
        assert!(LineChart::new("widest", 1000, 200).is_ok());
    }

    #[test]
    fn plot_rows_share_one_width() {
        let chart = ramp_chart(40, 10);
        let lines = chart.render_lines(false);
        assert_eq!(lines.len(), 10 + 5);

        let plot_rows = &lines[2..12];
        let width = plot_rows[0].chars().count();
        assert!(plot_rows.iter().all(|row| row.chars().count() == width));
        assert!(width >= 40 + 2);
    }

    #[test]
    fn ramp_starts_at_the_origin() {
        let chart = ramp_chart(30, 8).with_grid(false);
        let lines = chart.render_lines(false);
        let plot_rows = &lines[2..10];

        let bottom = plot_rows.last().expect("bottom row");
        let axis_index = bottom.find('│').or_else(|| bottom.find('┤')).expect("axis");
        let after_axis: Vec<char> = bottom[axis_index..].chars().skip(1).collect();
        assert_eq!(after_axis.first(), Some(&'*'));
        assert!(lines.iter().any(|line| line.contains("ramp")));
    }

    #[test]
    fn colored_output_contains_escapes() {
        let chart = ramp_chart(30, 8);
        let plain = chart.render(false);
        let colored = chart.render(true);
        assert!(!plain.contains('\u{1b}'));
        assert!(colored.contains("\u{1b}[38;2;255;0;0m"));
    }
}
