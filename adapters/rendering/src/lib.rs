#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for User Dynamics adapters.
//!
//! Adapters describe what to show through a [`Dashboard`], which bundles the
//! metric boxes and a [`LineChart`], and hand it to a [`RenderingBackend`].

mod canvas;
mod chart;
mod panel;

use anyhow::{Context, Result as AnyResult};
use std::{error::Error, fmt, io::Write};

pub use chart::{LineChart, LineStyle, Series};
pub use panel::{metric_boxes, Dashboard, MetricPresentation, COMPLETION_MESSAGE, MODEL_EXPLANATION};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Escape sequence restoring the terminal's default foreground.
    pub const ANSI_RESET: &'static str = "\u{1b}[0m";

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Truecolor escape sequence selecting this color as the foreground.
    ///
    /// Alpha is ignored; terminals have no notion of translucency.
    #[must_use]
    pub fn ansi_foreground(self) -> String {
        format!(
            "\u{1b}[38;2;{};{};{}m",
            channel_byte(self.red),
            channel_byte(self.green),
            channel_byte(self.blue)
        )
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

fn channel_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Named colors used by the dashboard series.
pub mod palette {
    use super::Color;

    /// Active users line.
    pub const ROYAL_BLUE: Color = Color::from_rgb_u8(0x41, 0x69, 0xe1);
    /// Processed users line.
    pub const SEA_GREEN: Color = Color::from_rgb_u8(0x2e, 0x8b, 0x57);
    /// Abandoned users line.
    pub const FIREBRICK: Color = Color::from_rgb_u8(0xb2, 0x22, 0x22);
    /// Headings.
    pub const HEADING: Color = Color::from_rgb_u8(0x29, 0x80, 0xb9);
}

/// Rendering backend capable of presenting User Dynamics dashboards.
pub trait RenderingBackend {
    /// Presents a finished dashboard.
    fn present(&mut self, dashboard: &Dashboard) -> AnyResult<()>;
}

/// Backend writing dashboards as text to any [`Write`] sink.
#[derive(Debug)]
pub struct TextBackend<W> {
    sink: W,
    colored: bool,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend writing to `sink`, with ANSI colors when `colored` is set.
    pub fn new(sink: W, colored: bool) -> Self {
        Self { sink, colored }
    }

    /// Consumes the backend, returning the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, dashboard: &Dashboard) -> AnyResult<()> {
        let frame = dashboard.render(self.colored);
        self.sink
            .write_all(frame.as_bytes())
            .context("failed to write dashboard")?;
        self.sink.flush().context("failed to flush dashboard output")
    }
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The plot area cannot hold axes, ticks and a legend.
    ChartTooSmall {
        /// Requested plot width in cells.
        width: usize,
        /// Requested plot height in cells.
        height: usize,
    },
    /// The plot area exceeds what a terminal frame can sensibly hold.
    ChartTooLarge {
        /// Requested plot width in cells.
        width: usize,
        /// Requested plot height in cells.
        height: usize,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChartTooSmall { width, height } => {
                write!(
                    f,
                    "chart area of {width}x{height} cells is too small (minimum 20x5)"
                )
            }
            Self::ChartTooLarge { width, height } => {
                write!(
                    f,
                    "chart area of {width}x{height} cells is too large (maximum 1000x200)"
                )
            }
        }
    }
}

impl Error for RenderingError {}
