use std::{fmt, str::FromStr};

use thiserror::Error;

/// Errors raised while building reports.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The requested report type is not one the factory knows how to build.
    #[error("Tipo de reporte desconocido: `{0}`")]
    UnknownReportType(String),
}

/// Report formats the factory can build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Portable document format.
    Pdf,
    /// Hypertext markup.
    Html,
}

impl ReportKind {
    /// Type name used to request the report, e.g. `"PDF"`.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Html => "HTML",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    /// Type names are matched exactly; `"pdf"` is not a known type.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "PDF" => Ok(Self::Pdf),
            "HTML" => Ok(Self::Html),
            other => Err(ReportError::UnknownReportType(other.to_owned())),
        }
    }
}

/// A report that can be generated.
pub trait Report: fmt::Debug {
    /// Format produced by the report.
    fn kind(&self) -> ReportKind;

    /// Generates the report, returning a description of the work done.
    fn generate(&self) -> &'static str;
}

/// Report rendered as PDF.
#[derive(Clone, Copy, Debug, Default)]
pub struct PdfReport;

impl Report for PdfReport {
    fn kind(&self) -> ReportKind {
        ReportKind::Pdf
    }

    fn generate(&self) -> &'static str {
        "Generando reporte en PDF"
    }
}

/// Report rendered as HTML.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlReport;

impl Report for HtmlReport {
    fn kind(&self) -> ReportKind {
        ReportKind::Html
    }

    fn generate(&self) -> &'static str {
        "Generando reporte en HTML"
    }
}

/// Builds reports from their type name.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReportFactory;

impl ReportFactory {
    /// Creates a new factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the report registered under `type_name`.
    pub fn create_report(&self, type_name: &str) -> Result<Box<dyn Report>, ReportError> {
        let kind: ReportKind = type_name.parse()?;
        Ok(self.create(kind))
    }

    /// Builds a report of a known kind.
    #[must_use]
    pub fn create(&self, kind: ReportKind) -> Box<dyn Report> {
        match kind {
            ReportKind::Pdf => Box::new(PdfReport),
            ReportKind::Html => Box::new(HtmlReport),
        }
    }
}
