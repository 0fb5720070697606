#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Report generation demo built from three classic patterns.
//!
//! [`DatabaseConnection`] is a process-wide singleton, [`ReportFactory`]
//! builds reports keyed by type name, and [`ReportFacade`] sequences the
//! connection and creation steps behind a single call.

mod connection;
mod factory;

pub use connection::DatabaseConnection;
pub use factory::{HtmlReport, PdfReport, Report, ReportError, ReportFactory, ReportKind};

/// Lines produced by a single facade request, in the order they happened.
///
/// The connection line is always present because connecting happens before
/// the report type is resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportTranscript {
    /// Output of the connection step.
    pub connection: &'static str,
    /// Output of the generated report, or why no report could be built.
    pub report: Result<&'static str, ReportError>,
}

/// Single entry point that connects to the database and then builds a report.
#[derive(Debug)]
pub struct ReportFacade {
    database: &'static DatabaseConnection,
    factory: ReportFactory,
}

impl Default for ReportFacade {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFacade {
    /// Creates a facade bound to the shared database connection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            database: DatabaseConnection::instance(),
            factory: ReportFactory::new(),
        }
    }

    /// Database connection used by the facade.
    #[must_use]
    pub const fn database(&self) -> &'static DatabaseConnection {
        self.database
    }

    /// Connects, then builds and generates the report registered under `type_name`.
    ///
    /// The connection step always runs first and is recorded in the transcript
    /// even when `type_name` turns out to be unknown.
    #[must_use]
    pub fn generate_report(&self, type_name: &str) -> ReportTranscript {
        let connection = self.database.connect();
        log::info!("{connection}");

        let report = self.factory.create_report(type_name).map(|report| {
            log::debug!("generating {} report", report.kind());
            report.generate()
        });
        if let Err(error) = &report {
            log::warn!("report request failed after connecting: {error}");
        }

        ReportTranscript { connection, report }
    }
}
