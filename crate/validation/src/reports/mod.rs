use serde::Serialize;

pub use aggregator::ReportAggregator;
pub use detailed_report::DetailedReport;
pub use simple_report::{SignatureSummary, SimpleReport};

use crate::ValidationResult;

mod aggregator;
mod detailed_report;
mod simple_report;

/// The outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reports {
    detailed_report: DetailedReport,
    simple_report: SimpleReport,
}

impl Reports {
    pub(crate) const fn new(detailed_report: DetailedReport, simple_report: SimpleReport) -> Self {
        Self {
            detailed_report,
            simple_report,
        }
    }

    #[must_use]
    pub const fn detailed_report(&self) -> &DetailedReport {
        &self.detailed_report
    }

    #[must_use]
    pub const fn simple_report(&self) -> &SimpleReport {
        &self.simple_report
    }

    pub fn to_json_string(&self) -> ValidationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
