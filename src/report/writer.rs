use crate::report::CrawlReport;
use crate::CrawlError;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// The top-level outcome handed to callers and serialized for them
///
/// Exactly one of the two variants: a crawl either produces a complete report
/// (possibly covering fewer pages than requested) or a single error
/// describing total failure to start.
#[derive(Debug)]
pub enum CrawlOutcome {
    Success { report: CrawlReport },
    Failure { error: String },
}

impl CrawlOutcome {
    pub fn success(report: CrawlReport) -> Self {
        Self::Success { report }
    }

    pub fn failure(error: &CrawlError) -> Self {
        Self::Failure {
            error: error.to_string(),
        }
    }
}

impl Serialize for CrawlOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            Self::Success { report } => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("report", report)?;
            }
            Self::Failure { error } => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
            }
        }
        map.end()
    }
}

/// Builds the report artifact file name for a domain and timestamp
pub fn report_filename(domain: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "crawl_report_{}_{}.json",
        domain,
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Writes the report as pretty-printed JSON under `reports_dir`
///
/// The directory is created if missing. Returns the path of the written file.
pub fn save_report(report: &CrawlReport, reports_dir: &Path) -> Result<PathBuf, CrawlError> {
    std::fs::create_dir_all(reports_dir)?;

    let filename = report_filename(&report.crawl_summary.base_domain, Utc::now());
    let path = reports_dir.join(filename);

    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)?;

    tracing::info!("Report written to {}", path.display());

    Ok(path)
}
