use std::time::Duration;

use thiserror::Error;

/// Everything that can go wrong while scraping the price table.
///
/// Row timeouts never escape a run; the search loop skips the row. Extraction
/// failures only escape under [`MalformedRowPolicy::Abort`].
///
/// [`MalformedRowPolicy::Abort`]: crate::config::MalformedRowPolicy::Abort
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid keyword {keyword:?}: only letters and interior spaces are allowed")]
    Validation { keyword: String },

    #[error("{what} not found (selector: {selector})")]
    Locator {
        what: &'static str,
        selector: String,
    },

    #[error("row did not populate within {}ms", .waited.as_millis())]
    RowTimeout { waited: Duration },

    #[error("failed to read {field} from row: {source}")]
    Extraction {
        field: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Session(#[from] anyhow::Error),
}

impl ScrapeError {
    pub fn locator(what: &'static str, selector: impl Into<String>) -> Self {
        Self::Locator {
            what,
            selector: selector.into(),
        }
    }

    pub fn extraction(field: &'static str, source: anyhow::Error) -> Self {
        Self::Extraction { field, source }
    }
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
