use crate::config::{MalformedRowPolicy, Pacing, PollConfig, ScrapeConfig, TableLayout};
use crate::error::{Result, ScrapeError};
use crate::keywords::Keyword;
use crate::page::{ElementHandle, PageSession};
use crate::record::{Record, ResultSet};
use crate::table::{RowExtractor, RowPoller};

use super::aggregator::ResultAggregator;
use super::prime::prime_page;

/// Drives the page's search box one keyword at a time.
///
/// Owns the page session outright, so nothing else can type into the search
/// box or touch the table while a run is in progress.
pub struct SearchLoop<S: PageSession> {
    session: S,
    layout: TableLayout,
    poll: PollConfig,
    pacing: Pacing,
    malformed_rows: MalformedRowPolicy,
}

impl<S: PageSession> SearchLoop<S> {
    pub fn new(session: S, config: &ScrapeConfig) -> Self {
        Self {
            session,
            layout: config.layout.clone(),
            poll: config.poll,
            pacing: config.pacing,
            malformed_rows: config.malformed_rows,
        }
    }

    /// Scroll the page through once so the table is fully rendered.
    pub async fn prime(&mut self) -> Result<()> {
        prime_page(&mut self.session, &self.pacing).await
    }

    /// Search for every keyword in order and collect at most one record each.
    ///
    /// Keywords without a matching row are simply absent from the result.
    /// Fails only if the search box or the table is missing, the session
    /// itself breaks, or a malformed row is hit under
    /// [`MalformedRowPolicy::Abort`].
    pub async fn run(&mut self, keywords: &[Keyword]) -> Result<ResultSet> {
        let search = self
            .session
            .locate(&self.layout.search_input)
            .await?
            .ok_or_else(|| ScrapeError::locator("search input", self.layout.search_input.as_str()))?;

        let mut results = ResultAggregator::new();

        for keyword in keywords {
            tracing::info!("Searching for {:?}", keyword.as_str());
            search.set_value(keyword.as_str()).await?;
            let shown = search.read_text().await?;
            if shown != keyword.as_str() {
                tracing::warn!("Search box shows {:?} instead of {:?}", shown, keyword.as_str());
            }
            tokio::time::sleep(self.pacing.search_settle).await;

            let table = self
                .session
                .locate(&self.layout.row_container)
                .await?
                .ok_or_else(|| ScrapeError::locator("row container", self.layout.row_container.as_str()))?;

            match self.scan_rows(&table, keyword).await {
                Ok(Some(record)) => {
                    tracing::info!(
                        "Found {:?}: {} ({}) at {}",
                        keyword.as_str(),
                        record.coin_name,
                        record.coin_symbol,
                        record.price
                    );
                    results.add(record);
                }
                Ok(None) => tracing::info!("No row matched {:?}", keyword.as_str()),
                Err(e @ ScrapeError::Extraction { .. })
                    if self.malformed_rows == MalformedRowPolicy::SkipKeyword =>
                {
                    tracing::warn!("Abandoning keyword {:?}: {}", keyword.as_str(), e);
                }
                Err(e) => return Err(e),
            }

            tokio::time::sleep(self.pacing.between_keywords).await;
            search.clear().await?;
            tokio::time::sleep(self.pacing.between_keywords).await;
        }

        Ok(results.finish())
    }

    /// Walk the currently filtered rows until one matches `keyword`.
    async fn scan_rows(&mut self, table: &S::Element, keyword: &Keyword) -> Result<Option<Record>> {
        self.session.wait_for_load().await?;
        tokio::time::sleep(self.pacing.render_wait).await;

        let rows = table.locate_all(&self.layout.row).await?;
        if rows.is_empty() {
            tracing::info!("No rows to search for {:?}", keyword.as_str());
            return Ok(None);
        }

        let poller = RowPoller::new(&self.layout, self.poll);
        let extractor = RowExtractor::new(&self.layout);

        for (index, row) in rows.iter().enumerate() {
            if let Err(e) = poller.stabilize(row).await.into_result() {
                tracing::warn!(row = index, "Skipping unstable row: {}", e);
                continue;
            }
            if let Some(record) = extractor.extract(row, keyword).await? {
                return Ok(Some(record));
            }
        }

        Ok(None)
    }
}
