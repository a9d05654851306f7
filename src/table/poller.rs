use std::time::Duration;

use tokio::time::Instant;

use crate::config::{PollConfig, TableLayout};
use crate::error::ScrapeError;
use crate::page::ElementHandle;

use super::read_slot;

/// How a row's stabilization wait ended.
#[derive(Debug)]
pub enum RowState {
    /// The name field has text.
    Stable,
    /// The deadline passed while the name field was still empty.
    TimedOut { waited: Duration },
    /// Reading the row failed outright.
    Failed(anyhow::Error),
}

impl RowState {
    pub fn is_stable(&self) -> bool {
        matches!(self, RowState::Stable)
    }

    pub fn into_result(self) -> Result<(), ScrapeError> {
        match self {
            RowState::Stable => Ok(()),
            RowState::TimedOut { waited } => Err(ScrapeError::RowTimeout { waited }),
            RowState::Failed(source) => Err(ScrapeError::extraction("name", source)),
        }
    }
}

/// Waits for freshly rendered rows to be filled in.
///
/// Rows show up in the DOM before their text does. A row counts as populated
/// once its name field reads non-empty.
pub struct RowPoller<'a> {
    layout: &'a TableLayout,
    config: PollConfig,
}

impl<'a> RowPoller<'a> {
    pub fn new(layout: &'a TableLayout, config: PollConfig) -> Self {
        Self { layout, config }
    }

    /// Poll `row` until it is populated, a read fails, or the deadline passes.
    pub async fn stabilize<E: ElementHandle>(&self, row: &E) -> RowState {
        let started = Instant::now();
        // The deadline lives inside this future and is dropped with it,
        // whichever way the wait ends.
        match tokio::time::timeout(self.config.deadline, self.poll(row)).await {
            Ok(Ok(())) => RowState::Stable,
            Ok(Err(e)) => RowState::Failed(e),
            Err(_) => RowState::TimedOut {
                waited: started.elapsed(),
            },
        }
    }

    async fn poll<E: ElementHandle>(&self, row: &E) -> anyhow::Result<()> {
        let mut attempt = 0u32;
        loop {
            tokio::time::sleep(self.config.interval).await;
            attempt += 1;

            let cells = row.locate_all(&self.layout.cell).await?;
            let name = read_slot(&cells, &self.layout.name).await?;
            if !name.is_empty() {
                tracing::debug!(attempt, name = %name, "Row populated");
                return Ok(());
            }

            match row.inner_html().await {
                Ok(html) => tracing::debug!(attempt, html = %html, "Row not populated yet, retrying"),
                Err(e) => tracing::debug!(attempt, "Row not populated yet, HTML unavailable: {:#}", e),
            }
            tokio::time::sleep(self.config.empty_backoff).await;
        }
    }
}
