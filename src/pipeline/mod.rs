pub mod aggregator;
pub mod controller;
pub mod prime;

pub use aggregator::ResultAggregator;
pub use controller::SearchLoop;
pub use prime::prime_page;

use crate::config::ScrapeConfig;
use crate::error::Result;
use crate::keywords::Keyword;
use crate::page::PageSession;
use crate::record::ResultSet;

/// Prime the page, then search it for every keyword.
pub async fn scrape<S: PageSession>(
    session: S,
    config: &ScrapeConfig,
    keywords: &[Keyword],
) -> Result<ResultSet> {
    let mut search = SearchLoop::new(session, config);
    search.prime().await?;
    search.run(keywords).await
}
