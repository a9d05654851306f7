use crate::config::Pacing;
use crate::error::Result;
use crate::page::{Edge, PageSession};

/// Get the page into a scrapeable state.
///
/// Scrolling to the bottom and back makes the table render the content it
/// otherwise loads lazily.
pub async fn prime_page<S: PageSession>(session: &mut S, pacing: &Pacing) -> Result<()> {
    session.wait_for_load().await?;
    tracing::info!("Page loaded");

    session.scroll_to(Edge::Bottom).await?;
    tokio::time::sleep(pacing.prime_pause).await;
    session.wait_for_idle().await?;
    session.scroll_to(Edge::Top).await?;

    let url = session.current_url().await?;
    tracing::info!("Current page URL: {}", url);
    Ok(())
}
