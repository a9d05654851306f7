use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tempfile::TempDir;

use super::launcher::{chrome_args, find_chrome_binary};

/// A running Chrome instance with its CDP connection.
pub struct BrowserSession {
    browser: Browser,
    handler_task: tokio::task::JoinHandle<()>,
    // Removed from disk on drop, after Chrome has let go of it.
    _profile_dir: TempDir,
}

impl BrowserSession {
    /// Launch a new browser and establish CDP connection.
    pub async fn launch(headless: bool) -> Result<Self> {
        let chrome = find_chrome_binary()?;
        let profile_dir = tempfile::tempdir().context("Failed to create Chrome profile dir")?;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome)
            .user_data_dir(profile_dir.path())
            .args(chrome_args())
            .window_size(1280, 720);

        if !headless {
            builder = builder.with_head();
        }

        let config = builder.build().map_err(|e| anyhow::anyhow!("{}", e))?;

        let (browser, mut handler) =
            Browser::launch(config).await.context("Failed to launch Chrome")?;

        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {
                // Process browser events
            }
        });

        tracing::info!("Browser session started (headless: {})", headless);

        Ok(Self {
            browser,
            handler_task,
            _profile_dir: profile_dir,
        })
    }

    /// Open `url` in a new tab once the page has loaded.
    pub async fn open(&self, url: &str) -> Result<Page> {
        tracing::info!("Navigating to: {}", url);
        self.browser
            .new_page(url)
            .await
            .with_context(|| format!("Failed to open {}", url))
    }

    /// Shut Chrome down so no process outlives the run.
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await.context("Failed to close Chrome")?;
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("Chrome did not exit cleanly: {}", e);
        }
        self.handler_task.abort();
        tracing::info!("Browser session closed");
        Ok(())
    }
}
