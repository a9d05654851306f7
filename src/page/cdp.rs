use std::time::Duration;

use anyhow::{bail, Context, Result};
use chromiumoxide::cdp::js_protocol::runtime::CallFunctionOnReturns;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;

use super::{Edge, ElementHandle, PageSession};

/// How long `wait_for_load` waits for `document.readyState` to complete.
const LOAD_TIMEOUT: Duration = Duration::from_secs(30);
/// How long `wait_for_idle` lets the page keep loading resources.
const IDLE_TIMEOUT: Duration = Duration::from_secs(15);

/// [`PageSession`] backed by a chromiumoxide page.
pub struct CdpPage {
    page: Page,
}

impl CdpPage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }
}

impl PageSession for CdpPage {
    type Element = CdpElement;

    async fn wait_for_load(&mut self) -> Result<()> {
        let start = std::time::Instant::now();
        loop {
            let complete: bool = match self.page.evaluate("document.readyState === 'complete'").await {
                Ok(result) => result.into_value().unwrap_or(false),
                Err(_) => false,
            };
            if complete {
                return Ok(());
            }
            if start.elapsed() >= LOAD_TIMEOUT {
                bail!(
                    "Timed out after {}ms waiting for page load",
                    LOAD_TIMEOUT.as_millis()
                );
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    async fn wait_for_idle(&mut self) -> Result<()> {
        let timeout_ms = IDLE_TIMEOUT.as_millis() as u64;
        let js = format!(
            r#"(async () => {{
                const timeoutMs = {timeout_ms};
                const idleMs = 1000;
                const interval = 250;
                const start = Date.now();
                const count = () => {{
                    try {{ return performance.getEntriesByType('resource').length; }} catch (_) {{ return 0; }}
                }};
                let last = count();
                let stableMs = 0;
                while (Date.now() - start < timeoutMs) {{
                    await new Promise(r => setTimeout(r, interval));
                    const cur = count();
                    if (document.readyState === 'complete' && cur === last) {{
                        stableMs += interval;
                        if (stableMs >= idleMs) return true;
                    }} else {{
                        stableMs = 0;
                    }}
                    last = cur;
                }}
                return false;
            }})()"#,
            timeout_ms = timeout_ms
        );

        let idle: bool = self
            .page
            .evaluate(js)
            .await
            .context("Failed waiting for page idle")?
            .into_value()
            .unwrap_or(false);

        if !idle {
            tracing::warn!(
                "Page still loading after {}ms, continuing anyway",
                timeout_ms
            );
        }
        Ok(())
    }

    async fn locate(&mut self, selector: &str) -> Result<Option<CdpElement>> {
        let mut found = self
            .page
            .find_elements(selector)
            .await
            .with_context(|| format!("Failed to query {}", selector))?;
        if found.is_empty() {
            return Ok(None);
        }
        Ok(Some(CdpElement::new(found.swap_remove(0))))
    }

    async fn scroll_to(&mut self, edge: Edge) -> Result<()> {
        let js = match edge {
            Edge::Top => "window.scrollTo(0, 0)",
            Edge::Bottom => "window.scrollTo(0, document.body.scrollHeight)",
        };
        self.page
            .evaluate(js)
            .await
            .context("Failed to scroll page")?;
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }
}

/// [`ElementHandle`] backed by a chromiumoxide element.
pub struct CdpElement {
    element: Element,
}

impl CdpElement {
    fn new(element: Element) -> Self {
        Self { element }
    }

    /// Run `function` with `this` bound to the element and return its string result.
    async fn call_for_string(&self, function: String) -> Result<String> {
        let returns = self.element.call_js_fn(function, false).await?;
        Ok(string_result(returns)?.unwrap_or_default())
    }
}

fn string_result(returns: CallFunctionOnReturns) -> Result<Option<String>> {
    if let Some(exception) = returns.exception_details {
        bail!("Script threw: {}", exception.text);
    }
    Ok(returns
        .result
        .value
        .and_then(|v| v.as_str().map(str::to_string)))
}

impl ElementHandle for CdpElement {
    async fn locate_all(&self, selector: &str) -> Result<Vec<Self>> {
        let elements = self
            .element
            .find_elements(selector)
            .await
            .with_context(|| format!("Failed to query {}", selector))?;
        Ok(elements.into_iter().map(CdpElement::new).collect())
    }

    async fn child_text(&self, selector: &str) -> Result<String> {
        let js = format!(
            r#"function() {{
                const child = this.querySelector({sel});
                return child ? child.innerText : "";
            }}"#,
            sel = serde_json::to_string(selector)?
        );
        self.call_for_string(js)
            .await
            .with_context(|| format!("Failed to read text of {}", selector))
    }

    async fn read_text(&self) -> Result<String> {
        let js = r#"function() {
            if (this instanceof HTMLInputElement || this instanceof HTMLTextAreaElement) {
                return this.value;
            }
            return this.innerText || "";
        }"#;
        self.call_for_string(js.to_string())
            .await
            .context("Failed to read element text")
    }

    async fn set_value(&self, text: &str) -> Result<()> {
        let js = format!(
            r#"function() {{
                const text = {text};
                this.focus();
                const setter = Object.getOwnPropertyDescriptor(
                    Object.getPrototypeOf(this), 'value'
                )?.set;
                if (setter) {{
                    setter.call(this, text);
                }} else {{
                    this.value = text;
                }}
                this.dispatchEvent(new Event('input', {{ bubbles: true }}));
                this.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return "";
            }}"#,
            text = serde_json::to_string(text)?
        );
        self.call_for_string(js)
            .await
            .context("Failed to set element value")?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.set_value("").await.context("Failed to clear element")
    }

    async fn inner_html(&self) -> Result<String> {
        Ok(self
            .element
            .inner_html()
            .await
            .context("Failed to read element HTML")?
            .unwrap_or_default())
    }
}
