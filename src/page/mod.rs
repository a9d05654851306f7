#![allow(async_fn_in_trait)]

pub mod cdp;

use anyhow::Result;

pub use cdp::{CdpElement, CdpPage};

/// Which end of the page to scroll to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

/// The live page the scraper drives.
///
/// Every call takes `&mut self`: the page is shared mutable state that also
/// re-renders on its own, so there is exactly one accessor issuing one
/// command at a time.
pub trait PageSession {
    type Element: ElementHandle;

    /// Block until the document has finished loading.
    async fn wait_for_load(&mut self) -> Result<()>;

    /// Block until the page stops pulling in resources.
    async fn wait_for_idle(&mut self) -> Result<()>;

    /// First element matching `selector`, or `None` if there is none.
    async fn locate(&mut self, selector: &str) -> Result<Option<Self::Element>>;

    async fn scroll_to(&mut self, edge: Edge) -> Result<()>;

    async fn current_url(&mut self) -> Result<String>;
}

/// A handle to one rendered element. Handles go stale as soon as the page
/// re-renders the subtree they point into.
pub trait ElementHandle: Sized {
    /// All descendants matching `selector`, in document order.
    async fn locate_all(&self, selector: &str) -> Result<Vec<Self>>;

    /// Rendered text of the first descendant matching `selector`.
    ///
    /// Resolves to an empty string when no descendant matches; only a failed
    /// query is an error.
    async fn child_text(&self, selector: &str) -> Result<String>;

    /// Current value for form fields, rendered text for everything else.
    async fn read_text(&self) -> Result<String>;

    /// Replace the element's value as if the user had typed it.
    async fn set_value(&self, text: &str) -> Result<()>;

    async fn clear(&self) -> Result<()>;

    /// Inner HTML, for diagnostics only.
    async fn inner_html(&self) -> Result<String>;
}
