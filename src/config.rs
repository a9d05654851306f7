use std::time::Duration;

/// Page the scraper targets unless `--url` says otherwise.
pub const DEFAULT_URL: &str = "https://www.coindesk.com/price";

/// Where things live inside the price table.
#[derive(Debug, Clone)]
pub struct TableLayout {
    pub search_input: String,
    pub row_container: String,
    pub row: String,
    pub cell: String,
    pub name: FieldSlot,
    pub symbol: FieldSlot,
    pub price: FieldSlot,
    pub market_cap: FieldSlot,
}

/// A text node at `selector` inside the row's `cell`-th cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSlot {
    pub cell: usize,
    pub selector: String,
}

impl FieldSlot {
    pub fn new(cell: usize, selector: impl Into<String>) -> Self {
        Self {
            cell,
            selector: selector.into(),
        }
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            search_input: r#"input[data-slot="input"]"#.into(),
            row_container: "table tbody".into(),
            row: ".tr".into(),
            cell: ".td".into(),
            name: FieldSlot::new(1, "h5"),
            symbol: FieldSlot::new(1, "span"),
            price: FieldSlot::new(3, "h5"),
            market_cap: FieldSlot::new(6, "h5"),
        }
    }
}

/// Timing of the per-row stabilization wait.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Sleep before every read of the name field.
    pub interval: Duration,
    /// Extra sleep after a read came back empty.
    pub empty_backoff: Duration,
    /// Hard limit for the whole wait.
    pub deadline: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(500),
            empty_backoff: Duration::from_secs(2),
            deadline: Duration::from_secs(10),
        }
    }
}

/// Fixed pauses that give the page time to react to input.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// After typing a keyword, before looking up the table.
    pub search_settle: Duration,
    /// After the page reports loaded, before enumerating rows.
    pub render_wait: Duration,
    /// After scanning a keyword's rows, and again after clearing the input.
    pub between_keywords: Duration,
    /// While the page sits scrolled to the bottom during priming.
    pub prime_pause: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            search_settle: Duration::from_secs(2),
            render_wait: Duration::from_secs(2),
            between_keywords: Duration::from_millis(500),
            prime_pause: Duration::from_secs(2),
        }
    }
}

impl Pacing {
    /// No pauses at all. Handy for fakes that render synchronously.
    pub fn immediate() -> Self {
        Self {
            search_settle: Duration::ZERO,
            render_wait: Duration::ZERO,
            between_keywords: Duration::ZERO,
            prime_pause: Duration::ZERO,
        }
    }
}

/// What to do when a row's fields cannot be read at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedRowPolicy {
    /// Give up on the current keyword and move on to the next one.
    #[default]
    SkipKeyword,
    /// Stop the whole run with the extraction error.
    Abort,
}

/// Everything a run needs besides the keywords.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub url: String,
    pub headless: bool,
    pub layout: TableLayout,
    pub poll: PollConfig,
    pub pacing: Pacing,
    pub malformed_rows: MalformedRowPolicy,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.into(),
            headless: true,
            layout: TableLayout::default(),
            poll: PollConfig::default(),
            pacing: Pacing::default(),
            malformed_rows: MalformedRowPolicy::default(),
        }
    }
}
