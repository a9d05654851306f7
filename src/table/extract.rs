use crate::config::TableLayout;
use crate::error::{Result, ScrapeError};
use crate::keywords::Keyword;
use crate::page::ElementHandle;
use crate::record::Record;

use super::read_slot;

/// Pulls the four fields out of a populated row and checks them against a keyword.
pub struct RowExtractor<'a> {
    layout: &'a TableLayout,
}

impl<'a> RowExtractor<'a> {
    pub fn new(layout: &'a TableLayout) -> Self {
        Self { layout }
    }

    /// `Some(record)` when the keyword equals the row's name or symbol.
    ///
    /// All four fields are read before comparing, so a row with an
    /// unreadable price or market cap is reported even if it would not
    /// have matched.
    pub async fn extract<E: ElementHandle>(&self, row: &E, keyword: &Keyword) -> Result<Option<Record>> {
        let layout = self.layout;
        let cells = row
            .locate_all(&layout.cell)
            .await
            .map_err(|e| ScrapeError::extraction("cells", e))?;

        let name = read_slot(&cells, &layout.name)
            .await
            .map_err(|e| ScrapeError::extraction("name", e))?
            .to_lowercase();
        let symbol = read_slot(&cells, &layout.symbol)
            .await
            .map_err(|e| ScrapeError::extraction("symbol", e))?
            .to_lowercase();
        let price = read_slot(&cells, &layout.price)
            .await
            .map_err(|e| ScrapeError::extraction("price", e))?;
        let market_cap = read_slot(&cells, &layout.market_cap)
            .await
            .map_err(|e| ScrapeError::extraction("market cap", e))?;

        tracing::debug!(name = %name, symbol = %symbol, "Scanned row");

        let keyword = keyword.as_str();
        if keyword != name && keyword != symbol {
            return Ok(None);
        }

        Ok(Some(Record {
            coin_name: name,
            coin_symbol: symbol,
            price,
            market_cap,
        }))
    }
}
