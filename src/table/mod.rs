//! Reading rows out of the price table.

pub mod extract;
pub mod poller;

use anyhow::Result;

use crate::config::FieldSlot;
use crate::page::ElementHandle;

pub use extract::RowExtractor;
pub use poller::{RowPoller, RowState};

/// Text of one field slot, given the row's cells.
///
/// A row rendered with fewer cells than the slot expects reads as empty, the
/// same as a cell that lacks the slot's element.
pub(crate) async fn read_slot<E: ElementHandle>(cells: &[E], slot: &FieldSlot) -> Result<String> {
    match cells.get(slot.cell) {
        Some(cell) => cell.child_text(&slot.selector).await,
        None => Ok(String::new()),
    }
}
