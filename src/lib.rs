pub mod browser;
pub mod config;
pub mod error;
pub mod keywords;
pub mod page;
pub mod pipeline;
pub mod record;
pub mod table;

pub use config::ScrapeConfig;
pub use error::ScrapeError;
pub use keywords::{parse_keywords, Keyword};
pub use record::{Record, ResultSet};
