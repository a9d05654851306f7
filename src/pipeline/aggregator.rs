use crate::record::{Record, ResultSet};

/// Collects matched records in the order keywords were processed.
///
/// This is the only place records are appended. The run hands the finished
/// [`ResultSet`] back by value.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    records: Vec<Record>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Coarse "all found" signal: one record per keyword.
    pub fn is_complete(&self, keyword_count: usize) -> bool {
        self.records.len() == keyword_count
    }

    pub fn finish(self) -> ResultSet {
        ResultSet::from_records(self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: &str) -> Record {
        Record {
            coin_name: format!("{symbol} coin"),
            coin_symbol: symbol.into(),
            price: "$1".into(),
            market_cap: "$1B".into(),
        }
    }

    #[test]
    fn test_keeps_insertion_order() {
        let mut agg = ResultAggregator::new();
        agg.add(record("xrp"));
        agg.add(record("btc"));
        let set = agg.finish();
        let symbols: Vec<_> = set.records().iter().map(|r| r.coin_symbol.as_str()).collect();
        assert_eq!(symbols, vec!["xrp", "btc"]);
    }

    #[test]
    fn test_complete_only_when_every_keyword_matched() {
        let mut agg = ResultAggregator::new();
        assert!(agg.is_complete(0));
        assert!(!agg.is_complete(2));
        agg.add(record("btc"));
        assert!(!agg.is_complete(2));
        agg.add(record("eth"));
        assert!(agg.is_complete(2));
        assert_eq!(agg.len(), 2);
        assert!(agg.finish().is_complete(2));
    }

    #[test]
    fn test_empty_aggregator() {
        let agg = ResultAggregator::new();
        assert!(agg.is_empty());
        assert!(agg.finish().is_empty());
    }
}
