use serde::{Deserialize, Serialize};

/// One matched asset as it appears in the final output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub coin_name: String,
    pub coin_symbol: String,
    pub price: String,
    pub market_cap: String,
}

/// Ordered records of one run, one per keyword that matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: Vec<Record>,
}

impl ResultSet {
    pub(crate) fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when every one of `keyword_count` keywords produced a record.
    pub fn is_complete(&self, keyword_count: usize) -> bool {
        self.records.len() == keyword_count
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Serialize as a JSON array indented by a single space.
    pub fn to_json(&self) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8(buf)?)
    }
}
