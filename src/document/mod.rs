//! Input document model
//!
//! An averaged-compartment document is a JSON object with a `type`
//! discriminator and a `data` mapping of labeled matrices. The shape of
//! `data` depends on the type:
//!
//! - `cis`: the five pentad labels mapped to matrices
//! - `trans`: `A`, `B` and `AB` mapped to matrices
//! - `dist`: distance-interval labels, in document order, each mapped to an
//!   `A`/`B`/`AB` set of matrices
//!
//! Entries stay raw JSON until a layout template places them; only the
//! matrices that are drawn get validated.

pub mod loader;
pub mod matrix;

pub use loader::{load, parse};
pub use matrix::Matrix;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::DocumentError;

/// Labels of a `cis` document
pub const CIS_LABELS: [&str; 5] = [
    "Short-range A",
    "Short-range B",
    "Long-range A",
    "Long-range B",
    "Between A and B",
];

/// Labels of a `trans` document and of each `dist` interval
pub const COMPARTMENT_LABELS: [&str; 3] = ["A", "B", "AB"];

/// The `type` discriminator of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Cis,
    Trans,
    Dist,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Cis => "cis",
            DataType::Trans => "trans",
            DataType::Dist => "dist",
        }
    }
}

impl FromStr for DataType {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cis" => Ok(DataType::Cis),
            "trans" => Ok(DataType::Trans),
            "dist" => Ok(DataType::Dist),
            other => Err(DocumentError::UnknownDataType(other.to_string())),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw JSON entries keyed by panel label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelSet {
    entries: BTreeMap<String, Value>,
}

impl PanelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, value: Value) {
        self.entries.insert(label.into(), value);
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.entries.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for PanelSet {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One distance interval of a `dist` document
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceBin {
    pub label: String,
    pub panels: PanelSet,
}

/// A loaded averaged-compartment document
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Cis(PanelSet),
    Trans(PanelSet),
    /// Distance intervals in document order
    Dist(Vec<DistanceBin>),
}

impl Document {
    pub fn data_type(&self) -> DataType {
        match self {
            Document::Cis(_) => DataType::Cis,
            Document::Trans(_) => DataType::Trans,
            Document::Dist(_) => DataType::Dist,
        }
    }

    /// Total number of labeled entries in the document
    pub fn entry_count(&self) -> usize {
        match self {
            Document::Cis(panels) | Document::Trans(panels) => panels.len(),
            Document::Dist(bins) => bins.iter().map(|b| b.panels.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_type_roundtrip() {
        for ty in [DataType::Cis, DataType::Trans, DataType::Dist] {
            assert_eq!(ty.as_str().parse::<DataType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_data_type_is_case_sensitive() {
        let err = "CIS".parse::<DataType>().unwrap_err();
        assert!(matches!(err, DocumentError::UnknownDataType(ref t) if t == "CIS"));
    }

    #[test]
    fn test_entry_count() {
        let panels: PanelSet = COMPARTMENT_LABELS
            .iter()
            .map(|l| (l.to_string(), json!([[1.0]])))
            .collect();
        let doc = Document::Dist(vec![
            DistanceBin {
                label: "0-1Mb".to_string(),
                panels: panels.clone(),
            },
            DistanceBin {
                label: "1-2Mb".to_string(),
                panels,
            },
        ]);
        assert_eq!(doc.data_type(), DataType::Dist);
        assert_eq!(doc.entry_count(), 6);
    }
}
