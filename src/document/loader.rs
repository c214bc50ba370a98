//! JSON loading and validation of averaged-compartment documents

use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use super::{DataType, DistanceBin, Document, PanelSet};
use crate::error::DocumentError;

/// Read and parse the document at `path`
pub fn load(path: &Path) -> Result<Document, DocumentError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| DocumentError::read(path, e))?;
    let doc = parse(&content)?;
    debug!(
        path = %path.display(),
        data_type = %doc.data_type(),
        entries = doc.entry_count(),
        "loaded document"
    );
    Ok(doc)
}

/// Parse a document from JSON text
///
/// Distance-interval order of `dist` documents follows the key order of the
/// JSON object.
pub fn parse(source: &str) -> Result<Document, DocumentError> {
    let root: Value = serde_json::from_str(source)?;
    let root = root
        .as_object()
        .ok_or_else(|| DocumentError::malformed("top-level value must be an object"))?;

    let data = root
        .get("data")
        .ok_or_else(|| DocumentError::malformed("missing 'data'"))?;
    let data_type = root
        .get("type")
        .ok_or_else(|| DocumentError::malformed("missing 'type'"))?
        .as_str()
        .ok_or_else(|| DocumentError::malformed("'type' must be a string"))?
        .parse::<DataType>()?;

    let data = data
        .as_object()
        .ok_or_else(|| DocumentError::malformed("'data' must be an object"))?;

    match data_type {
        DataType::Cis => Ok(Document::Cis(panel_set(data))),
        DataType::Trans => Ok(Document::Trans(panel_set(data))),
        DataType::Dist => {
            let bins = data
                .iter()
                .map(|(label, value)| {
                    let panels = value.as_object().ok_or_else(|| {
                        DocumentError::malformed(format!(
                            "distance interval '{}' must be an object",
                            label
                        ))
                    })?;
                    Ok(DistanceBin {
                        label: label.clone(),
                        panels: panel_set(panels),
                    })
                })
                .collect::<Result<Vec<_>, DocumentError>>()?;
            Ok(Document::Dist(bins))
        }
    }
}

fn panel_set(object: &Map<String, Value>) -> PanelSet {
    object
        .iter()
        .map(|(label, value)| (label.clone(), value.clone()))
        .collect()
}
