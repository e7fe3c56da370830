use serde_json::{Map, Value};

/// Rows selected in a table widget, in whatever shape the widget returned them.
///
/// Widgets hand selections back either column-oriented (a frame with
/// `columns` and `data`) or as a list of row objects. Anything else is kept as
/// [`SelectionPayload::Unrecognized`] so callers can still ask it for ids and
/// get none.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionPayload {
    Tabular(TabularSelection),
    Records(Vec<Value>),
    Unrecognized,
}

/// Column-oriented selection: `{"columns": [...], "data": [[...], ...]}`.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularSelection {
    pub columns: Vec<String>,
    pub data: Vec<Vec<Value>>,
}

impl TabularSelection {
    /// Capability check for the column-oriented shape.
    ///
    /// Requires a `columns` array of strings and a `data` array of arrays.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let columns = object
            .get("columns")?
            .as_array()?
            .iter()
            .map(|c| c.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()?;
        let data = object
            .get("data")?
            .as_array()?
            .iter()
            .map(|row| row.as_array().cloned())
            .collect::<Option<Vec<_>>>()?;
        Some(Self { columns, data })
    }

    /// One field mapping per row. Short rows leave trailing columns unset.
    pub fn records(&self) -> Vec<Value> {
        self.data
            .iter()
            .map(|row| {
                let record: Map<String, Value> = self
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect();
                Value::Object(record)
            })
            .collect()
    }
}

impl SelectionPayload {
    /// Resolves the payload shape. Never fails.
    pub fn from_json(value: Value) -> Self {
        if let Some(tabular) = TabularSelection::from_json(&value) {
            return SelectionPayload::Tabular(tabular);
        }
        match value {
            Value::Array(items) => SelectionPayload::Records(items),
            _ => SelectionPayload::Unrecognized,
        }
    }

    /// Parses raw JSON text; text that is not JSON is unrecognized.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str::<Value>(raw)
            .map(Self::from_json)
            .unwrap_or(SelectionPayload::Unrecognized)
    }

    /// The payload flattened to a sequence of elements, each expected to be a
    /// field mapping.
    pub fn records(&self) -> Vec<Value> {
        match self {
            SelectionPayload::Tabular(tabular) => tabular.records(),
            SelectionPayload::Records(items) => items.clone(),
            SelectionPayload::Unrecognized => Vec::new(),
        }
    }
}

impl From<Value> for SelectionPayload {
    fn from(value: Value) -> Self {
        SelectionPayload::from_json(value)
    }
}
