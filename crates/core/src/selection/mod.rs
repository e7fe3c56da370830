//! Selection sanitizer - turns table selections into record identifiers.

mod sanitizer;
mod selection_model;

pub use sanitizer::{extract_valid_ids, ID_FIELD};
pub use selection_model::{SelectionPayload, TabularSelection};
