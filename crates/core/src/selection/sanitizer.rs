use std::collections::BTreeSet;

use log::debug;
use serde_json::Value;

use super::selection_model::SelectionPayload;

/// Field that carries the record identifier in each selected row.
pub const ID_FIELD: &str = "id";

/// Extracts the record ids from a table selection.
///
/// Elements that are not field mappings, have no `id`, or whose `id` is not an
/// integer are skipped. Duplicates collapse. Never fails.
pub fn extract_valid_ids(selection: &SelectionPayload) -> BTreeSet<i64> {
    let mut ids = BTreeSet::new();
    let mut skipped = 0usize;

    for element in selection.records() {
        match element
            .as_object()
            .and_then(|record| record.get(ID_FIELD))
            .and_then(id_from_value)
        {
            Some(id) => {
                ids.insert(id);
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} selected rows without a usable id", skipped);
    }
    ids
}

/// Integer view of an `id` cell.
///
/// Accepts JSON integers, floats with no fractional part (numeric columns
/// often come back as floats) and strings holding an integer. A float with a
/// fractional part such as `4.5` is skipped rather than truncated to 4, so a
/// damaged cell can never select a different row for deletion.
fn id_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(value: Value) -> Vec<i64> {
        extract_valid_ids(&SelectionPayload::from_json(value))
            .into_iter()
            .collect()
    }

    #[test]
    fn test_mixed_records_collapse_to_valid_ids() {
        let selection = json!([
            {"id": "3"},
            {"id": null},
            {"notid": 5},
            {"id": 3}
        ]);
        assert_eq!(ids(selection), vec![3]);
    }

    #[test]
    fn test_tabular_selection() {
        let selection = json!({
            "columns": ["id", "data_venda", "plataforma"],
            "data": [
                [7, "2024-01-02", "Shopee"],
                [2, "2024-01-03", "WhatsApp"],
                ["x", "2024-01-04", "WhatsApp"]
            ]
        });
        assert_eq!(ids(selection), vec![2, 7]);
    }

    #[test]
    fn test_tabular_selection_without_id_column() {
        let selection = json!({
            "columns": ["plataforma"],
            "data": [["Shopee"]]
        });
        assert!(ids(selection).is_empty());
    }

    #[test]
    fn test_numeric_variants() {
        let selection = json!([
            {"id": 4.0},
            {"id": 4.5},
            {"id": " 12 "},
            {"id": "12.0"},
            {"id": true},
            {"id": [1]},
            {"id": -1}
        ]);
        assert_eq!(ids(selection), vec![-1, 4, 12]);
    }

    #[test]
    fn test_fractional_id_is_not_truncated() {
        assert!(ids(json!([{"id": 4.5}, {"id": "4.5"}])).is_empty());
    }

    #[test]
    fn test_non_mapping_elements_are_skipped() {
        let selection = json!([1, "2", null, [{"id": 3}], {"id": 9}]);
        assert_eq!(ids(selection), vec![9]);
    }

    #[test]
    fn test_unrecognized_shapes_yield_nothing() {
        assert!(ids(json!(null)).is_empty());
        assert!(ids(json!(42)).is_empty());
        assert!(ids(json!("id")).is_empty());
        assert!(ids(json!({"id": 3})).is_empty());
        assert!(ids(json!({"columns": "id", "data": []})).is_empty());
    }

    #[test]
    fn test_parse_rejects_invalid_json_quietly() {
        let payload = SelectionPayload::parse("[{\"id\": 1},");
        assert_eq!(payload, SelectionPayload::Unrecognized);
        assert!(extract_valid_ids(&payload).is_empty());
    }

    #[test]
    fn test_parse_records() {
        let payload = SelectionPayload::parse(r#"[{"id": 1}, {"id": "2"}]"#);
        assert!(matches!(payload, SelectionPayload::Records(_)));
        assert_eq!(
            extract_valid_ids(&payload).into_iter().collect::<Vec<_>>(),
            vec![1, 2]
        );
    }
}
