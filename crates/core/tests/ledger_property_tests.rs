//! Property-based integration tests for the aggregation and selection rules.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use chrono::NaiveDate;
use ledgerbook_core::aggregator::{compute_sale_derived, compute_summary, SettlementPolicy};
use ledgerbook_core::expenses::Expense;
use ledgerbook_core::sales::Sale;
use ledgerbook_core::selection::{extract_valid_ids, SelectionPayload};
use proptest::prelude::*;
use serde_json::{json, Value};

// =============================================================================
// Generators
// =============================================================================

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(offset)
    })
}

fn arb_amount() -> impl Strategy<Value = f64> {
    (0u32..1_000_000).prop_map(|cents| f64::from(cents) / 100.0)
}

fn arb_channel() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Shopee".to_string()),
        Just("Shopee Full".to_string()),
        Just("Mercado Livre".to_string()),
        "[A-Za-z ]{0,12}",
    ]
}

fn arb_sale() -> impl Strategy<Value = Sale> {
    (
        1i64..10_000,
        arb_date(),
        arb_channel(),
        arb_amount(),
        arb_amount(),
        arb_amount(),
    )
        .prop_map(|(id, sale_date, channel, total, cost, fee)| Sale {
            id,
            sale_date,
            channel,
            category: "Kit".to_string(),
            quantity: 1,
            total_amount: total,
            product_cost: cost,
            platform_fee: fee,
            gross_profit: total - cost - fee,
            receipt_date: Some(sale_date),
        })
}

fn arb_expense() -> impl Strategy<Value = Expense> {
    (1i64..10_000, arb_date(), arb_amount()).prop_map(|(id, expense_date, amount)| Expense {
        id,
        expense_date,
        category: "Outros".to_string(),
        description: String::new(),
        amount,
    })
}

/// A selected row whose `id` cell may or may not be usable.
fn arb_selected_row() -> impl Strategy<Value = Value> {
    prop_oneof![
        (0i64..500).prop_map(|id| json!({ "id": id })),
        (0i64..500).prop_map(|id| json!({ "id": id.to_string() })),
        Just(json!({ "id": null })),
        Just(json!({ "id": "abc" })),
        Just(json!({ "other": 1 })),
        Just(json!(42)),
    ]
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Receipt lands 7 days out for marketplace channels and on the sale date otherwise.
    #[test]
    fn prop_receipt_date_follows_channel(
        sale_date in arb_date(),
        channel in arb_channel(),
        total in arb_amount(),
        cost in arb_amount(),
        fee in arb_amount(),
    ) {
        let derived = compute_sale_derived(
            &SettlementPolicy::default(), sale_date, &channel, total, cost, fee,
        );

        let expected_offset = if channel.contains("Shopee") { 7 } else { 0 };
        prop_assert_eq!(
            derived.receipt_date,
            sale_date + chrono::Duration::days(expected_offset)
        );
        prop_assert_eq!(derived.gross_profit, total - cost - fee);
    }

    /// Net profit is inflows minus every outflow.
    #[test]
    fn prop_net_profit_balances(
        sales in proptest::collection::vec(arb_sale(), 0..40),
        expenses in proptest::collection::vec(arb_expense(), 0..40),
    ) {
        let kpis = compute_summary(&sales, &expenses);

        let expected = kpis.total_sales
            - kpis.total_product_cost
            - kpis.total_platform_fees
            - kpis.total_expenses;
        prop_assert_eq!(kpis.net_profit, expected);
        prop_assert!(kpis.total_sales >= 0.0);
        prop_assert!(kpis.total_expenses >= 0.0);
    }

    /// Every extracted id came from a row, and every integer id cell is extracted.
    #[test]
    fn prop_extracted_ids_match_integer_cells(
        rows in proptest::collection::vec(arb_selected_row(), 0..30),
    ) {
        let ids = extract_valid_ids(&SelectionPayload::Records(rows.clone()));

        let expected: std::collections::BTreeSet<i64> = rows
            .iter()
            .filter_map(|row| row.get("id"))
            .filter_map(|cell| match cell {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            })
            .collect();
        prop_assert_eq!(ids, expected);
    }

    /// Column-oriented and row-oriented shapes of the same selection agree.
    #[test]
    fn prop_tabular_and_record_shapes_agree(
        ids in proptest::collection::vec(0i64..500, 0..30),
    ) {
        let tabular = json!({
            "columns": ["id", "plataforma"],
            "data": ids.iter().map(|id| json!([id, "Loja"])).collect::<Vec<_>>(),
        });
        let records: Vec<Value> = ids
            .iter()
            .map(|id| json!({ "id": id, "plataforma": "Loja" }))
            .collect();

        prop_assert_eq!(
            extract_valid_ids(&SelectionPayload::from_json(tabular)),
            extract_valid_ids(&SelectionPayload::Records(records))
        );
    }
}
