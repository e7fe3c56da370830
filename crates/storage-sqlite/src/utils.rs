//! Helpers for building SQLite statements over id lists.

use std::collections::BTreeSet;

/// Maximum number of bound ids per `IN (...)` clause.
///
/// SQLite caps the parameters of one statement (SQLITE_MAX_VARIABLE_NUMBER,
/// 999 on older builds). Bulk deletes are split into batches of this size.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Splits an id set into ascending batches that each fit in one statement.
pub fn id_batches(ids: &BTreeSet<i64>) -> Vec<Vec<i64>> {
    let ids: Vec<i64> = ids.iter().copied().collect();
    ids.chunks(SQLITE_MAX_PARAMS_CHUNK)
        .map(<[i64]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_has_no_batches() {
        assert!(id_batches(&BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_small_set_is_one_sorted_batch() {
        let ids: BTreeSet<i64> = [9, 3, 5].into_iter().collect();
        assert_eq!(id_batches(&ids), vec![vec![3, 5, 9]]);
    }

    #[test]
    fn test_large_set_is_split() {
        let ids: BTreeSet<i64> = (1..=1200).collect();
        let batches = id_batches(&ids);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), SQLITE_MAX_PARAMS_CHUNK);
        assert_eq!(batches[1].len(), SQLITE_MAX_PARAMS_CHUNK);
        assert_eq!(batches[2].len(), 200);
        assert_eq!(batches[2].last(), Some(&1200));
    }
}
