//! Key-based deduplication.

use std::collections::HashMap;

/// Keep the last occurrence of every key. Survivors stay in their original
/// relative order. Returns the kept rows and the number removed.
pub fn keep_last<T, F>(rows: Vec<T>, key: F) -> (Vec<T>, usize)
where
    F: Fn(&T) -> &str,
{
    let mut last: HashMap<&str, usize> = HashMap::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        last.insert(key(row), index);
    }
    let keep: Vec<bool> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| last.get(key(row)) == Some(&index))
        .collect();
    drop(last);

    let before = rows.len();
    let kept: Vec<T> = rows
        .into_iter()
        .zip(keep)
        .filter_map(|(row, keep)| keep.then_some(row))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_occurrence_wins_in_original_order() {
        let rows = vec![("A", 1), ("B", 2), ("A", 3), ("C", 4), ("B", 5)];
        let (kept, removed) = keep_last(rows, |row| row.0);
        assert_eq!(kept, vec![("A", 3), ("C", 4), ("B", 5)]);
        assert_eq!(removed, 2);
    }

    #[test]
    fn unique_rows_are_untouched() {
        let rows = vec![("A", 1), ("B", 2)];
        let (kept, removed) = keep_last(rows.clone(), |row| row.0);
        assert_eq!(kept, rows);
        assert_eq!(removed, 0);
    }
}
