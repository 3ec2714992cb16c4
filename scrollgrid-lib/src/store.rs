//! Append-only row storage for one load cycle.

use std::sync::Arc;

use crate::model::Row;

/// Ordered collection of loaded rows.
///
/// Rows are only appended or cleared. Every clear starts a new generation,
/// which fetches use to recognise results meant for an older load cycle.
#[derive(Debug)]
pub struct RowStore<T> {
    rows: Vec<Arc<Row<T>>>,
    generation: u64,
}

impl<T> Default for RowStore<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            generation: 0,
        }
    }
}

impl<T> RowStore<T> {
    /// Create an empty store at generation 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows to the end. Ids are not checked for uniqueness.
    pub fn append(&mut self, rows: impl IntoIterator<Item = Row<T>>) -> usize {
        let before = self.rows.len();
        self.rows.extend(rows.into_iter().map(Arc::new));
        self.rows.len() - before
    }

    /// Remove every row and advance the generation.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.generation += 1;
    }

    /// Number of loaded rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Current load cycle.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// All loaded rows in order.
    pub fn rows(&self) -> &[Arc<Row<T>>] {
        &self.rows
    }

    /// Row at `index`, if loaded.
    pub fn get(&self, index: usize) -> Option<&Arc<Row<T>>> {
        self.rows.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(start: usize, count: usize) -> Vec<Row<usize>> {
        (start..start + count)
            .map(|i| Row::new(i.to_string(), i))
            .collect()
    }

    #[test]
    fn test_len_is_sum_of_batches() {
        let mut store = RowStore::new();
        let mut expected = 0;
        for size in [10, 0, 7, 1] {
            assert_eq!(store.append(batch(expected, size)), size);
            expected += size;
            assert_eq!(store.len(), expected);
        }
        assert_eq!(store.get(16).map(|r| r.value), Some(16));
    }

    #[test]
    fn test_clear_advances_generation() {
        let mut store = RowStore::new();
        store.append(batch(0, 3));
        assert_eq!(store.generation(), 0);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.generation(), 1);

        store.append(batch(0, 2));
        assert_eq!(store.len(), 2);
        assert_eq!(store.generation(), 1);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = RowStore::new();
        store.append(batch(0, 2));
        store.append(batch(2, 2));
        let ids: Vec<_> = store.rows().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["0", "1", "2", "3"]);
    }
}
