use alloc::vec::Vec;

/// Sparse table answering range-minimum queries in constant time.
///
/// The input is copied at construction, so later changes to the source
/// slice have no effect on query results.
/// See <https://cp-algorithms.com/data_structures/sparse-table.html>.
#[derive(Debug, Clone)]
pub struct RangeMinQuery<T> {
    /// `table[depth][i]` is the minimum of `data[i..i + 2^depth]`.
    table: Vec<Vec<T>>,
}

impl<T: Ord + Clone> RangeMinQuery<T> {
    /// Build the sparse table. O(n log n) time and space.
    pub fn new(data: &[T]) -> Self {
        let len = data.len();
        let levels = if len == 0 { 1 } else { len.ilog2() as usize + 1 };
        let mut table: Vec<Vec<T>> = Vec::with_capacity(levels);
        table.push(data.to_vec());

        for depth in 1..levels {
            let half = 1usize << (depth - 1);
            let prev = &table[depth - 1];
            let row: Vec<T> = (0..=len - (1usize << depth))
                .map(|i| core::cmp::min(&prev[i], &prev[i + half]).clone())
                .collect();
            table.push(row);
        }

        Self { table }
    }

    /// Number of elements covered.
    pub fn len(&self) -> usize {
        self.table[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.table[0].is_empty()
    }

    /// Minimum of the half-open range `[start, stop)`.
    ///
    /// Returns `None` (positive infinity) when the range is empty.
    ///
    /// # Panics
    /// Panics if `stop > len()` and the range is non-empty.
    pub fn query(&self, start: usize, stop: usize) -> Option<&T> {
        if start >= stop {
            return None;
        }
        let depth = (stop - start).ilog2() as usize;
        let row = &self.table[depth];
        Some(core::cmp::min(&row[start], &row[stop - (1usize << depth)]))
    }
}
