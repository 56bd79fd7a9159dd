//! Flattened row index space.
//!
//! Rows of a table are the cartesian product of the table dimensions in
//! row-major order: the last dimension varies fastest. Coordinates are
//! computed from strides on demand, so the index never holds one entry per
//! row.

/// Row-major mapping between flattened row numbers and per-dimension
/// coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowIndex {
    extents: Vec<usize>,
    strides: Vec<usize>,
    len: usize,
}

impl RowIndex {
    /// Build the index space for the given dimension extents.
    ///
    /// An empty extent list describes a scalar table with a single row; any
    /// zero extent gives an empty table.
    pub fn new(extents: Vec<usize>) -> Self {
        let mut strides = vec![1usize; extents.len()];
        for i in (0..extents.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1].saturating_mul(extents[i + 1]);
        }
        let len = extents.iter().try_fold(1usize, |acc, &n| acc.checked_mul(n));
        Self {
            len: len.unwrap_or(usize::MAX),
            extents,
            strides,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.extents.len()
    }

    /// Extent of each dimension.
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Coordinates of a row, or `None` if the row is out of range.
    pub fn coords(&self, row: usize) -> Option<Vec<usize>> {
        if row >= self.len {
            return None;
        }
        Some(
            self.strides
                .iter()
                .zip(&self.extents)
                .map(|(&stride, &extent)| row / stride % extent)
                .collect(),
        )
    }

    /// Coordinate of a row along a single axis.
    pub fn coord(&self, row: usize, axis: usize) -> Option<usize> {
        if row >= self.len || axis >= self.extents.len() {
            return None;
        }
        Some(row / self.strides[axis] % self.extents[axis])
    }

    /// Flattened row number for a coordinate tuple.
    pub fn row(&self, coords: &[usize]) -> Option<usize> {
        if coords.len() != self.extents.len()
            || coords.iter().zip(&self.extents).any(|(&c, &n)| c >= n)
        {
            return None;
        }
        Some(coords.iter().zip(&self.strides).map(|(&c, &s)| c * s).sum())
    }

    /// Enumerate every row's coordinates in order.
    pub fn iter(&self) -> CartesianProduct<'_> {
        CartesianProduct {
            extents: &self.extents,
            next: if self.is_empty() {
                None
            } else {
                Some(vec![0; self.extents.len()])
            },
        }
    }
}

impl<'a> IntoIterator for &'a RowIndex {
    type Item = Vec<usize>;
    type IntoIter = CartesianProduct<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the cartesian product of dimension ranges.
#[derive(Debug, Clone)]
pub struct CartesianProduct<'a> {
    extents: &'a [usize],
    next: Option<Vec<usize>>,
}

impl Iterator for CartesianProduct<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut following = current.clone();
        // Odometer increment, last axis first.
        for axis in (0..following.len()).rev() {
            following[axis] += 1;
            if following[axis] < self.extents[axis] {
                self.next = Some(following);
                return Some(current);
            }
            following[axis] = 0;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_order() {
        let index = RowIndex::new(vec![2, 3]);
        assert_eq!(index.len(), 6);
        assert_eq!(index.coords(4), Some(vec![1, 1]));
        assert_eq!(index.coords(2), Some(vec![0, 2]));
        assert_eq!(index.coord(5, 0), Some(1));
        assert_eq!(index.coords(6), None);
    }

    #[test]
    fn test_row_inverts_coords() {
        let index = RowIndex::new(vec![3, 4, 5]);
        for row in [0, 7, 33, 59] {
            let coords = index.coords(row).unwrap();
            assert_eq!(index.row(&coords), Some(row));
        }
        assert_eq!(index.row(&[3, 0, 0]), None);
    }

    #[test]
    fn test_scalar_and_empty() {
        let scalar = RowIndex::new(vec![]);
        assert_eq!(scalar.len(), 1);
        assert_eq!(scalar.coords(0), Some(vec![]));
        assert_eq!(scalar.iter().count(), 1);

        let empty = RowIndex::new(vec![4, 0, 2]);
        assert!(empty.is_empty());
        assert_eq!(empty.iter().count(), 0);
        assert_eq!(empty.coords(0), None);
    }

    #[test]
    fn test_oversized_extents_saturate() {
        let index = RowIndex::new(vec![usize::MAX, 2, 3]);
        assert_eq!(index.len(), usize::MAX);
        assert_eq!(index.coords(5), Some(vec![0, 1, 2]));
        assert_eq!(index.coords(6), Some(vec![1, 0, 0]));
        assert_eq!(index.row(&[1, 0, 0]), Some(6));
    }

    #[test]
    fn test_iter_matches_coords() {
        let index = RowIndex::new(vec![2, 1, 3]);
        let rows: Vec<Vec<usize>> = index.iter().collect();
        assert_eq!(rows.len(), 6);
        for (row, coords) in rows.iter().enumerate() {
            assert_eq!(Some(coords.clone()), index.coords(row));
        }
        assert_eq!(rows[3], vec![1, 0, 0]);
    }
}
