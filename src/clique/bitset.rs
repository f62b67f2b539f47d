use fixedbitset::FixedBitSet;

/// Dense per-vertex adjacency bitsets over an index space `0..n`.
///
/// Every row has capacity `n`, so any two bitsets produced from the same
/// adjacency combine word by word.
pub(crate) struct BitsetAdjacency {
    rows: Vec<FixedBitSet>,
    n: usize,
}

impl BitsetAdjacency {
    pub(crate) fn from_adjacency(adj: &[Vec<usize>]) -> Self {
        let n = adj.len();
        let rows = adj
            .iter()
            .map(|neighbors| {
                let mut row = FixedBitSet::with_capacity(n);
                for &v in neighbors {
                    row.insert(v);
                }
                row
            })
            .collect();
        BitsetAdjacency { rows, n }
    }

    /// Neighbor set of `v`.
    #[inline]
    pub(crate) fn row(&self, v: usize) -> &FixedBitSet {
        &self.rows[v]
    }

    /// An empty set sized for this index space.
    pub(crate) fn empty_set(&self) -> FixedBitSet {
        FixedBitSet::with_capacity(self.n)
    }

    #[allow(dead_code)]
    #[inline]
    pub(crate) fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.rows[u].contains(v)
    }
}

/// `|a ∩ b|` without allocating.
#[inline]
pub(crate) fn intersection_count(a: &FixedBitSet, b: &FixedBitSet) -> usize {
    a.intersection(b).count()
}

/// `a ∩ b` as a fresh set.
#[inline]
pub(crate) fn intersect(a: &FixedBitSet, b: &FixedBitSet) -> FixedBitSet {
    let mut res = a.clone();
    res.intersect_with(b);
    res
}

#[inline]
pub(crate) fn is_empty(set: &FixedBitSet) -> bool {
    set.count_ones(..) == 0
}
