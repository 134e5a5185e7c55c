//! Edge codes and grouping tables.
//!
//! An undirected edge `{i, j}` is identified by the symmetric pairing
//! `sympaired(i, j)`, which is injective on unordered pairs of node numbers.
//! A [`TableMap`] groups the cells of a small table by value so that
//! "how many times does this code occur" questions become slice lengths.

/// Symmetric pairing of two node numbers.
///
/// `sympaired(i, j) == sympaired(j, i)` and distinct unordered pairs map to
/// distinct codes.
#[inline]
pub fn sympaired(i: usize, j: usize) -> u64 {
    let (lo, hi) = if i < j { (i as u64, j as u64) } else { (j as u64, i as u64) };
    lo + hi * hi
}

/// Codes of the three local edges of a triangle.
///
/// Local edge `l` joins `tri[l]` and `tri[(l + 1) % 3]`.
#[inline]
pub fn edge_codes(tri: &[usize; 3]) -> [u64; 3] {
    [
        sympaired(tri[0], tri[1]),
        sympaired(tri[1], tri[2]),
        sympaired(tri[2], tri[0]),
    ]
}

/// One cell of a grouped table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableEntry<V> {
    pub value: V,
    pub row: usize,
    pub col: usize,
}

/// Table cells grouped by value.
///
/// Groups are ordered by value; inside a group the cells keep their row-major
/// order in the source table.
#[derive(Clone, Debug)]
pub struct TableMap<V> {
    entries: Vec<TableEntry<V>>,
    starts: Vec<usize>,
}

impl<V: Ord + Copy> TableMap<V> {
    pub fn from_rows<const N: usize>(rows: &[[V; N]]) -> Self {
        let entries = rows
            .iter()
            .enumerate()
            .flat_map(|(row, vals)| {
                vals.iter()
                    .enumerate()
                    .map(move |(col, &value)| TableEntry { value, row, col })
            })
            .collect();
        Self::from_entries(entries)
    }

    /// Single-column table.
    pub fn from_column(values: &[V]) -> Self {
        let entries = values
            .iter()
            .enumerate()
            .map(|(row, &value)| TableEntry { value, row, col: 0 })
            .collect();
        Self::from_entries(entries)
    }

    fn from_entries(mut entries: Vec<TableEntry<V>>) -> Self {
        // stable: ties stay in row-major order
        entries.sort_by_key(|e| e.value);
        let mut starts = Vec::new();
        for (i, e) in entries.iter().enumerate() {
            if i == 0 || entries[i - 1].value != e.value {
                starts.push(i);
            }
        }
        starts.push(entries.len());
        Self { entries, starts }
    }

    /// Number of table cells.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct values.
    pub fn ngroups(&self) -> usize {
        self.starts.len() - 1
    }

    pub fn entries(&self) -> &[TableEntry<V>] {
        &self.entries
    }

    /// All groups in value order.
    pub fn groups(&self) -> impl Iterator<Item = &[TableEntry<V>]> + '_ {
        self.starts.windows(2).map(move |w| &self.entries[w[0]..w[1]])
    }

    /// Groups whose value occurs exactly `rank` times.
    pub fn at_rank(&self, rank: usize) -> impl Iterator<Item = &[TableEntry<V>]> + '_ {
        self.groups().filter(move |g| g.len() == rank)
    }

    /// Distinct values in ascending order.
    pub fn values(&self) -> Vec<V> {
        self.groups().map(|g| g[0].value).collect()
    }
}

/// Replace every value of a table by the dense rank of that value.
///
/// The smallest value becomes 0, the next distinct value 1, and so on.
pub fn norm_table<V: Ord + Copy, const N: usize>(rows: &[[V; N]]) -> Vec<[usize; N]> {
    let map = TableMap::from_rows(rows);
    let mut out = vec![[0usize; N]; rows.len()];
    for (rank, group) in map.groups().enumerate() {
        for e in group {
            out[e.row][e.col] = rank;
        }
    }
    out
}
