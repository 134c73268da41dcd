//! Static cave connectivity derived from a rectangular grid.

use wumpus_core::Cave;

/// Immutable adjacency table for every cave in the system.
///
/// Caves are numbered row by row starting from one. Each cave connects to
/// the caves directly above, below, left and right of it; edges never wrap
/// around the grid. Neighbour lists keep that up, down, left, right order so
/// perceptions and shot validation enumerate them deterministically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaveGraph {
    rows: u32,
    columns: u32,
    adjacency: Vec<Vec<Cave>>,
}

impl CaveGraph {
    /// Builds the adjacency table for a `rows` by `columns` grid.
    #[must_use]
    pub fn grid(rows: u32, columns: u32) -> Self {
        let count = rows.saturating_mul(columns);
        let mut adjacency = Vec::with_capacity(usize::try_from(count).unwrap_or(0));

        for index in 1..=count {
            let row = (index - 1) / columns;
            let column = (index - 1) % columns;
            let mut neighbors = Vec::with_capacity(4);

            if row > 0 {
                neighbors.push(Cave::new(index - columns));
            }
            if row + 1 < rows {
                neighbors.push(Cave::new(index + columns));
            }
            if column > 0 {
                neighbors.push(Cave::new(index - 1));
            }
            if column + 1 < columns {
                neighbors.push(Cave::new(index + 1));
            }

            adjacency.push(neighbors);
        }

        Self {
            rows,
            columns,
            adjacency,
        }
    }

    /// Number of grid rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of grid columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of caves.
    #[must_use]
    pub fn cave_count(&self) -> u32 {
        self.rows.saturating_mul(self.columns)
    }

    /// Iterator over every cave in ascending order.
    pub fn caves(&self) -> impl Iterator<Item = Cave> {
        (1..=self.cave_count()).map(Cave::new)
    }

    /// Reports whether the cave exists.
    #[must_use]
    pub fn contains(&self, cave: Cave) -> bool {
        self.index(cave).is_some()
    }

    /// Neighbours of `cave`, empty for caves outside the graph.
    #[must_use]
    pub fn neighbors(&self, cave: Cave) -> &[Cave] {
        self.index(cave)
            .and_then(|index| self.adjacency.get(index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Reports whether a tunnel connects the two caves.
    #[must_use]
    pub fn are_adjacent(&self, from: Cave, to: Cave) -> bool {
        self.neighbors(from).contains(&to)
    }

    fn index(&self, cave: Cave) -> Option<usize> {
        let zero_based = cave.get().checked_sub(1)?;
        let index = usize::try_from(zero_based).ok()?;
        (index < self.adjacency.len()).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caves(values: &[u32]) -> Vec<Cave> {
        values.iter().copied().map(Cave::new).collect()
    }

    #[test]
    fn default_grid_holds_twenty_caves() {
        let graph = CaveGraph::grid(4, 5);
        assert_eq!(graph.cave_count(), 20);
        assert_eq!(graph.caves().count(), 20);
        assert!(graph.contains(Cave::new(1)));
        assert!(graph.contains(Cave::new(20)));
        assert!(!graph.contains(Cave::new(0)));
        assert!(!graph.contains(Cave::new(21)));
    }

    #[test]
    fn neighbors_follow_up_down_left_right_order() {
        let graph = CaveGraph::grid(4, 5);
        assert_eq!(graph.neighbors(Cave::new(6)), caves(&[1, 11, 7]).as_slice());
        assert_eq!(graph.neighbors(Cave::new(7)), caves(&[2, 12, 6, 8]).as_slice());
        assert_eq!(graph.neighbors(Cave::new(1)), caves(&[6, 2]).as_slice());
        assert_eq!(graph.neighbors(Cave::new(20)), caves(&[15, 19]).as_slice());
    }

    #[test]
    fn edges_do_not_wrap_between_rows() {
        let graph = CaveGraph::grid(4, 5);
        assert!(!graph.are_adjacent(Cave::new(5), Cave::new(6)));
        assert!(!graph.are_adjacent(Cave::new(6), Cave::new(5)));
        assert!(!graph.are_adjacent(Cave::new(1), Cave::new(16)));
    }

    #[test]
    fn adjacency_is_symmetric() {
        let graph = CaveGraph::grid(4, 5);
        for cave in graph.caves() {
            for &neighbor in graph.neighbors(cave) {
                assert!(
                    graph.are_adjacent(neighbor, cave),
                    "{neighbor} lists no tunnel back to {cave}"
                );
            }
        }
    }

    #[test]
    fn unknown_caves_have_no_neighbors() {
        let graph = CaveGraph::grid(4, 5);
        assert!(graph.neighbors(Cave::new(0)).is_empty());
        assert!(graph.neighbors(Cave::new(42)).is_empty());
    }

    #[test]
    fn empty_grid_has_no_caves() {
        let graph = CaveGraph::grid(0, 5);
        assert_eq!(graph.cave_count(), 0);
        assert!(graph.neighbors(Cave::new(1)).is_empty());
    }
}
