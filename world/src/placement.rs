//! Random assignment of the Wumpus, hazards and the player to caves.

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use wumpus_core::Cave;

use crate::graph::CaveGraph;

/// Number of caves reserved by a placement.
pub const RESERVED_CAVES: u32 = 6;

/// Starting layout of a cave system.
///
/// Every field names a different cave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Cave the Wumpus sleeps in.
    pub wumpus: Cave,
    /// Caves holding bottomless pits.
    pub pits: [Cave; 2],
    /// Caves holding giant bats.
    pub bats: [Cave; 2],
    /// Cave the player starts in.
    pub player: Cave,
}

impl Placement {
    /// Draws a uniformly random layout over the caves of `graph`.
    ///
    /// The caves are shuffled once and handed out in the order Wumpus, pit,
    /// pit, bat, bat, player, so no two occupants can share a cave. Returns
    /// `None` when the graph holds fewer than [`RESERVED_CAVES`] caves.
    pub fn random<R>(graph: &CaveGraph, rng: &mut R) -> Option<Self>
    where
        R: Rng + ?Sized,
    {
        let mut caves: Vec<Cave> = graph.caves().collect();
        caves.shuffle(rng);

        let wumpus = caves.pop()?;
        let pits = [caves.pop()?, caves.pop()?];
        let bats = [caves.pop()?, caves.pop()?];
        let player = caves.pop()?;

        Some(Self {
            wumpus,
            pits,
            bats,
            player,
        })
    }

    /// All six reserved caves.
    #[must_use]
    pub const fn caves(&self) -> [Cave; 6] {
        [
            self.wumpus,
            self.pits[0],
            self.pits[1],
            self.bats[0],
            self.bats[1],
            self.player,
        ]
    }

    /// Reports whether the layout fits `graph` with every occupant apart.
    #[must_use]
    pub fn fits(&self, graph: &CaveGraph) -> bool {
        let caves = self.caves();
        caves.iter().all(|cave| graph.contains(*cave))
            && caves
                .iter()
                .enumerate()
                .all(|(index, cave)| !caves[index + 1..].contains(cave))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn placements_reserve_six_distinct_caves() {
        let graph = CaveGraph::grid(4, 5);
        for seed in 0..256 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let placement = Placement::random(&graph, &mut rng).expect("twenty caves suffice");
            let distinct: BTreeSet<Cave> = placement.caves().into_iter().collect();
            assert_eq!(distinct.len(), 6, "seed {seed} produced {placement:?}");
            assert!(placement.fits(&graph));
        }
    }

    #[test]
    fn placement_is_reproducible_for_a_seed() {
        let graph = CaveGraph::grid(4, 5);
        let first = Placement::random(&graph, &mut ChaCha8Rng::seed_from_u64(7));
        let second = Placement::random(&graph, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(first, second);
    }

    #[test]
    fn every_cave_eventually_hosts_the_player() {
        let graph = CaveGraph::grid(4, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        let mut starts = BTreeSet::new();
        for _ in 0..2_000 {
            if let Some(placement) = Placement::random(&graph, &mut rng) {
                let _ = starts.insert(placement.player);
            }
        }
        assert_eq!(starts.len(), 20);
    }

    #[test]
    fn small_graphs_cannot_be_populated() {
        let graph = CaveGraph::grid(1, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(Placement::random(&graph, &mut rng).is_none());
    }

    #[test]
    fn overlapping_layout_does_not_fit() {
        let graph = CaveGraph::grid(4, 5);
        let placement = Placement {
            wumpus: Cave::new(3),
            pits: [Cave::new(4), Cave::new(5)],
            bats: [Cave::new(6), Cave::new(3)],
            player: Cave::new(1),
        };
        assert!(!placement.fits(&graph));

        let outside = Placement {
            player: Cave::new(21),
            bats: [Cave::new(6), Cave::new(7)],
            ..placement
        };
        assert!(!outside.fits(&graph));
    }
}
