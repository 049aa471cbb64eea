use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use super::grid::Grid;
use super::hazards::PortalPair;
use super::state::Position;

/// Random draws tried before falling back to scanning for free cells
const MAX_RANDOM_ATTEMPTS: usize = 512;

/// Places food, meteors and portals on free interior cells
#[derive(Debug, Clone, Copy)]
pub struct Spawner {
    grid: Grid,
}

impl Spawner {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// Pick a uniformly random interior cell not in `occupied`.
    ///
    /// Rejection sampling handles the sparse board; once that keeps missing,
    /// the free cells are enumerated and one is chosen directly. Returns
    /// `None` only when every interior cell is taken.
    pub fn spawn_cell<R: Rng>(&self, rng: &mut R, occupied: &HashSet<Position>) -> Option<Position> {
        if self.grid.interior_len() == 0 {
            return None;
        }

        for _ in 0..MAX_RANDOM_ATTEMPTS {
            let row = rng.gen_range(self.grid.interior_rows());
            let col = rng.gen_range(self.grid.interior_cols());
            let pos = Position::new(row, col);

            if !occupied.contains(&pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = self
            .grid
            .interior()
            .filter(|pos| !occupied.contains(pos))
            .collect();
        free.choose(rng).copied()
    }

    pub fn spawn_food<R: Rng>(&self, rng: &mut R, occupied: &HashSet<Position>) -> Option<Position> {
        self.spawn_cell(rng, occupied)
    }

    /// `count` pairwise distinct free cells, or `None` if they do not fit
    pub fn spawn_meteors<R: Rng>(
        &self,
        rng: &mut R,
        count: usize,
        occupied: &HashSet<Position>,
    ) -> Option<Vec<Position>> {
        let free = self.grid.interior_len().saturating_sub(occupied.len());
        if count > free {
            return None;
        }

        let mut taken = occupied.clone();
        let mut meteors = Vec::with_capacity(count);

        for _ in 0..count {
            let pos = self.spawn_cell(rng, &taken)?;
            taken.insert(pos);
            meteors.push(pos);
        }

        Some(meteors)
    }

    /// Two distinct free cells, the second also avoiding the first
    pub fn spawn_portal_pair<R: Rng>(
        &self,
        rng: &mut R,
        occupied: &HashSet<Position>,
    ) -> Option<PortalPair> {
        let mut taken = occupied.clone();
        let a = self.spawn_cell(rng, &taken)?;
        taken.insert(a);
        let b = self.spawn_cell(rng, &taken)?;
        PortalPair::new(a, b)
    }
}
