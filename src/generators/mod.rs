use rand::{SeedableRng, rngs::StdRng};

mod recur_backtrack;

pub use recur_backtrack::{break_entrance_and_exit, carve_passages};

use crate::{error::MazeError, maze::Grid, observer::MazeObserver};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Randomized recursive-backtracking maze generator. Owns its random source.
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    pub fn new(rng: StdRng) -> Self {
        Generator { rng }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        Generator::new(get_rng(seed))
    }

    /// Carves a perfect maze into `grid` starting from the top-left cell, cuts the
    /// entrance and exit, then clears the visited flags for the solver.
    pub fn generate<O: MazeObserver + ?Sized>(
        &mut self,
        grid: &mut Grid,
        observer: &mut O,
    ) -> Result<(), MazeError> {
        tracing::debug!(
            "[generate] carving {}x{} grid with {}",
            grid.cols(),
            grid.rows(),
            self
        );
        let start = grid.entrance();
        let carved = carve_passages(grid, start, &mut self.rng, observer)?;
        break_entrance_and_exit(grid, observer)?;
        grid.reset_visited();
        tracing::debug!("[generate] carved {} passages", carved);
        Ok(())
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Randomized Recursive Backtracking")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;

    #[test]
    fn test_generator_name() {
        assert_eq!(
            Generator::from_seed(Some(0)).to_string(),
            "Randomized Recursive Backtracking"
        );
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut first = Grid::new(9, 7).unwrap();
        let mut second = Grid::new(9, 7).unwrap();
        Generator::new(get_rng(Some(5)))
            .generate(&mut first, &mut NoopObserver)
            .unwrap();
        Generator::from_seed(Some(5))
            .generate(&mut second, &mut NoopObserver)
            .unwrap();
        assert_eq!(first, second);
    }
}
