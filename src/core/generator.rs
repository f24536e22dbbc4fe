use crate::domain::model::{Coord, Direction, Maze, Walls};
use crate::utils::error::{MazeError, Result};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

pub const DEFAULT_MAX_CELLS: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationLimits {
    pub max_cells: usize,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

impl GenerationLimits {
    /// Rejects empty grids and grids above `max_cells`, returning the cell count.
    pub fn check(&self, width: usize, height: usize) -> Result<usize> {
        if width == 0 {
            return Err(MazeError::invalid_dimension("width", width));
        }
        if height == 0 {
            return Err(MazeError::invalid_dimension("height", height));
        }

        match width.checked_mul(height) {
            Some(cells) if cells <= self.max_cells => Ok(cells),
            _ => Err(MazeError::ResourceLimitExceeded {
                cells: width as u128 * height as u128,
                max_cells: self.max_cells,
            }),
        }
    }
}

/// Randomized depth-first maze carver.
///
/// Every call builds its own grid, stack and random source, so one generator
/// can be shared freely between request handlers.
#[derive(Debug, Clone, Default)]
pub struct MazeGenerator {
    limits: GenerationLimits,
    seed: Option<u64>,
}

impl MazeGenerator {
    pub fn new(limits: GenerationLimits) -> Self {
        Self { limits, seed: None }
    }

    /// Every maze from this generator is carved from `StdRng::seed_from_u64(seed)`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn limits(&self) -> GenerationLimits {
        self.limits
    }

    pub fn generate(&self, width: usize, height: usize) -> Result<Maze> {
        self.generate_variant(width, height, 0)
    }

    /// Like `generate`, but a seeded generator offsets its seed by `variant`
    /// so batches stay reproducible without repeating the same maze.
    pub fn generate_variant(&self, width: usize, height: usize, variant: u64) -> Result<Maze> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(variant)),
            None => StdRng::from_os_rng(),
        };
        self.generate_with_rng(width, height, &mut rng)
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<Maze> {
        let cells = self.limits.check(width, height)?;
        tracing::debug!(width, height, cells, "carving maze");

        let walls = carve(width, height, rng);
        let maze = Maze::from_walls(width, height, walls);

        tracing::debug!(passages = maze.passage_count(), "maze carved");
        Ok(maze)
    }
}

/// Generates a `width × height` maze with default limits and a fresh OS-seeded RNG.
pub fn generate(width: usize, height: usize) -> Result<Maze> {
    MazeGenerator::default().generate(width, height)
}

pub fn generate_with_rng<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Maze> {
    MazeGenerator::default().generate_with_rng(width, height, rng)
}

/// Iterative DFS over a non-empty grid. Returns the column-major wall grid.
fn carve<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Vec<Walls> {
    let total = width * height;
    let index = |c: Coord| c.x * height + c.y;

    let mut walls = vec![Walls::default(); total];
    let mut visited = vec![false; total];
    let mut stack: Vec<Coord> = Vec::with_capacity(total);
    let mut neighbors: Vec<Coord> = Vec::with_capacity(4);

    let x = rng.random_range(0..width);
    let y = rng.random_range(0..height);
    let origin = Coord::new(x, y);
    visited[index(origin)] = true;
    stack.push(origin);

    while let Some(&current) = stack.last() {
        neighbors.clear();
        neighbors.extend(
            Direction::ALL
                .iter()
                .filter_map(|d| d.step(current, width, height))
                .filter(|n| !visited[index(*n)]),
        );

        let Some(&next) = neighbors.choose(rng) else {
            stack.pop();
            continue;
        };

        remove_wall_pair(&mut walls, height, current, next);
        visited[index(next)] = true;
        stack.push(next);
    }

    walls
}

/// Clears the facing walls of two axis-adjacent cells.
fn remove_wall_pair(walls: &mut [Walls], height: usize, current: Coord, next: Coord) {
    let Some(direction) = Direction::between(current, next) else {
        return;
    };
    walls[current.x * height + current.y].remove(direction);
    walls[next.x * height + next.y].remove(direction.opposite());
}
