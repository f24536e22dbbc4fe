use crate::domain::model::{Coord, Direction, Maze};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, VecDeque};

/// Path-finding strategies selectable from the CLI with `--solve <NAME>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SolverKind {
    #[default]
    #[serde(rename = "bfs")]
    #[cfg_attr(feature = "cli", value(name = "bfs"))]
    BreadthFirst,
    #[serde(rename = "dfs")]
    #[cfg_attr(feature = "cli", value(name = "dfs"))]
    DepthFirst,
    #[serde(rename = "astar")]
    #[cfg_attr(feature = "cli", value(name = "astar"))]
    AStar,
    #[serde(rename = "left-wall")]
    #[cfg_attr(feature = "cli", value(name = "left-wall"))]
    LeftWallFollower,
    #[serde(rename = "right-wall")]
    #[cfg_attr(feature = "cli", value(name = "right-wall"))]
    RightWallFollower,
}

impl SolverKind {
    pub const ALL: [SolverKind; 5] = [
        SolverKind::BreadthFirst,
        SolverKind::DepthFirst,
        SolverKind::AStar,
        SolverKind::LeftWallFollower,
        SolverKind::RightWallFollower,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SolverKind::BreadthFirst => "breadth-first search",
            SolverKind::DepthFirst => "depth-first search",
            SolverKind::AStar => "A*",
            SolverKind::LeftWallFollower => "left wall follower",
            SolverKind::RightWallFollower => "right wall follower",
        }
    }
}

/// Breadth-first search from the maze start to its end through open walls.
///
/// Returns the inclusive cell path, or `None` when the end is unreachable.
/// On a carved maze the passage graph is a tree, so this is the only simple
/// path between the two points.
pub fn solve(maze: &Maze) -> Option<Vec<Coord>> {
    shortest_path(maze, maze.start(), maze.end())
}

/// Runs the chosen solver from the maze start to its end.
///
/// The searches return a simple path. The wall followers return the walk they
/// took, dead-end detours included.
pub fn solve_with(maze: &Maze, kind: SolverKind) -> Option<Vec<Coord>> {
    let (start, end) = (maze.start(), maze.end());
    match kind {
        SolverKind::BreadthFirst => shortest_path(maze, start, end),
        SolverKind::DepthFirst => depth_first_path(maze, start, end),
        SolverKind::AStar => a_star_path(maze, start, end),
        SolverKind::LeftWallFollower => follow_wall(maze, Hand::Left, start, end),
        SolverKind::RightWallFollower => follow_wall(maze, Hand::Right, start, end),
    }
}

/// Cells already reached, indexed column-major like the maze itself.
struct Visited {
    width: usize,
    height: usize,
    seen: Vec<bool>,
}

impl Visited {
    fn new(maze: &Maze) -> Self {
        Self {
            width: maze.width(),
            height: maze.height(),
            seen: vec![false; maze.cells().len()],
        }
    }

    /// Marks `at`. Returns `false` if it was already marked or lies off the grid.
    fn insert(&mut self, at: Coord) -> bool {
        if at.x >= self.width || at.y >= self.height {
            return false;
        }
        match self.seen.get_mut(at.x * self.height + at.y) {
            Some(seen) if !*seen => {
                *seen = true;
                true
            }
            _ => false,
        }
    }

    fn contains(&self, at: Coord) -> bool {
        at.x < self.width
            && at.y < self.height
            && self
                .seen
                .get(at.x * self.height + at.y)
                .copied()
                .unwrap_or(false)
    }
}

fn rebuild_path(came_from: &HashMap<Coord, Coord>, to: Coord) -> Vec<Coord> {
    let mut path = vec![to];
    let mut cursor = to;
    while let Some(&previous) = came_from.get(&cursor) {
        path.push(previous);
        cursor = previous;
    }
    path.reverse();
    path
}

pub fn shortest_path(maze: &Maze, from: Coord, to: Coord) -> Option<Vec<Coord>> {
    maze.cell(from)?;
    maze.cell(to)?;

    let mut came_from = HashMap::new();
    let mut visited = Visited::new(maze);
    let mut queue = VecDeque::new();

    visited.insert(from);
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        if current == to {
            return Some(rebuild_path(&came_from, current));
        }

        for next in maze.open_neighbors(current) {
            if visited.insert(next) {
                came_from.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    None
}

/// Depth-first search. Cells are marked when pushed, and neighbors are pushed
/// left, bottom, right, top so that top is explored first.
pub fn depth_first_path(maze: &Maze, from: Coord, to: Coord) -> Option<Vec<Coord>> {
    const PUSH_ORDER: [Direction; 4] = [
        Direction::Left,
        Direction::Bottom,
        Direction::Right,
        Direction::Top,
    ];

    maze.cell(from)?;
    maze.cell(to)?;

    let mut came_from = HashMap::new();
    let mut visited = Visited::new(maze);
    let mut stack = vec![from];
    visited.insert(from);

    while let Some(current) = stack.pop() {
        if current == to {
            return Some(rebuild_path(&came_from, current));
        }

        for direction in PUSH_ORDER {
            if !maze.can_move(current, direction) {
                continue;
            }
            let Some(next) = direction.step(current, maze.width(), maze.height()) else {
                continue;
            };
            if visited.insert(next) {
                came_from.insert(next, current);
                stack.push(next);
            }
        }
    }

    None
}

fn manhattan(a: Coord, b: Coord) -> usize {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// A* with unit step cost and the Manhattan distance to `to` as heuristic.
/// Nodes with equal `f` leave the open set in insertion order.
pub fn a_star_path(maze: &Maze, from: Coord, to: Coord) -> Option<Vec<Coord>> {
    maze.cell(from)?;
    maze.cell(to)?;

    let mut open = BinaryHeap::new();
    let mut best_g: HashMap<Coord, usize> = HashMap::new();
    let mut came_from = HashMap::new();
    let mut closed = Visited::new(maze);
    let mut sequence: u64 = 0;

    best_g.insert(from, 0);
    open.push(Reverse((manhattan(from, to), sequence, from.x, from.y)));

    while let Some(Reverse((_, _, x, y))) = open.pop() {
        let current = Coord::new(x, y);
        if current == to {
            return Some(rebuild_path(&came_from, current));
        }
        if !closed.insert(current) {
            continue;
        }

        let g = best_g.get(&current).copied().unwrap_or(0);
        for next in maze.open_neighbors(current) {
            if closed.contains(next) {
                continue;
            }
            let tentative = g + 1;
            if best_g.get(&next).is_some_and(|&known| known <= tentative) {
                continue;
            }
            best_g.insert(next, tentative);
            came_from.insert(next, current);
            sequence += 1;
            open.push(Reverse((tentative + manhattan(next, to), sequence, next.x, next.y)));
        }
    }

    None
}

#[derive(Debug, Clone, Copy)]
enum Hand {
    Left,
    Right,
}

impl Hand {
    /// Headings to try, as quarter turns clockwise from the current one.
    fn turns(self) -> [usize; 3] {
        match self {
            Hand::Left => [3, 0, 1],
            Hand::Right => [1, 0, 3],
        }
    }
}

/// Walks with one hand on the wall, starting at `from` facing right.
///
/// Each step turns towards the hand if it can, else goes straight, else turns
/// away from the hand, else turns around in place. The walk is capped at four
/// steps per cell; on a perfect maze it reaches `to` well within that.
fn follow_wall(maze: &Maze, hand: Hand, from: Coord, to: Coord) -> Option<Vec<Coord>> {
    maze.cell(from)?;
    maze.cell(to)?;

    let mut position = from;
    let mut facing = 1;
    let mut path = vec![position];
    let budget = 4 * maze.cells().len() + 4;

    for _ in 0..budget {
        if position == to {
            return Some(path);
        }

        let heading = hand
            .turns()
            .iter()
            .map(|turn| (facing + turn) % 4)
            .find(|&heading| maze.can_move(position, Direction::ALL[heading]));

        match heading {
            Some(heading) => {
                position = Direction::ALL[heading].step(position, maze.width(), maze.height())?;
                facing = heading;
                path.push(position);
            }
            None => facing = (facing + 2) % 4,
        }
    }

    tracing::debug!("Wall follower gave up after {} steps", budget);
    (position == to).then_some(path)
}

/// Number of cells reachable from `from` through open walls, `from` included.
pub fn reachable_from(maze: &Maze, from: Coord) -> usize {
    let mut visited = Visited::new(maze);
    if maze.cell(from).is_none() || !visited.insert(from) {
        return 0;
    }

    let mut stack = vec![from];
    let mut count = 0;

    while let Some(current) = stack.pop() {
        count += 1;
        for next in maze.open_neighbors(current) {
            if visited.insert(next) {
                stack.push(next);
            }
        }
    }

    count
}
