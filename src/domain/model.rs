use crate::utils::error::MazeError;
use serde::{Deserialize, Serialize};

/// Grid position. `x` grows to the right, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// The four sides of a cell, in neighbor scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Top => (0, -1),
            Direction::Right => (1, 0),
            Direction::Bottom => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// The neighbor of `from` in this direction, if it lies inside a
    /// `width × height` grid.
    pub fn step(self, from: Coord, width: usize, height: usize) -> Option<Coord> {
        let (dx, dy) = self.offset();
        let x = from.x.checked_add_signed(dx)?;
        let y = from.y.checked_add_signed(dy)?;
        (x < width && y < height).then_some(Coord { x, y })
    }

    /// Direction leading from `from` to the axis-adjacent `to`.
    pub fn between(from: Coord, to: Coord) -> Option<Self> {
        if to.y == from.y && to.x + 1 == from.x {
            Some(Direction::Left)
        } else if to.y == from.y && from.x + 1 == to.x {
            Some(Direction::Right)
        } else if to.x == from.x && to.y + 1 == from.y {
            Some(Direction::Top)
        } else if to.x == from.x && from.y + 1 == to.y {
            Some(Direction::Bottom)
        } else {
            None
        }
    }
}

/// Wall configuration of a single cell. `true` means the wall is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }
}

impl Walls {
    pub fn has(&self, direction: Direction) -> bool {
        match direction {
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
        }
    }

    pub(crate) fn remove(&mut self, direction: Direction) {
        match direction {
            Direction::Top => self.top = false,
            Direction::Right => self.right = false,
            Direction::Bottom => self.bottom = false,
            Direction::Left => self.left = false,
        }
    }

    pub fn count(&self) -> usize {
        Direction::ALL.iter().filter(|d| self.has(**d)).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub walls: Walls,
}

impl Cell {
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

/// A fully carved maze. Cells are stored column-major: index `x * height + y`.
///
/// Deserialization goes through [`MazeData`] and rejects anything the
/// generator could not have produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MazeData")]
pub struct Maze {
    width: usize,
    height: usize,
    start: Coord,
    end: Coord,
    cells: Vec<Cell>,
}

impl Maze {
    /// Assembles a maze from a column-major wall grid.
    pub(crate) fn from_walls(width: usize, height: usize, walls: Vec<Walls>) -> Self {
        debug_assert_eq!(walls.len(), width * height);

        let cells = walls
            .into_iter()
            .enumerate()
            .map(|(index, walls)| Cell {
                x: index / height,
                y: index % height,
                walls,
            })
            .collect();

        Self {
            width,
            height,
            start: Coord::new(0, 0),
            end: Coord::new(width - 1, height - 1),
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn end(&self) -> Coord {
        self.end
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, at: Coord) -> Option<&Cell> {
        if at.x < self.width && at.y < self.height {
            self.cells.get(at.x * self.height + at.y)
        } else {
            None
        }
    }

    /// Whether a passage leads out of `from` towards `direction`.
    pub fn can_move(&self, from: Coord, direction: Direction) -> bool {
        match (self.cell(from), direction.step(from, self.width, self.height)) {
            (Some(cell), Some(_)) => !cell.walls.has(direction),
            _ => false,
        }
    }

    pub fn open_neighbors(&self, from: Coord) -> Vec<Coord> {
        Direction::ALL
            .iter()
            .filter(|d| self.can_move(from, **d))
            .filter_map(|d| d.step(from, self.width, self.height))
            .collect()
    }

    /// Number of removed wall pairs between adjacent cells.
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                usize::from(!cell.walls.right && cell.x + 1 < self.width)
                    + usize::from(!cell.walls.bottom && cell.y + 1 < self.height)
            })
            .sum()
    }

    fn is_connected(&self) -> bool {
        let mut seen = vec![false; self.cells.len()];
        let mut stack = vec![self.start];
        seen[0] = true;
        let mut count = 0;

        while let Some(current) = stack.pop() {
            count += 1;
            for next in self.open_neighbors(current) {
                let i = next.x * self.height + next.y;
                if !seen[i] {
                    seen[i] = true;
                    stack.push(next);
                }
            }
        }

        count == self.cells.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Unchecked wire form of a [`Maze`].
#[derive(Debug, Deserialize)]
pub struct MazeData {
    pub width: usize,
    pub height: usize,
    pub start: Coord,
    pub end: Coord,
    pub cells: Vec<Cell>,
}

impl TryFrom<MazeData> for Maze {
    type Error = MazeError;

    fn try_from(data: MazeData) -> Result<Self, Self::Error> {
        let MazeData {
            width,
            height,
            start,
            end,
            cells,
        } = data;

        if width == 0 || height == 0 {
            return Err(MazeError::invalid_maze(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let expected = width
            .checked_mul(height)
            .ok_or_else(|| MazeError::invalid_maze("width * height overflows"))?;
        if cells.len() != expected {
            return Err(MazeError::invalid_maze(format!(
                "expected {} cells, got {}",
                expected,
                cells.len()
            )));
        }

        if let Some((index, cell)) = cells
            .iter()
            .enumerate()
            .find(|(index, cell)| cell.x != index / height || cell.y != index % height)
        {
            return Err(MazeError::invalid_maze(format!(
                "cell {} is at ({}, {}), expected column-major ({}, {})",
                index,
                cell.x,
                cell.y,
                index / height,
                index % height
            )));
        }

        if start != Coord::new(0, 0) {
            return Err(MazeError::invalid_maze(format!(
                "start must be (0, 0), got ({}, {})",
                start.x, start.y
            )));
        }
        if end != Coord::new(width - 1, height - 1) {
            return Err(MazeError::invalid_maze(format!(
                "end must be ({}, {}), got ({}, {})",
                width - 1,
                height - 1,
                end.x,
                end.y
            )));
        }

        let maze = Maze {
            width,
            height,
            start,
            end,
            cells,
        };

        for cell in &maze.cells {
            let at = cell.coord();
            for direction in Direction::ALL {
                match direction.step(at, width, height) {
                    None if !cell.walls.has(direction) => {
                        return Err(MazeError::invalid_maze(format!(
                            "cell ({}, {}) is missing its {:?} boundary wall",
                            at.x, at.y, direction
                        )));
                    }
                    Some(next) => {
                        let neighbor = maze.cell(next).map(|c| c.walls.has(direction.opposite()));
                        if neighbor != Some(cell.walls.has(direction)) {
                            return Err(MazeError::invalid_maze(format!(
                                "walls between ({}, {}) and ({}, {}) do not match",
                                at.x, at.y, next.x, next.y
                            )));
                        }
                    }
                    None => {}
                }
            }
        }

        if maze.passage_count() != expected - 1 || !maze.is_connected() {
            return Err(MazeError::invalid_maze(
                "passages do not form a spanning tree over the grid",
            ));
        }

        Ok(maze)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_step_stays_in_bounds() {
        let origin = Coord::new(0, 0);
        assert_eq!(Direction::Top.step(origin, 3, 3), None);
        assert_eq!(Direction::Left.step(origin, 3, 3), None);
        assert_eq!(Direction::Right.step(origin, 3, 3), Some(Coord::new(1, 0)));
        assert_eq!(Direction::Bottom.step(origin, 3, 3), Some(Coord::new(0, 1)));
        assert_eq!(Direction::Right.step(Coord::new(2, 0), 3, 3), None);
    }

    #[test]
    fn test_direction_between_adjacent_cells() {
        let c = Coord::new(1, 1);
        assert_eq!(Direction::between(c, Coord::new(0, 1)), Some(Direction::Left));
        assert_eq!(Direction::between(c, Coord::new(2, 1)), Some(Direction::Right));
        assert_eq!(Direction::between(c, Coord::new(1, 0)), Some(Direction::Top));
        assert_eq!(Direction::between(c, Coord::new(1, 2)), Some(Direction::Bottom));
        assert_eq!(Direction::between(c, Coord::new(2, 2)), None);
        assert_eq!(Direction::between(c, c), None);
    }

    #[test]
    fn test_from_walls_is_column_major() {
        let maze = Maze::from_walls(2, 3, vec![Walls::default(); 6]);
        let coords: Vec<(usize, usize)> = maze.cells().iter().map(|c| (c.x, c.y)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(maze.end(), Coord::new(1, 2));
        assert_eq!(maze.passage_count(), 0);
    }

    #[test]
    fn test_cell_json_shape() {
        let maze = Maze::from_walls(1, 1, vec![Walls::default()]);
        let value: serde_json::Value = serde_json::from_str(&maze.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "width": 1,
                "height": 1,
                "start": {"x": 0, "y": 0},
                "end": {"x": 0, "y": 0},
                "cells": [
                    {"x": 0, "y": 0, "walls": {"top": true, "right": true, "bottom": true, "left": true}}
                ]
            })
        );
    }

    fn walls(top: bool, right: bool, bottom: bool, left: bool) -> serde_json::Value {
        serde_json::json!({"top": top, "right": right, "bottom": bottom, "left": left})
    }

    fn corridor_json() -> serde_json::Value {
        serde_json::json!({
            "width": 2,
            "height": 1,
            "start": {"x": 0, "y": 0},
            "end": {"x": 1, "y": 0},
            "cells": [
                {"x": 0, "y": 0, "walls": walls(true, false, true, true)},
                {"x": 1, "y": 0, "walls": walls(true, true, true, false)}
            ]
        })
    }

    fn rejection(value: serde_json::Value) -> String {
        serde_json::from_value::<Maze>(value)
            .expect_err("malformed maze must be rejected")
            .to_string()
    }

    #[test]
    fn test_deserialize_accepts_valid_maze() {
        let maze: Maze = serde_json::from_value(corridor_json()).unwrap();
        assert_eq!(maze.end(), Coord::new(1, 0));
        assert_eq!(maze.passage_count(), 1);
        assert!(maze.can_move(Coord::new(0, 0), Direction::Right));

        let round_trip: Maze = serde_json::from_str(&maze.to_json().unwrap()).unwrap();
        assert_eq!(round_trip, maze);
    }

    #[test]
    fn test_deserialize_rejects_wrong_cell_count() {
        let err = rejection(serde_json::json!({
            "width": 1,
            "height": 2,
            "start": {"x": 0, "y": 0},
            "end": {"x": 0, "y": 1},
            "cells": [{"x": 0, "y": 0, "walls": walls(true, true, false, true)}]
        }));
        assert!(err.contains("expected 2 cells, got 1"), "{}", err);

        let err = rejection(serde_json::json!({
            "width": 1,
            "height": 3,
            "start": {"x": 0, "y": 1},
            "end": {"x": 0, "y": 2},
            "cells": [
                {"x": 0, "y": 0, "walls": walls(true, true, false, true)},
                {"x": 0, "y": 1, "walls": walls(false, true, true, true)}
            ]
        }));
        assert!(err.contains("expected 3 cells, got 2"), "{}", err);
    }

    #[test]
    fn test_deserialize_rejects_empty_grid() {
        let err = rejection(serde_json::json!({
            "width": 0,
            "height": 0,
            "start": {"x": 0, "y": 0},
            "end": {"x": 5, "y": 5},
            "cells": []
        }));
        assert!(err.contains("dimensions must be positive"), "{}", err);
    }

    #[test]
    fn test_deserialize_rejects_misplaced_endpoints_and_cells() {
        let mut value = corridor_json();
        value["start"] = serde_json::json!({"x": 1, "y": 0});
        assert!(rejection(value).contains("start must be (0, 0)"));

        let mut value = corridor_json();
        value["end"] = serde_json::json!({"x": 0, "y": 0});
        assert!(rejection(value).contains("end must be (1, 0)"));

        let mut value = corridor_json();
        value["cells"][0]["x"] = serde_json::json!(1);
        value["cells"][1]["x"] = serde_json::json!(0);
        assert!(rejection(value).contains("column-major"));
    }

    #[test]
    fn test_deserialize_rejects_broken_walls() {
        let mut value = corridor_json();
        value["cells"][0]["walls"]["left"] = serde_json::json!(false);
        assert!(rejection(value).contains("boundary wall"));

        let mut value = corridor_json();
        value["cells"][1]["walls"]["left"] = serde_json::json!(true);
        assert!(rejection(value).contains("do not match"));

        let mut value = corridor_json();
        value["cells"][0]["walls"]["right"] = serde_json::json!(true);
        value["cells"][1]["walls"]["left"] = serde_json::json!(true);
        assert!(rejection(value).contains("spanning tree"));
    }

    #[test]
    fn test_deserialize_rejects_cycles() {
        let open = |right: bool, bottom: bool, x: usize, y: usize| {
            serde_json::json!({
                "x": x,
                "y": y,
                "walls": walls(y == 0, right, bottom, x == 0)
            })
        };
        let err = rejection(serde_json::json!({
            "width": 2,
            "height": 2,
            "start": {"x": 0, "y": 0},
            "end": {"x": 1, "y": 1},
            "cells": [open(false, false, 0, 0), open(false, true, 0, 1), open(true, false, 1, 0), open(true, true, 1, 1)]
        }));
        assert!(err.contains("spanning tree"), "{}", err);
    }
}
