pub mod engine;
pub mod generator;
pub mod solver;

pub use crate::domain::model::{Cell, Coord, Direction, Maze, Walls};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
