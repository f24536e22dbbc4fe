pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::{handle_request, MazeRequest};
pub use config::{cli::LocalStorage, lambda::LambdaConfig, toml_config::TomlConfig};
pub use self::core::{
    engine::MazeEngine,
    generator::{generate, generate_with_rng, GenerationLimits, MazeGenerator},
    solver::{solve, solve_with, SolverKind},
};
pub use domain::model::{Cell, Coord, Direction, Maze, MazeData, Walls};
pub use utils::error::{MazeError, Result};
