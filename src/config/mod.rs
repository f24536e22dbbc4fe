pub mod cli;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::app::MazeRequest;
#[cfg(feature = "cli")]
use crate::core::generator::DEFAULT_MAX_CELLS;
#[cfg(feature = "cli")]
use crate::core::solver::SolverKind;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "maze-forge")]
#[command(about = "Generate random perfect mazes as JSON")]
pub struct CliConfig {
    #[arg(long, allow_negative_numbers = true, help = "Maze width in cells [default: 15]")]
    pub width: Option<i64>,

    #[arg(long, allow_negative_numbers = true, help = "Maze height in cells [default: 15]")]
    pub height: Option<i64>,

    #[arg(long, help = "Seed for reproducible output")]
    pub seed: Option<u64>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "maze.json")]
    pub file_name: String,

    #[arg(long, default_value_t = DEFAULT_MAX_CELLS)]
    pub max_cells: usize,

    #[arg(long, help = "Pretty-print the JSON output")]
    pub pretty: bool,

    #[arg(long, help = "Print the maze to stdout instead of writing a file")]
    pub stdout: bool,

    #[arg(
        long,
        value_enum,
        num_args = 0..=1,
        default_missing_value = "bfs",
        help = "Solve the maze and report the path length [default solver: bfs]"
    )]
    pub solve: Option<SolverKind>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn request(&self) -> MazeRequest {
        MazeRequest::new(self.width, self.height)
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn max_cells(&self) -> usize {
        self.max_cells
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn pretty(&self) -> bool {
        self.pretty
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.request().dimensions()?;
        validation::validate_positive_number("max_cells", self.max_cells, 1)?;
        if !self.stdout {
            validation::validate_path("output_path", &self.output_path)?;
            validation::validate_file_name("file_name", &self.file_name, &["json"])?;
        }
        Ok(())
    }
}
