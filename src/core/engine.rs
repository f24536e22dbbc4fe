use crate::core::generator::{GenerationLimits, MazeGenerator};
use crate::core::{ConfigProvider, Storage};
use crate::domain::model::Maze;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub maze: Maze,
    pub output_path: String,
}

pub struct MazeEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    generator: MazeGenerator,
    monitor: SystemMonitor,
}

impl<S: Storage, C: ConfigProvider> MazeEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::new_with_monitoring(storage, config, false)
    }

    pub fn new_with_monitoring(storage: S, config: C, monitor_enabled: bool) -> Self {
        let limits = GenerationLimits {
            max_cells: config.max_cells(),
        };
        let generator = match config.seed() {
            Some(seed) => MazeGenerator::new(limits).with_seed(seed),
            None => MazeGenerator::new(limits),
        };

        Self {
            storage,
            config,
            generator,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn generate(&self, width: usize, height: usize) -> Result<Maze> {
        self.generate_variant(width, height, 0)
    }

    /// Generates the `variant`-th maze of a batch.
    pub fn generate_variant(&self, width: usize, height: usize, variant: u64) -> Result<Maze> {
        self.monitor.log_stats("Before generation");
        let maze = self.generator.generate_variant(width, height, variant)?;
        tracing::info!(
            "🧩 Generated {}x{} maze with {} passages",
            maze.width(),
            maze.height(),
            maze.passage_count()
        );
        self.monitor.log_stats("After generation");
        Ok(maze)
    }

    pub fn encode(&self, maze: &Maze) -> Result<String> {
        let json = if self.config.pretty() {
            maze.to_json_pretty()?
        } else {
            maze.to_json()?
        };
        Ok(json)
    }

    /// Writes the maze JSON under `file_name` and returns the full output path.
    pub async fn store_as(&self, maze: &Maze, file_name: &str) -> Result<String> {
        let json = self.encode(maze)?;
        self.storage.write_file(file_name, json.as_bytes()).await?;

        let output_path = Path::new(self.config.output_path())
            .join(file_name)
            .to_string_lossy()
            .into_owned();
        tracing::debug!("Wrote {} bytes to {}", json.len(), output_path);
        Ok(output_path)
    }

    pub async fn store(&self, maze: &Maze) -> Result<String> {
        self.store_as(maze, self.config.file_name()).await
    }

    pub async fn run(&self, width: usize, height: usize) -> Result<RunOutput> {
        let maze = self.generate(width, height)?;
        let output_path = self.store(&maze).await?;
        self.monitor.log_final_stats();
        Ok(RunOutput { maze, output_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::MazeError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                MazeError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        max_cells: usize,
        seed: Option<u64>,
        pretty: bool,
    }

    impl ConfigProvider for TestConfig {
        fn output_path(&self) -> &str {
            "mem"
        }

        fn file_name(&self) -> &str {
            "maze.json"
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

    #[tokio::test]
    async fn test_run_writes_maze_json() {
        let storage = MockStorage::new();
        let config = TestConfig {
            max_cells: 1_000,
            seed: Some(5),
            pretty: false,
        };
        let engine = MazeEngine::new(storage.clone(), config);

        let output = engine.run(4, 3).await.unwrap();
        assert_eq!(output.output_path, Path::new("mem").join("maze.json").to_string_lossy());

        let bytes = storage.get_file("maze.json").await.unwrap();
        let stored: Maze = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(stored, output.maze);
        assert_eq!(storage.read_file("maze.json").await.unwrap(), bytes);
    }

    #[tokio::test]
    async fn test_seeded_engine_matches_seeded_generator() {
        let config = TestConfig {
            max_cells: 1_000,
            seed: Some(11),
            pretty: true,
        };
        let engine = MazeEngine::new(MockStorage::new(), config);
        let expected = MazeGenerator::default().with_seed(11).generate(8, 8).unwrap();
        assert_eq!(engine.generate(8, 8).unwrap(), expected);
        assert!(engine.encode(&expected).unwrap().contains('\n'));
    }

    #[tokio::test]
    async fn test_engine_enforces_cell_limit() {
        let storage = MockStorage::new();
        let config = TestConfig {
            max_cells: 10,
            seed: None,
            pretty: false,
        };
        let engine = MazeEngine::new(storage.clone(), config);

        let err = engine.run(5, 5).await.unwrap_err();
        assert!(matches!(err, MazeError::ResourceLimitExceeded { cells: 25, max_cells: 10 }));
        assert!(storage.get_file("maze.json").await.is_none());
    }
}
