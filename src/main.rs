use clap::Parser;
use maze_forge::utils::error::ErrorSeverity;
use maze_forge::utils::{logger, validation::Validate};
use maze_forge::{solve_with, CliConfig, LocalStorage, MazeEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting maze-forge CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let (width, height) = config.request().dimensions()?;
    let to_stdout = config.stdout;
    let solver = config.solve;

    let storage = LocalStorage::new(config.output_path.clone());
    let engine = MazeEngine::new_with_monitoring(storage, config, monitor_enabled);

    let result = if to_stdout {
        engine
            .generate(width, height)
            .and_then(|maze| engine.encode(&maze).map(|json| (maze, json)))
            .map(|(maze, json)| {
                println!("{}", json);
                maze
            })
    } else {
        engine.run(width, height).await.map(|output| {
            tracing::info!("📁 Maze saved to: {}", output.output_path);
            eprintln!("✅ Maze saved to: {}", output.output_path);
            output.maze
        })
    };

    match result {
        Ok(maze) => {
            if let Some(kind) = solver {
                match solve_with(&maze, kind) {
                    Some(path) => eprintln!(
                        "🧭 {}: path from ({}, {}) to ({}, {}) visits {} cells",
                        kind.name(),
                        maze.start().x,
                        maze.start().y,
                        maze.end().x,
                        maze.end().y,
                        path.len()
                    ),
                    None => tracing::warn!("{} found no path between start and end", kind.name()),
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Maze generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
