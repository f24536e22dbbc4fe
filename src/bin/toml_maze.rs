use clap::Parser;
use maze_forge::core::ConfigProvider;
use maze_forge::utils::{logger, validation::Validate};
use maze_forge::{LocalStorage, MazeEngine, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-maze")]
#[command(about = "Generate batches of mazes from a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "maze-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the number of mazes to generate
    #[arg(long)]
    count: Option<usize>,

    /// Override the seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(count) = args.count {
        config.maze.count = Some(count);
    }
    if let Some(seed) = args.seed {
        config.maze.seed = Some(seed);
    }

    let validation = config.validate();

    // RUST_LOG still wins over monitoring.log_level.
    let level = validation.as_ref().ok().and(config.log_level());
    logger::init_cli_logger_with_level(args.verbose, level);

    tracing::info!("🚀 Starting TOML-based maze generator");
    tracing::info!("📁 Loaded configuration from: {}", args.config);
    if let Some(count) = args.count {
        tracing::info!("🔧 Count overridden to: {}", count);
    }
    if let Some(seed) = args.seed {
        tracing::info!("🔧 Seed overridden to: {}", seed);
    }

    if let Err(e) = validation {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let (width, height) = config.request().dimensions()?;
    let file_names = config.batch_file_names(&chrono::Local::now());

    if args.dry_run {
        println!("🔍 Dry run - would generate {} maze(s):", file_names.len());
        println!("   Size: {}x{}", width, height);
        println!("   Max cells: {}", config.max_cells());
        match config.seed() {
            Some(seed) => println!("   Seed: {}", seed),
            None => println!("   Seed: random"),
        }
        for name in &file_names {
            println!("   → {}/{}", config.output_path(), name);
        }
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.system_stats_enabled());
    let storage = LocalStorage::new(config.output_path().to_string());
    let engine = MazeEngine::new_with_monitoring(storage, config, monitor_enabled);

    for (variant, name) in (0u64..).zip(&file_names) {
        let maze = match engine.generate_variant(width, height, variant) {
            Ok(maze) => maze,
            Err(e) => {
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(2);
            }
        };
        let path = engine.store_as(&maze, name).await?;
        tracing::info!("📁 Maze saved to: {}", path);
        println!("✅ {}", path);
    }

    tracing::info!("✅ Generated {} maze(s)", file_names.len());
    Ok(())
}
