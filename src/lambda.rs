use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use maze_forge::utils::logger;
use maze_forge::utils::validation::Validate;
use maze_forge::{handle_request, LambdaConfig, Maze, MazeGenerator, MazeRequest};
use serde_json::Value;

async fn function_handler(
    event: LambdaEvent<Value>,
    generator: &MazeGenerator,
) -> Result<Maze, Error> {
    tracing::info!("Handling generate-maze request {}", event.context.request_id);

    let request = MazeRequest::from_json_value(&event.payload).map_err(|e| {
        tracing::warn!("Rejected request: {}", e);
        Box::new(e) as Box<dyn std::error::Error + Send + Sync>
    })?;

    let maze = handle_request(&request, generator).map_err(|e| {
        tracing::warn!(
            "Maze generation failed: {} (Category: {:?})",
            e,
            e.category()
        );
        Box::new(e) as Box<dyn std::error::Error + Send + Sync>
    })?;

    tracing::info!(
        "Generated {}x{} maze with {} cells",
        maze.width(),
        maze.height(),
        maze.cells().len()
    );
    Ok(maze)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = LambdaConfig::from_env()?;
    config.validate()?;
    let generator = config.generator();
    let generator = &generator;

    run(service_fn(move |event| async move {
        function_handler(event, generator).await
    }))
    .await
}
