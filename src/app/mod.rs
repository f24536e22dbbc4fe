// Application layer: request handling shared by the CLI and the lambda handler.

pub mod request;

pub use request::{handle_request, MazeRequest, DEFAULT_DIMENSION};
