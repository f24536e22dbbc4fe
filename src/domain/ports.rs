use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Settings every front end (CLI flags, TOML file, lambda environment)
/// hands to the engine.
pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn file_name(&self) -> &str;
    fn max_cells(&self) -> usize;
    fn seed(&self) -> Option<u64>;
    fn pretty(&self) -> bool;
}
