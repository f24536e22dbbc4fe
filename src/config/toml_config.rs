use crate::app::MazeRequest;
use crate::core::generator::DEFAULT_MAX_CELLS;
use crate::core::ConfigProvider;
use crate::utils::error::{MazeError, Result};
use crate::utils::validation::{self, Validate};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_FILE_NAME: &str = "maze.json";
pub const MAX_BATCH_COUNT: usize = 1_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub maze: MazeSection,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MazeSection {
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub count: Option<usize>,
    pub seed: Option<u64>,
    pub max_cells: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub file_name: Option<String>,
    pub pretty: Option<bool>,
    pub timestamped: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    pub system_stats: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MazeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MazeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MAZE_SEED})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MazeError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        self.request().dimensions()?;

        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_file_name("output.file_name", self.file_name(), &["json"])?;
        validation::validate_positive_number("maze.max_cells", self.max_cells(), 1)?;
        validation::validate_range("maze.count", self.count(), 1, MAX_BATCH_COUNT)?;

        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(MazeError::InvalidConfigValueError {
                    field: "monitoring.log_level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }

        Ok(())
    }

    pub fn request(&self) -> MazeRequest {
        MazeRequest::new(self.maze.width, self.maze.height)
    }

    /// 取得生成數量
    pub fn count(&self) -> usize {
        self.maze.count.unwrap_or(1)
    }

    pub fn is_timestamped(&self) -> bool {
        self.output.timestamped.unwrap_or(false)
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn system_stats_enabled(&self) -> bool {
        self.monitoring
            .as_ref()
            .map(|m| m.enabled && m.system_stats.unwrap_or(true))
            .unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }

    /// File names for one batch run. A single untimestamped maze keeps the
    /// configured name; otherwise the stem gets a timestamp and/or an index.
    pub fn batch_file_names<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<String>
    where
        Tz::Offset: std::fmt::Display,
    {
        let file_name = self.file_name();
        let count = self.count();
        if count == 1 && !self.is_timestamped() {
            return vec![file_name.to_string()];
        }

        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("maze");
        let prefix = if self.is_timestamped() {
            format!("{}_{}", stem, now.format("%Y%m%d_%H%M%S"))
        } else {
            stem.to_string()
        };

        if count == 1 {
            return vec![format!("{}.json", prefix)];
        }
        (1..=count)
            .map(|i| format!("{}_{:03}.json", prefix, i))
            .collect()
    }
}

impl ConfigProvider for TomlConfig {
    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn file_name(&self) -> &str {
        self.output.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }

    fn max_cells(&self) -> usize {
        self.maze.max_cells.unwrap_or(DEFAULT_MAX_CELLS)
    }

    fn seed(&self) -> Option<u64> {
        self.maze.seed
    }

    fn pretty(&self) -> bool {
        self.output.pretty.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
