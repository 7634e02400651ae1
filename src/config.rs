use config::{Config, ConfigError, Environment, File};
use crate::service::recommender::DEFAULT_ALTERNATIVES_LIMIT;
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub matching: MatchingConfig,
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
}

/// 目录来源：设置 csv_path 时使用内存目录，优先于数据库
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub csv_path: Option<String>,
}

/// 模糊匹配参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// 每个查询字符允许的最大编辑次数 [0, 1]
    pub threshold: f64,
    /// 单次检索返回的最大候选数，0 表示不限
    pub max_results: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub default_limit: usize,
    pub top_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            max_results: 5,
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_ALTERNATIVES_LIMIT,
            top_limit: 10,
        }
    }
}

impl AppConfig {
    /// 加载配置：默认值 -> ./config.{toml,yaml,json} -> APP__ 前缀环境变量
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let settings = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("matching.threshold", defaults.matching.threshold)?
            .set_default("matching.max_results", defaults.matching.max_results as i64)?
            .set_default(
                "recommendation.default_limit",
                defaults.recommendation.default_limit as i64,
            )?
            .set_default(
                "recommendation.top_limit",
                defaults.recommendation.top_limit as i64,
            )?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.csv_path.is_none() && self.database.url.is_none() {
            return Err(ConfigError::Message(
                "either catalog.csv_path or database.url must be set".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.matching.threshold) {
            return Err(ConfigError::Message(format!(
                "matching.threshold must be within [0, 1], got {}",
                self.matching.threshold
            )));
        }
        Ok(())
    }
}
