use serde::{Deserialize, Serialize};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 历史环境变量（优先级最高）
const LEGACY_ENV_OVERRIDES: [(&str, &str); 4] = [
    ("DATABASE_URL", "database.database_url"),
    ("COUNTRY_DATA_URL", "sources.country_data_url"),
    ("EXCHANGE_RATE_URL", "sources.exchange_rate_url"),
    ("PORT", "server.port"),
];

/// 静态配置（从 TOML + 环境变量加载，启动时使用）
///
/// - server: 监听地址、端口、worker 数量
/// - database: 数据库连接配置
/// - sources: 国家数据源与汇率数据源
/// - summary: 汇总图片输出
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：DATABASE_URL 等历史变量 > CFX__* 环境变量 > TOML > 默认值
    /// ENV 前缀：CFX，分隔符：__
    /// 示例：CFX__SERVER__PORT=9999
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("CFX")
                    .separator("__")
                    .try_parsing(true),
            );

        for (var, key) in LEGACY_ENV_OVERRIDES {
            builder = builder.set_override_option(key, std::env::var(var).ok())?;
        }

        builder.build()?.try_deserialize::<StaticConfig>()
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    /// 连接超时（秒）
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
}

/// 外部数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_country_data_url")]
    pub country_data_url: String,
    #[serde(default = "default_exchange_rate_url")]
    pub exchange_rate_url: String,
    /// 单次请求超时（秒）
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
}

/// 汇总图片配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_image_path")]
    pub image_path: String,
    #[serde(default = "default_top_n")]
    pub top_n: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "sqlite://countries.db?mode=rwc".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    8
}

fn default_country_data_url() -> String {
    "https://restcountries.com/v2/all?fields=name,capital,region,population,flag,currencies"
        .to_string()
}

fn default_exchange_rate_url() -> String {
    "https://open.er-api.com/v6/latest/USD".to_string()
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_image_path() -> String {
    "summary.svg".to_string()
}

fn default_top_n() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_file() -> Option<String> {
    None
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            country_data_url: default_country_data_url(),
            exchange_rate_url: default_exchange_rate_url(),
            timeout_secs: default_fetch_timeout(),
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            image_path: default_image_path(),
            top_n: default_top_n(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: default_log_file(),
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
