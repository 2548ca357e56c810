use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum CountryFxError {
    /// 上游数据源返回了非成功状态码
    ExternalService { source: String, message: String },
    NotFound(String),
    Validation(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    /// 上游返回了无法使用的数据
    UpstreamPayload(String),
    Render(String),
    FileOperation(String),
    Serialization(String),
    Internal(String),
}

impl CountryFxError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            CountryFxError::ExternalService { .. } => "E001",
            CountryFxError::NotFound(_) => "E002",
            CountryFxError::Validation(_) => "E003",
            CountryFxError::DatabaseConfig(_) => "E004",
            CountryFxError::DatabaseConnection(_) => "E005",
            CountryFxError::DatabaseOperation(_) => "E006",
            CountryFxError::UpstreamPayload(_) => "E007",
            CountryFxError::Render(_) => "E008",
            CountryFxError::FileOperation(_) => "E009",
            CountryFxError::Serialization(_) => "E010",
            CountryFxError::Internal(_) => "E011",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            CountryFxError::ExternalService { .. } => "External Service Error",
            CountryFxError::NotFound(_) => "Resource Not Found",
            CountryFxError::Validation(_) => "Validation Error",
            CountryFxError::DatabaseConfig(_) => "Database Configuration Error",
            CountryFxError::DatabaseConnection(_) => "Database Connection Error",
            CountryFxError::DatabaseOperation(_) => "Database Operation Error",
            CountryFxError::UpstreamPayload(_) => "Upstream Payload Error",
            CountryFxError::Render(_) => "Render Error",
            CountryFxError::FileOperation(_) => "File Operation Error",
            CountryFxError::Serialization(_) => "Serialization Error",
            CountryFxError::Internal(_) => "Internal Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            CountryFxError::ExternalService { message, .. } => message,
            CountryFxError::NotFound(msg) => msg,
            CountryFxError::Validation(msg) => msg,
            CountryFxError::DatabaseConfig(msg) => msg,
            CountryFxError::DatabaseConnection(msg) => msg,
            CountryFxError::DatabaseOperation(msg) => msg,
            CountryFxError::UpstreamPayload(msg) => msg,
            CountryFxError::Render(msg) => msg,
            CountryFxError::FileOperation(msg) => msg,
            CountryFxError::Serialization(msg) => msg,
            CountryFxError::Internal(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    pub fn http_status(&self) -> StatusCode {
        match self {
            CountryFxError::ExternalService { .. } => StatusCode::SERVICE_UNAVAILABLE,
            CountryFxError::NotFound(_) => StatusCode::NOT_FOUND,
            CountryFxError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 出错的上游数据源（仅 ExternalService）
    pub fn upstream_source(&self) -> Option<&str> {
        match self {
            CountryFxError::ExternalService { source, .. } => Some(source),
            _ => None,
        }
    }

    /// 格式化为彩色输出（用于启动失败）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CountryFxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CountryFxError {}

// 便捷的构造函数
impl CountryFxError {
    pub fn external_service<S: Into<String>, T: Into<String>>(source: S, msg: T) -> Self {
        CountryFxError::ExternalService {
            source: source.into(),
            message: msg.into(),
        }
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        CountryFxError::NotFound(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        CountryFxError::Validation(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        CountryFxError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        CountryFxError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        CountryFxError::DatabaseOperation(msg.into())
    }

    pub fn upstream_payload<T: Into<String>>(msg: T) -> Self {
        CountryFxError::UpstreamPayload(msg.into())
    }

    pub fn render<T: Into<String>>(msg: T) -> Self {
        CountryFxError::Render(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        CountryFxError::FileOperation(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        CountryFxError::Internal(msg.into())
    }
}

impl From<sea_orm::DbErr> for CountryFxError {
    fn from(err: sea_orm::DbErr) -> Self {
        CountryFxError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CountryFxError {
    fn from(err: std::io::Error) -> Self {
        CountryFxError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CountryFxError {
    fn from(err: serde_json::Error) -> Self {
        CountryFxError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CountryFxError>;
