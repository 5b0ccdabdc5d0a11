//! 日誌系統初始化
//!
//! `RUST_LOG` 優先；未設定時使用配置中的日誌級別。輸出到 stderr，stdout 保留給報表。

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// 日誌初始化錯誤
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("無效的日誌級別 '{value}'")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },

    #[error("日誌系統初始化失敗: {0}")]
    Init(String),
}

/// 初始化日誌系統
pub fn init(log_level: &str) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level).map_err(|source| LoggingError::Filter {
            value: log_level.to_string(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| LoggingError::Init(err.to_string()))
}

/// 初始化測試環境的日誌系統
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
