//! 應用程式配置
//!
//! 從環境變數載入（支援 `.env`），命令列參數可再覆寫。

use chrono::NaiveDate;
use reorder_core::config::DEFAULT_HORIZON_MONTHS;
use reorder_core::ProjectionConfig;
use std::env;
use std::path::PathBuf;

/// 配置錯誤
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("環境變數 {name} 的值無效: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// 應用程式配置
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 六張參考表所在目錄
    pub data_dir: PathBuf,

    /// 日誌級別
    pub log_level: String,

    /// 推算時界（月）
    pub horizon_months: u32,

    /// 推算基準日，未指定時使用本機日期
    pub today: Option<NaiveDate>,

    /// 未提供可靠度表時，抽取可靠度分數的種子
    pub reliability_seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            horizon_months: DEFAULT_HORIZON_MONTHS,
            today: None,
            reliability_seed: 0,
        }
    }
}

impl AppConfig {
    /// 從 `.env` 與環境變數載入
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 從任意鍵值來源載入（方便測試）
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("REORDER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("REORDER_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(value) = lookup("REORDER_HORIZON_MONTHS") {
            config.horizon_months = parse_var("REORDER_HORIZON_MONTHS", &value)?;
        }
        if let Some(value) = lookup("REORDER_TODAY") {
            config.today = Some(parse_var("REORDER_TODAY", &value)?);
        }
        if let Some(value) = lookup("REORDER_RELIABILITY_SEED") {
            config.reliability_seed = parse_var("REORDER_RELIABILITY_SEED", &value)?;
        }

        Ok(config)
    }

    /// 推算基準日
    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// 轉為推算配置
    pub fn projection(&self) -> ProjectionConfig {
        ProjectionConfig::new(self.today()).with_horizon_months(self.horizon_months)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.horizon_months, 120);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("REORDER_DATA_DIR", "/srv/reorder"),
            ("REORDER_HORIZON_MONTHS", "36"),
            ("REORDER_TODAY", "2025-10-17"),
            ("REORDER_RELIABILITY_SEED", "42"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/reorder"));
        assert_eq!(config.today(), NaiveDate::from_ymd_opt(2025, 10, 17).unwrap());
        assert_eq!(config.reliability_seed, 42);
        assert_eq!(config.projection().horizon_months, 36);
    }

    #[test]
    fn test_invalid_value_names_variable() {
        let err = AppConfig::from_lookup(lookup(&[("REORDER_TODAY", "17/10/2025")])).unwrap_err();
        assert!(err.to_string().contains("REORDER_TODAY"));
    }
}
