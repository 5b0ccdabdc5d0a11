//! 推算配置

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 預設推算時界：10 年
pub const DEFAULT_HORIZON_MONTHS: u32 = 120;

/// 缺口推算參數
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// 推算基準日（「今天」）
    pub today: NaiveDate,

    /// 最多前進的月數，超過即回報 `Unbounded`
    ///
    /// 預測永遠低於在途補給時，逐月推算不會自然終止。
    pub horizon_months: u32,
}

impl ProjectionConfig {
    /// 創建新的推算配置
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            horizon_months: DEFAULT_HORIZON_MONTHS,
        }
    }

    /// 建構器模式：設置推算時界
    pub fn with_horizon_months(mut self, months: u32) -> Self {
        self.horizon_months = months;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_config() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 17).unwrap();
        let config = ProjectionConfig::new(today);

        assert_eq!(config.today, today);
        assert_eq!(config.horizon_months, 120);
        assert_eq!(config.with_horizon_months(24).horizon_months, 24);
    }
}
