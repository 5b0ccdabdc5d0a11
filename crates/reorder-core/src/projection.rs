//! 缺口推算結果模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 急迫程度（依距離最後下單日的天數分四級）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    /// 已錯過安全下單日（< 0 天）
    Critical,
    /// 一週內必須下單（0–6 天）
    Warning,
    /// 一個月內必須下單（7–29 天）
    Normal,
    /// 尚有餘裕（≥ 30 天）
    Good,
}

impl UrgencyLevel {
    /// 一週警戒線
    pub const WARNING_DAYS: i64 = 7;
    /// 一個月警戒線
    pub const NORMAL_DAYS: i64 = 30;

    /// 由距離最後下單日的天數判定急迫程度
    pub fn from_days_until_trouble(days: i64) -> Self {
        if days < 0 {
            Self::Critical
        } else if days < Self::WARNING_DAYS {
            Self::Warning
        } else if days < Self::NORMAL_DAYS {
            Self::Normal
        } else {
            Self::Good
        }
    }

    /// 進度條填滿比例
    ///
    /// 顯示層以比例上色：≥1.0 紅、≥0.75 黃、≥0.5 綠、其他藍，
    /// 每一級取該色段的下緣，四級與四色一一對應。
    pub fn indicator_fill(&self) -> f64 {
        match self {
            Self::Critical => 1.0,
            Self::Warning => 0.75,
            Self::Normal => 0.5,
            Self::Good => 0.25,
        }
    }

    /// 顯示顏色
    pub fn color(&self) -> &'static str {
        match self {
            Self::Critical => "red",
            Self::Warning => "yellow",
            Self::Normal => "green",
            Self::Good => "blue",
        }
    }

    /// 由進度條比例反推急迫程度
    pub fn from_indicator_fill(fill: f64) -> Self {
        if fill >= 1.0 {
            Self::Critical
        } else if fill >= 0.75 {
            Self::Warning
        } else if fill >= 0.5 {
            Self::Normal
        } else {
            Self::Good
        }
    }
}

/// 單一物料的補貨期限
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// 物料ID
    pub component_id: String,

    /// 缺口月份的第一天
    pub breach_date: NaiveDate,

    /// 最快供應商交期（天）
    pub bail_out_days: i64,

    /// 距離最後下單日的天數（可能為負）
    pub days_until_trouble: i64,

    /// 最後下單日
    pub last_order_date: NaiveDate,

    /// 急迫程度
    pub urgency: UrgencyLevel,
}

impl ProjectionResult {
    /// 是否已錯過最後下單日
    pub fn is_overdue(&self) -> bool {
        self.days_until_trouble < 0
    }
}
