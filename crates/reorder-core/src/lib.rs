//! # Reorder Core
//!
//! 核心資料模型、庫存帳本與預測來源

pub mod calendar;
pub mod component;
pub mod config;
pub mod forecast;
pub mod ledger;
pub mod projection;
pub mod snapshot;
pub mod supplier;
pub mod supply;

// Re-export 主要類型
pub use calendar::YearMonth;
pub use component::Component;
pub use config::ProjectionConfig;
pub use forecast::{ForecastProvider, UsageForecast, UsageForecastEntry};
pub use ledger::InventoryLedger;
pub use projection::{ProjectionResult, UrgencyLevel};
pub use snapshot::LedgerSnapshot;
pub use supplier::SupplierOffer;
pub use supply::{IncomingSupplyRecord, SupplyOrigin};

/// 補貨計算錯誤類型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    #[error("找不到資料: {0}")]
    NotFound(String),

    #[error("物料 {component_id} 在 {months} 個月內未出現安全庫存缺口，超出推算時界")]
    Unbounded { component_id: String, months: u32 },

    #[error("無效的數量: {0}")]
    InvalidQuantity(String),

    #[error("無效的日期: {0}")]
    InvalidDate(String),

    #[error("重複的資料: {0}")]
    Duplicate(String),
}

impl ReorderError {
    /// 建立物料不存在的錯誤
    pub fn component_not_found(component_id: &str) -> Self {
        Self::NotFound(format!("物料 {}", component_id))
    }

    /// 建立數量運算溢位的錯誤
    pub fn overflow(what: impl std::fmt::Display) -> Self {
        Self::InvalidQuantity(format!("{} 超出數值範圍", what))
    }
}

pub type Result<T> = std::result::Result<T, ReorderError>;
