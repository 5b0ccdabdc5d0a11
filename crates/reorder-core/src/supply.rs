//! 在途供應模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 供應來源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplyOrigin {
    /// 載入時既有的採購單
    PurchaseOrder,
    /// 本次作業中提交的補貨單
    Submitted,
}

/// 在途供應記錄
///
/// 記錄一經建立即不再修改或刪除，只能追加。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingSupplyRecord {
    /// 記錄ID（同參數重複提交也會產生不同記錄）
    pub id: Uuid,

    /// 物料ID
    pub component_id: String,

    /// 物料說明
    pub description: String,

    /// 到貨數量
    pub quantity: Decimal,

    /// 距今到貨天數（提交的補貨單為供應商交期）
    pub arrival_offset_days: i64,

    /// 供應商ID
    pub supplier_id: String,

    /// 供應來源
    pub origin: SupplyOrigin,
}

impl IncomingSupplyRecord {
    /// 創建新的在途供應
    pub fn new(
        component_id: String,
        quantity: Decimal,
        arrival_offset_days: i64,
        supplier_id: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            component_id,
            description: String::new(),
            quantity,
            arrival_offset_days,
            supplier_id,
            origin: SupplyOrigin::PurchaseOrder,
        }
    }

    /// 建構器模式：設置說明
    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    /// 建構器模式：標記為本次提交的補貨單
    pub fn as_submitted(mut self) -> Self {
        self.origin = SupplyOrigin::Submitted;
        self
    }

    /// 檢查到貨日是否落在 (after, up_to] 區間
    ///
    /// `after` 為 `None` 時不設下限（已逾期的在途也計入）。
    pub fn arrives_within(&self, after: Option<i64>, up_to: i64) -> bool {
        let above_lower = match after {
            Some(lower) => self.arrival_offset_days > lower,
            None => true,
        };
        above_lower && self.arrival_offset_days <= up_to
    }
}
