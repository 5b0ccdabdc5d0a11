//! 補貨單提交

use reorder_core::{IncomingSupplyRecord, InventoryLedger, ReorderError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 補貨單請求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// 物料ID
    pub component_id: String,

    /// 選定的供應商
    pub supplier_id: String,

    /// 標準訂購量的倍數
    pub multiplier: Decimal,
}

impl OrderRequest {
    pub fn new(component_id: String, supplier_id: String, multiplier: Decimal) -> Self {
        Self {
            component_id,
            supplier_id,
            multiplier,
        }
    }
}

/// 補貨單記錄器
pub struct OrderRecorder;

impl OrderRecorder {
    /// 將補貨單追加為在途供應
    ///
    /// 數量 = 標準訂購量 × 倍數；到貨天數 = 供應商交期。
    /// 相同參數提交兩次會產生兩筆獨立記錄。
    pub fn submit(
        ledger: &mut InventoryLedger,
        request: &OrderRequest,
    ) -> reorder_core::Result<IncomingSupplyRecord> {
        if request.multiplier <= Decimal::ZERO {
            return Err(ReorderError::InvalidQuantity(format!(
                "訂購倍數必須為正：{}",
                request.multiplier
            )));
        }

        let description = ledger.component(&request.component_id)?.description.clone();
        let offer = ledger.offer(&request.component_id, &request.supplier_id)?;
        let quantity = offer
            .reorder_quantity
            .checked_mul(request.multiplier)
            .ok_or_else(|| {
                ReorderError::overflow(format!(
                    "{} × {} 的訂購量",
                    offer.reorder_quantity, request.multiplier
                ))
            })?;

        let record = IncomingSupplyRecord::new(
            request.component_id.clone(),
            quantity,
            offer.lead_time_days,
            offer.supplier_id.clone(),
        )
        .with_description(description)
        .as_submitted();

        ledger.append_incoming(record.clone())?;

        tracing::info!(
            "提交補貨單: 物料 {}, 供應商 {}, 數量 {}, {} 天後到貨",
            record.component_id,
            record.supplier_id,
            record.quantity,
            record.arrival_offset_days
        );

        Ok(record)
    }
}
