//! 帳本快照
//!
//! 以六張參考表的原始欄位名稱輸出帳本目前狀態，供外部自然語言查詢服務使用。
//! 欄位名稱與載入時的 CSV 表頭一致，同一組列型別也用於反序列化。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::forecast::UsageForecast;
use crate::ledger::InventoryLedger;

/// BOM 列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomRow {
    #[serde(rename = "Item ID")]
    pub item_id: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Quantity")]
    pub quantity: Decimal,
}

/// 現有庫存列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentStockRow {
    #[serde(rename = "Item ID")]
    pub item_id: String,
    #[serde(rename = "Current Stock")]
    pub current_stock: Decimal,
}

/// 在途採購單列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingPoRow {
    #[serde(rename = "Item ID")]
    pub item_id: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Stock Due")]
    pub stock_due: Decimal,
    #[serde(rename = "Arrive Time (days)")]
    pub arrive_time_days: i64,
    #[serde(rename = "Supplier ID")]
    pub supplier_id: String,
}

/// 安全庫存列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyStockRow {
    #[serde(rename = "Item ID")]
    pub item_id: String,
    #[serde(rename = "Safety Stock")]
    pub safety_stock: Decimal,
}

/// 供應商列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierRow {
    #[serde(rename = "Item ID")]
    pub item_id: String,
    #[serde(rename = "Supplier ID")]
    pub supplier_id: String,
    #[serde(rename = "Supplier Name")]
    pub supplier_name: String,
    #[serde(rename = "Reorder Quantity")]
    pub reorder_quantity: Decimal,
    #[serde(rename = "Lead Time (days)")]
    pub lead_time_days: i64,
}

/// 用量預測列
///
/// 參考資料不帶 `Item ID`（成品預測，由外部對應到物料）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageForecastRow {
    #[serde(rename = "Item ID", default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Usage")]
    pub usage: Decimal,
}

/// 六張參考表的快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub bom: Vec<BomRow>,
    pub current_stock: Vec<CurrentStockRow>,
    pub incoming_po: Vec<IncomingPoRow>,
    pub safety_stock: Vec<SafetyStockRow>,
    pub supplier_list: Vec<SupplierRow>,
    pub usage_forecast: Vec<UsageForecastRow>,
}

impl LedgerSnapshot {
    /// 擷取帳本與預測表的目前狀態（含本次提交的補貨單）
    pub fn capture(ledger: &InventoryLedger, forecast: &UsageForecast) -> Self {
        let components = ledger.components();

        Self {
            bom: components
                .iter()
                .map(|c| BomRow {
                    item_id: c.component_id.clone(),
                    description: c.description.clone(),
                    quantity: c.per_unit_ratio,
                })
                .collect(),
            current_stock: components
                .iter()
                .map(|c| CurrentStockRow {
                    item_id: c.component_id.clone(),
                    current_stock: c.current_stock,
                })
                .collect(),
            incoming_po: ledger
                .incoming()
                .iter()
                .map(|r| IncomingPoRow {
                    item_id: r.component_id.clone(),
                    description: r.description.clone(),
                    stock_due: r.quantity,
                    arrive_time_days: r.arrival_offset_days,
                    supplier_id: r.supplier_id.clone(),
                })
                .collect(),
            safety_stock: components
                .iter()
                .map(|c| SafetyStockRow {
                    item_id: c.component_id.clone(),
                    safety_stock: c.safety_stock,
                })
                .collect(),
            supplier_list: ledger
                .offers()
                .iter()
                .map(|o| SupplierRow {
                    item_id: o.component_id.clone(),
                    supplier_id: o.supplier_id.clone(),
                    supplier_name: o.supplier_name.clone(),
                    reorder_quantity: o.reorder_quantity,
                    lead_time_days: o.lead_time_days,
                })
                .collect(),
            usage_forecast: forecast.table_rows(),
        }
    }

    /// 序列化為 JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
