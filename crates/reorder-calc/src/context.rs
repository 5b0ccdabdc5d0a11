//! 自然語言查詢的資料邊界
//!
//! 外部語言服務只拿到序列化後的帳本快照與補貨報表，本 crate 不解析任何文字。

use reorder_core::LedgerSnapshot;
use serde::{Deserialize, Serialize};

use crate::ReorderReport;

/// 查詢上下文：六張參考表 + 目前的補貨報表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryContext {
    pub tables: LedgerSnapshot,
    pub report: ReorderReport,
}

impl QueryContext {
    pub fn new(tables: LedgerSnapshot, report: ReorderReport) -> Self {
        Self { tables, report }
    }

    /// 序列化為 JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// 序列化為縮排 JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
