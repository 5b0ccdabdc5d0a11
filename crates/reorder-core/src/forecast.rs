//! 用量預測模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calendar::YearMonth;
use crate::snapshot::UsageForecastRow;
use crate::{ReorderError, Result};

/// 單月用量預測（成品的預計消耗量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageForecastEntry {
    /// 物料ID
    pub component_id: String,

    /// 預測期間
    pub period: YearMonth,

    /// 預計用量
    pub usage: Decimal,
}

impl UsageForecastEntry {
    /// 創建新的預測記錄
    pub fn new(component_id: String, period: YearMonth, usage: Decimal) -> Self {
        Self {
            component_id,
            period,
            usage,
        }
    }
}

/// 預測來源
///
/// 查無該期間時必須回傳 `NotFound`，不可補零或內插。
pub trait ForecastProvider {
    fn forecast(&self, component_id: &str, period: YearMonth) -> Result<Decimal>;
}

/// 記憶體內的用量預測表
#[derive(Debug, Clone, Default)]
pub struct UsageForecast {
    entries: HashMap<(String, YearMonth), Decimal>,
    /// 保留輸入順序，供快照輸出
    order: Vec<(String, YearMonth)>,
    /// 載入時的原始列（成品預測不帶物料ID）
    source_rows: Vec<UsageForecastRow>,
}

impl UsageForecast {
    /// 創建空的預測表
    pub fn new() -> Self {
        Self::default()
    }

    /// 從預測記錄建立
    pub fn from_entries(entries: impl IntoIterator<Item = UsageForecastEntry>) -> Result<Self> {
        let mut forecast = Self::new();
        for entry in entries {
            forecast.add_entry(entry)?;
        }
        Ok(forecast)
    }

    /// 建立固定月用量的預測（從 `start` 起連續 `months` 個月）
    pub fn flat(component_id: &str, start: YearMonth, months: u32, usage: Decimal) -> Result<Self> {
        let mut forecast = Self::new();
        let mut period = start;
        for _ in 0..months {
            forecast.add_entry(UsageForecastEntry::new(
                component_id.to_string(),
                period,
                usage,
            ))?;
            period = period.next();
        }
        Ok(forecast)
    }

    /// 添加預測記錄，同一物料同一期間只能有一筆
    pub fn add_entry(&mut self, entry: UsageForecastEntry) -> Result<()> {
        if entry.usage < Decimal::ZERO {
            return Err(ReorderError::InvalidQuantity(format!(
                "物料 {} 在 {} 的預測用量為負：{}",
                entry.component_id, entry.period, entry.usage
            )));
        }

        let key = (entry.component_id, entry.period);
        if self.entries.contains_key(&key) {
            return Err(ReorderError::Duplicate(format!(
                "物料 {} 在 {} 的預測",
                key.0, key.1
            )));
        }

        self.order.push(key.clone());
        self.entries.insert(key, entry.usage);
        Ok(())
    }

    /// 預測筆數
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 建構器模式：保存載入時的原始列
    pub fn with_source_rows(mut self, rows: Vec<UsageForecastRow>) -> Self {
        self.source_rows = rows;
        self
    }

    /// 預測表的列
    ///
    /// 有原始列時原樣回傳；否則每筆預測各輸出一列並帶上物料ID。
    pub fn table_rows(&self) -> Vec<UsageForecastRow> {
        if !self.source_rows.is_empty() {
            return self.source_rows.clone();
        }
        self.entries()
            .into_iter()
            .map(|e| UsageForecastRow {
                item_id: Some(e.component_id),
                month: e.period.month,
                year: e.period.year,
                usage: e.usage,
            })
            .collect()
    }

    /// 依輸入順序列出所有預測
    pub fn entries(&self) -> Vec<UsageForecastEntry> {
        self.order
            .iter()
            .filter_map(|key| {
                self.entries
                    .get(key)
                    .map(|usage| UsageForecastEntry::new(key.0.clone(), key.1, *usage))
            })
            .collect()
    }
}

impl ForecastProvider for UsageForecast {
    fn forecast(&self, component_id: &str, period: YearMonth) -> Result<Decimal> {
        self.entries
            .get(&(component_id.to_string(), period))
            .copied()
            .ok_or_else(|| {
                ReorderError::NotFound(format!("物料 {} 在 {} 的用量預測", component_id, period))
            })
    }
}
