//! 安全庫存缺口推算
//!
//! 從本月開始逐月前進：加入該月窗口內到貨的在途供應，扣除該月預測用量，
//! 直到可建構量不足以再撐過下個月（扣除後低於安全庫存）為止。

use chrono::NaiveDate;
use reorder_core::{
    ForecastProvider, InventoryLedger, ProjectionConfig, ReorderError, YearMonth,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單月推算明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthProjection {
    /// 月份
    pub period: YearMonth,
    /// 月初可建構量
    pub opening_capacity: Decimal,
    /// 本月窗口內到貨
    pub incoming: Decimal,
    /// 本月預測用量
    pub usage: Decimal,
    /// 月底可建構量
    pub closing_capacity: Decimal,
    /// 累計到貨窗口上限（距今天數）
    pub cutoff_days: i64,
}

/// 缺口推算結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depletion {
    /// 物料ID
    pub component_id: String,
    /// 缺口月份
    pub breach_period: YearMonth,
    /// 缺口月份第一天
    pub breach_date: NaiveDate,
    /// 逐月明細（不含缺口月份本身）
    pub trace: Vec<MonthProjection>,
}

/// 缺口推算器
pub struct DepletionProjector;

impl DepletionProjector {
    /// 推算物料的安全庫存缺口月份
    ///
    /// 任一月份查無預測即回傳 `NotFound`；前進超過 `horizon_months` 個月回傳 `Unbounded`。
    pub fn project<F>(
        ledger: &InventoryLedger,
        forecast: &F,
        component_id: &str,
        config: &ProjectionConfig,
    ) -> reorder_core::Result<Depletion>
    where
        F: ForecastProvider + ?Sized,
    {
        let component = ledger.component(component_id)?;
        let safety_stock = component.safety_stock;
        let mut capacity = component.build_capacity()?;
        let mut trace = Vec::new();

        // 本月：到下個月第一天之前到貨的全部計入（含已逾期）
        let mut period = YearMonth::from_date(config.today);
        let mut cutoff = YearMonth::days_until_next_month(config.today)?;
        let incoming = ledger.incoming_between(component_id, None, cutoff)?;
        let usage = forecast.forecast(component_id, period)?;

        let opening_capacity = capacity;
        capacity = apply_month(component_id, period, capacity, incoming, usage)?;
        trace.push(MonthProjection {
            period,
            opening_capacity,
            incoming,
            usage,
            closing_capacity: capacity,
            cutoff_days: cutoff,
        });

        let mut next_period = period.next();
        let mut next_usage = forecast.forecast(component_id, next_period)?;
        let mut months_advanced = 0u32;

        while remaining_after(component_id, next_period, capacity, next_usage)? >= safety_stock {
            if months_advanced >= config.horizon_months {
                tracing::warn!(
                    "物料 {} 推算超過 {} 個月仍未出現缺口",
                    component_id,
                    config.horizon_months
                );
                return Err(ReorderError::Unbounded {
                    component_id: component_id.to_string(),
                    months: config.horizon_months,
                });
            }
            months_advanced += 1;

            period = next_period;
            let new_cutoff = cutoff + period.days_in_month()?;
            let incoming = ledger.incoming_between(component_id, Some(cutoff), new_cutoff)?;
            cutoff = new_cutoff;

            let opening_capacity = capacity;
            capacity = apply_month(component_id, period, capacity, incoming, next_usage)?;

            tracing::debug!(
                "物料 {} {}: 月初 {}, 到貨 {}, 用量 {}, 月底 {}",
                component_id,
                period,
                opening_capacity,
                incoming,
                next_usage,
                capacity
            );

            trace.push(MonthProjection {
                period,
                opening_capacity,
                incoming,
                usage: next_usage,
                closing_capacity: capacity,
                cutoff_days: cutoff,
            });

            next_period = period.next();
            next_usage = forecast.forecast(component_id, next_period)?;
        }

        let breach_date = next_period.first_day()?;
        tracing::debug!("物料 {} 缺口月份: {}", component_id, next_period);

        Ok(Depletion {
            component_id: component_id.to_string(),
            breach_period: next_period,
            breach_date,
            trace,
        })
    }
}

/// 月初可建構量 + 到貨 − 用量
fn apply_month(
    component_id: &str,
    period: YearMonth,
    capacity: Decimal,
    incoming: Decimal,
    usage: Decimal,
) -> reorder_core::Result<Decimal> {
    capacity
        .checked_add(incoming)
        .and_then(|total| total.checked_sub(usage))
        .ok_or_else(|| ReorderError::overflow(format!("物料 {} 在 {} 的可建構量", component_id, period)))
}

fn remaining_after(
    component_id: &str,
    period: YearMonth,
    capacity: Decimal,
    usage: Decimal,
) -> reorder_core::Result<Decimal> {
    capacity
        .checked_sub(usage)
        .ok_or_else(|| ReorderError::overflow(format!("物料 {} 在 {} 的可建構量", component_id, period)))
}
