//! 供應商報價

use chrono::{NaiveDate, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 供應商報價（靜態參考資料）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierOffer {
    /// 物料ID
    pub component_id: String,

    /// 供應商ID
    pub supplier_id: String,

    /// 供應商名稱
    pub supplier_name: String,

    /// 交期（天）
    pub lead_time_days: i64,

    /// 標準訂購量
    pub reorder_quantity: Decimal,
}

impl SupplierOffer {
    /// 創建新的供應商報價
    pub fn new(
        component_id: String,
        supplier_id: String,
        lead_time_days: i64,
        reorder_quantity: Decimal,
    ) -> Self {
        Self {
            component_id,
            supplier_name: supplier_id.clone(),
            supplier_id,
            lead_time_days,
            reorder_quantity,
        }
    }

    /// 建構器模式：設置供應商名稱
    pub fn with_supplier_name(mut self, supplier_name: String) -> Self {
        self.supplier_name = supplier_name;
        self
    }

    /// 今日下單的預計到貨日
    pub fn expected_arrival(&self, today: NaiveDate) -> Option<NaiveDate> {
        TimeDelta::try_days(self.lead_time_days).and_then(|offset| today.checked_add_signed(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_builder() {
        let offer = SupplierOffer::new(
            "PUMP-1".to_string(),
            "SUP-07".to_string(),
            10,
            Decimal::from(25),
        )
        .with_supplier_name("Rajit's Pumps".to_string());

        assert_eq!(offer.supplier_name, "Rajit's Pumps");
        assert_eq!(offer.lead_time_days, 10);
    }

    #[test]
    fn test_expected_arrival() {
        let offer = SupplierOffer::new("PUMP-1".to_string(), "SUP-07".to_string(), 10, Decimal::ONE);
        let today = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();

        assert_eq!(
            offer.expected_arrival(today),
            NaiveDate::from_ymd_opt(2026, 1, 4)
        );
    }

    #[test]
    fn test_out_of_range_lead_time_has_no_arrival() {
        let offer = SupplierOffer::new(
            "PUMP-1".to_string(),
            "SUP-07".to_string(),
            200_000_000_000_000,
            Decimal::ONE,
        );
        let today = NaiveDate::from_ymd_opt(2025, 10, 17).unwrap();

        assert_eq!(offer.expected_arrival(today), None);
    }
}
