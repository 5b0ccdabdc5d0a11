//! 補貨期限計算

use chrono::{NaiveDate, TimeDelta};
use reorder_core::{ProjectionResult, ReorderError, SupplierOffer, UrgencyLevel};

/// 補貨期限計算器
pub struct ReorderDeadlineCalculator;

impl ReorderDeadlineCalculator {
    /// 最快供應商交期（天），沒有任何報價時回傳 `NotFound`
    pub fn bail_out_days(component_id: &str, offers: &[&SupplierOffer]) -> reorder_core::Result<i64> {
        offers
            .iter()
            .map(|o| o.lead_time_days)
            .min()
            .ok_or_else(|| ReorderError::NotFound(format!("物料 {} 的供應商報價", component_id)))
    }

    /// 由缺口日期換算最後下單日
    ///
    /// `days_until_trouble` = (缺口日 − 今天) − 最快交期，可能為負。
    pub fn calculate(
        component_id: &str,
        breach_date: NaiveDate,
        offers: &[&SupplierOffer],
        today: NaiveDate,
    ) -> reorder_core::Result<ProjectionResult> {
        let bail_out_days = Self::bail_out_days(component_id, offers)?;
        let days_until_trouble = (breach_date - today)
            .num_days()
            .checked_sub(bail_out_days)
            .ok_or_else(|| {
                ReorderError::InvalidDate(format!(
                    "物料 {} 的交期 {} 天超出日期範圍",
                    component_id, bail_out_days
                ))
            })?;
        let last_order_date = TimeDelta::try_days(days_until_trouble)
            .and_then(|offset| today.checked_add_signed(offset))
            .ok_or_else(|| {
                ReorderError::InvalidDate(format!(
                    "{} 加 {} 天超出日期範圍",
                    today, days_until_trouble
                ))
            })?;

        Ok(ProjectionResult {
            component_id: component_id.to_string(),
            breach_date,
            bail_out_days,
            days_until_trouble,
            last_order_date,
            urgency: UrgencyLevel::from_days_until_trouble(days_until_trouble),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn offer(supplier_id: &str, lead_time_days: i64) -> SupplierOffer {
        SupplierOffer::new(
            "PUMP-1".to_string(),
            supplier_id.to_string(),
            lead_time_days,
            Decimal::from(25),
        )
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_uses_fastest_supplier() {
        let slow = offer("SUP-01", 21);
        let fast = offer("SUP-02", 10);
        let offers = vec![&slow, &fast];

        let today = date(2025, 10, 17);
        let result =
            ReorderDeadlineCalculator::calculate("PUMP-1", date(2025, 12, 1), &offers, today)
                .unwrap();

        // 10/17 → 12/1 = 45 天，扣 10 天交期
        assert_eq!(result.bail_out_days, 10);
        assert_eq!(result.days_until_trouble, 35);
        assert_eq!(result.last_order_date, date(2025, 11, 21));
        assert_eq!(result.urgency, UrgencyLevel::Good);
    }

    #[test]
    fn test_no_offers_is_not_found() {
        let result = ReorderDeadlineCalculator::calculate(
            "PUMP-1",
            date(2025, 12, 1),
            &[],
            date(2025, 10, 17),
        );
        assert!(matches!(result, Err(ReorderError::NotFound(_))));
    }

    #[test]
    fn test_past_deadline_goes_negative() {
        let fast = offer("SUP-02", 30);
        let today = date(2025, 10, 17);
        let result =
            ReorderDeadlineCalculator::calculate("PUMP-1", date(2025, 11, 1), &[&fast], today)
                .unwrap();

        assert_eq!(result.days_until_trouble, -15);
        assert_eq!(result.last_order_date, date(2025, 10, 2));
        assert!(result.is_overdue());
        assert_eq!(result.urgency, UrgencyLevel::Critical);
    }

    #[test]
    fn test_huge_lead_time_is_invalid_date() {
        let supplier = offer("SUP-01", 200_000_000_000_000);

        let result = ReorderDeadlineCalculator::calculate(
            "PUMP-1",
            date(2025, 12, 1),
            &[&supplier],
            date(2025, 10, 17),
        );
        assert!(matches!(result, Err(ReorderError::InvalidDate(_))));
    }

    #[rstest]
    #[case(-1, UrgencyLevel::Critical)]
    #[case(0, UrgencyLevel::Warning)]
    #[case(6, UrgencyLevel::Warning)]
    #[case(7, UrgencyLevel::Normal)]
    #[case(29, UrgencyLevel::Normal)]
    #[case(30, UrgencyLevel::Good)]
    fn test_urgency_boundaries(#[case] days_until_trouble: i64, #[case] expected: UrgencyLevel) {
        // 缺口日固定為 12/1，反推交期讓 days_until_trouble 落在邊界
        let today = date(2025, 10, 17);
        let breach = date(2025, 12, 1);
        let lead_time = (breach - today).num_days() - days_until_trouble;
        let supplier = offer("SUP-01", lead_time);

        let result =
            ReorderDeadlineCalculator::calculate("PUMP-1", breach, &[&supplier], today).unwrap();

        assert_eq!(result.days_until_trouble, days_until_trouble);
        assert_eq!(result.urgency, expected);
    }
}
