//! 補貨作業階段
//!
//! 擁有帳本、預測與快取；提交補貨單是唯一的寫入路徑，
//! 提交後立即讓該物料的推算結果失效。

use reorder_calc::{
    Depletion, DepletionProjector, OrderRecorder, OrderRequest, QueryContext, RankedOffer,
    ReliabilitySource, ReorderPlanner, ReorderReport, SupplierRanking,
};
use reorder_core::{
    IncomingSupplyRecord, InventoryLedger, LedgerSnapshot, ProjectionConfig, ProjectionResult,
    UsageForecast,
};

use crate::memo::{ProjectionCache, ProjectionKey};

/// 補貨作業階段
pub struct ReorderSession<R> {
    ledger: InventoryLedger,
    forecast: UsageForecast,
    reliability: R,
    planner: ReorderPlanner,
    cache: ProjectionCache,
}

impl<R: ReliabilitySource> ReorderSession<R> {
    /// 創建新的作業階段
    pub fn new(
        ledger: InventoryLedger,
        forecast: UsageForecast,
        reliability: R,
        config: ProjectionConfig,
    ) -> Self {
        Self {
            ledger,
            forecast,
            reliability,
            planner: ReorderPlanner::new(config),
            cache: ProjectionCache::new(),
        }
    }

    /// 單物料推算（記憶化）
    pub fn project(&mut self, component_id: &str) -> reorder_core::Result<ProjectionResult> {
        let key = ProjectionKey::new(&self.ledger, component_id, self.planner.config());
        let planner = &self.planner;
        let ledger = &self.ledger;
        let forecast = &self.forecast;
        self.cache.get_or_compute(key, component_id, || {
            planner.project_component(ledger, forecast, component_id)
        })
    }

    /// 逐月推算明細（不快取）
    pub fn depletion(&self, component_id: &str) -> reorder_core::Result<Depletion> {
        DepletionProjector::project(
            &self.ledger,
            &self.forecast,
            component_id,
            self.planner.config(),
        )
    }

    /// 全部物料的補貨報表
    pub fn report(&mut self) -> ReorderReport {
        let start_time = std::time::Instant::now();
        let components = self.ledger.components().to_vec();

        let rows = components
            .iter()
            .map(|component| {
                let result = self.project(&component.component_id);
                ReorderPlanner::outcome(component, result)
            })
            .collect();

        let mut report = ReorderReport::from_outcomes(self.planner.config().today, rows);
        report.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!(
            "補貨報表：成功 {} 筆，失敗 {} 筆，快取命中 {} 次",
            report.projected_count(),
            report.failed_count(),
            self.cache.hits()
        );

        report
    }

    /// 物料的供應商排序
    ///
    /// 推算成功時一併標記到貨晚於缺口日的供應商。
    pub fn suppliers(&mut self, component_id: &str) -> reorder_core::Result<Vec<RankedOffer>> {
        let breach_date = self.project(component_id).ok().map(|p| p.breach_date);
        SupplierRanking::rank(
            &self.ledger,
            component_id,
            &self.reliability,
            self.planner.config().today,
            breach_date,
        )
    }

    /// 提交補貨單並讓該物料的推算結果失效
    pub fn submit_order(
        &mut self,
        request: &OrderRequest,
    ) -> reorder_core::Result<IncomingSupplyRecord> {
        let record = OrderRecorder::submit(&mut self.ledger, request)?;
        self.cache.invalidate(&record.component_id);
        Ok(record)
    }

    /// 六張參考表的目前狀態
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::capture(&self.ledger, &self.forecast)
    }

    /// 外部自然語言查詢用的上下文
    pub fn query_context(&mut self) -> QueryContext {
        let report = self.report();
        QueryContext::new(self.snapshot(), report)
    }

    pub fn ledger(&self) -> &InventoryLedger {
        &self.ledger
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.planner.config()
    }

    pub fn cache(&self) -> &ProjectionCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use reorder_calc::StaticReliability;
    use reorder_core::{Component, ReorderError, SupplierOffer, UrgencyLevel, YearMonth};
    use rust_decimal::Decimal;

    fn session() -> ReorderSession<StaticReliability> {
        let mut ledger = InventoryLedger::new();
        ledger
            .add_component(Component::new(
                "PUMP-1".to_string(),
                Decimal::from(2),
                Decimal::from(50),
                Decimal::from(20),
            ))
            .unwrap();
        for (supplier_id, lead_time) in [("SUP-07", 10), ("SUP-08", 50)] {
            ledger
                .add_offer(SupplierOffer::new(
                    "PUMP-1".to_string(),
                    supplier_id.to_string(),
                    lead_time,
                    Decimal::from(30),
                ))
                .unwrap();
        }
        let forecast =
            UsageForecast::flat("PUMP-1", YearMonth::new(2025, 10).unwrap(), 24, Decimal::from(30))
                .unwrap();
        let reliability = StaticReliability::new()
            .with_score("PUMP-1", "SUP-07", 60.0)
            .with_score("PUMP-1", "SUP-08", 95.0);

        ReorderSession::new(
            ledger,
            forecast,
            reliability,
            ProjectionConfig::new(NaiveDate::from_ymd_opt(2025, 10, 17).unwrap()),
        )
    }

    #[test]
    fn test_projection_is_memoized() {
        let mut session = session();

        let first = session.project("PUMP-1").unwrap();
        let second = session.project("PUMP-1").unwrap();

        assert_eq!(first, second);
        assert_eq!(session.cache().misses(), 1);
        assert_eq!(session.cache().hits(), 1);
    }

    #[test]
    fn test_submit_order_invalidates_projection() {
        let mut session = session();
        let before = session.project("PUMP-1").unwrap();
        assert_eq!(before.breach_date, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());

        // 30 × 2 = 60，10 天後到貨（落在十月窗口）
        let request = OrderRequest::new("PUMP-1".to_string(), "SUP-07".to_string(), Decimal::from(2));
        session.submit_order(&request).unwrap();
        assert!(session.cache().is_empty());

        let after = session.project("PUMP-1").unwrap();
        assert_eq!(after.breach_date, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert!(after.days_until_trouble > before.days_until_trouble);
        assert_eq!(session.cache().misses(), 2);
    }

    #[test]
    fn test_rejected_order_leaves_cache_intact() {
        let mut session = session();
        session.project("PUMP-1").unwrap();

        let request = OrderRequest::new("PUMP-1".to_string(), "SUP-07".to_string(), Decimal::ZERO);
        assert!(matches!(
            session.submit_order(&request),
            Err(ReorderError::InvalidQuantity(_))
        ));
        assert_eq!(session.cache().len(), 1);
        assert!(session.ledger().incoming().is_empty());
    }

    #[test]
    fn test_suppliers_flag_late_delivery() {
        let mut session = session();

        let ranked = session.suppliers("PUMP-1").unwrap();

        // SUP-08 最可靠但 50 天後到貨，晚於 12/1
        assert_eq!(ranked[0].offer.supplier_id, "SUP-08");
        assert!(!ranked[0].can_order());
        assert_eq!(ranked[1].offer.supplier_id, "SUP-07");
        assert!(ranked[1].can_order());
    }

    #[test]
    fn test_report_and_context() {
        let mut session = session();

        let report = session.report();
        let pump = report.row("PUMP-1").unwrap().projection().unwrap();
        assert_eq!(pump.urgency, UrgencyLevel::Good);

        let context = session.query_context();
        assert_eq!(context.tables.supplier_list.len(), 2);
        assert_eq!(context.report.rows.len(), 1);
    }

    #[test]
    fn test_depletion_trace() {
        let session = session();
        let depletion = session.depletion("PUMP-1").unwrap();

        assert_eq!(depletion.trace.len(), 2);
        assert_eq!(depletion.breach_period, YearMonth::new(2025, 12).unwrap());
    }
}
