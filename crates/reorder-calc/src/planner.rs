//! 補貨報表主計算器

use reorder_core::{
    Component, ForecastProvider, InventoryLedger, ProjectionConfig, ProjectionResult,
};

use crate::deadline::ReorderDeadlineCalculator;
use crate::projector::DepletionProjector;
use crate::{ComponentOutcome, ReorderReport};

/// 補貨報表計算器
pub struct ReorderPlanner {
    config: ProjectionConfig,
}

impl ReorderPlanner {
    /// 創建新的計算器
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// 單物料：缺口推算 → 最後下單日
    pub fn project_component<F>(
        &self,
        ledger: &InventoryLedger,
        forecast: &F,
        component_id: &str,
    ) -> reorder_core::Result<ProjectionResult>
    where
        F: ForecastProvider + ?Sized,
    {
        let depletion = DepletionProjector::project(ledger, forecast, component_id, &self.config)?;
        let offers = ledger.offers_for(component_id)?;

        ReorderDeadlineCalculator::calculate(
            component_id,
            depletion.breach_date,
            &offers,
            self.config.today,
        )
    }

    /// 主計算入口：逐物料推算
    ///
    /// 單一物料失敗只記錄在該列，不中斷其他物料。
    pub fn run<F>(&self, ledger: &InventoryLedger, forecast: &F) -> ReorderReport
    where
        F: ForecastProvider + ?Sized,
    {
        tracing::info!(
            "開始補貨推算：物料 {} 筆，在途 {} 筆，基準日 {}",
            ledger.components().len(),
            ledger.incoming().len(),
            self.config.today
        );

        let start_time = std::time::Instant::now();

        let rows = ledger
            .components()
            .iter()
            .map(|component| {
                let result = self.project_component(ledger, forecast, &component.component_id);
                Self::outcome(component, result)
            })
            .collect();

        let mut report = ReorderReport::from_outcomes(self.config.today, rows);
        report.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!(
            "補貨推算完成，耗時 {:?}，成功 {} 筆，失敗 {} 筆",
            start_time.elapsed(),
            report.projected_count(),
            report.failed_count()
        );

        report
    }

    /// 將推算結果轉為報表列
    pub fn outcome(
        component: &Component,
        result: reorder_core::Result<ProjectionResult>,
    ) -> ComponentOutcome {
        match result {
            Ok(projection) => ComponentOutcome::projected(
                component.component_id.clone(),
                component.description.clone(),
                projection,
            ),
            Err(err) => {
                tracing::warn!("物料 {} 推算失敗: {}", component.component_id, err);
                ComponentOutcome::failed(
                    component.component_id.clone(),
                    component.description.clone(),
                    err.to_string(),
                )
            }
        }
    }

    /// 獲取推算配置
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }
}
