//! # Reorder Calculation Engine
//!
//! 安全庫存缺口推算與補貨期限計算

pub mod context;
pub mod deadline;
pub mod orders;
pub mod planner;
pub mod projector;
pub mod ranking;

// Re-export 主要類型
pub use context::QueryContext;
pub use deadline::ReorderDeadlineCalculator;
pub use orders::{OrderRecorder, OrderRequest};
pub use planner::ReorderPlanner;
pub use projector::{Depletion, DepletionProjector, MonthProjection};
pub use ranking::{RankedOffer, ReliabilitySource, StaticReliability, SupplierRanking};

use chrono::NaiveDate;
use reorder_core::ProjectionResult;
use serde::{Deserialize, Serialize};

/// 補貨報表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderReport {
    /// 推算基準日
    pub generated_on: NaiveDate,

    /// 每個物料一列
    pub rows: Vec<ComponentOutcome>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl ReorderReport {
    /// 由各物料結果建立報表
    ///
    /// 依距離最後下單日由近到遠排序，失敗的物料排在最後。
    pub fn from_outcomes(generated_on: NaiveDate, mut rows: Vec<ComponentOutcome>) -> Self {
        rows.sort_by_key(|row| match &row.status {
            OutcomeStatus::Projected(result) => (0, result.days_until_trouble),
            OutcomeStatus::Failed { .. } => (1, 0),
        });
        Self {
            generated_on,
            rows,
            calculation_time_ms: None,
        }
    }

    /// 成功推算的物料數
    pub fn projected_count(&self) -> usize {
        self.rows.iter().filter(|r| r.projection().is_some()).count()
    }

    /// 推算失敗的物料數
    pub fn failed_count(&self) -> usize {
        self.rows.len() - self.projected_count()
    }

    /// 查詢單一物料
    pub fn row(&self, component_id: &str) -> Option<&ComponentOutcome> {
        self.rows.iter().find(|r| r.component_id == component_id)
    }
}

/// 單物料推算結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentOutcome {
    pub component_id: String,
    pub description: String,
    pub status: OutcomeStatus,
}

impl ComponentOutcome {
    pub fn projected(component_id: String, description: String, result: ProjectionResult) -> Self {
        Self {
            component_id,
            description,
            status: OutcomeStatus::Projected(result),
        }
    }

    pub fn failed(component_id: String, description: String, error: String) -> Self {
        Self {
            component_id,
            description,
            status: OutcomeStatus::Failed { error },
        }
    }

    pub fn projection(&self) -> Option<&ProjectionResult> {
        match &self.status {
            OutcomeStatus::Projected(result) => Some(result),
            OutcomeStatus::Failed { .. } => None,
        }
    }
}

/// 推算狀態：成功，或明確的錯誤（不以空白或零值表示）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum OutcomeStatus {
    Projected(ProjectionResult),
    Failed { error: String },
}
