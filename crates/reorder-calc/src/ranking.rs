//! 供應商排序
//!
//! 可靠度分數由外部提供（0–100），本模組只負責排序與到貨判斷。

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reorder_core::{InventoryLedger, ReorderError, SupplierOffer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 可靠度來源
pub trait ReliabilitySource {
    /// 報價的可靠度分數（0–100）
    fn score(&self, offer: &SupplierOffer) -> reorder_core::Result<f64>;
}

/// 固定的可靠度表（物料ID, 供應商ID）→ 分數
#[derive(Debug, Clone, Default)]
pub struct StaticReliability {
    scores: HashMap<(String, String), f64>,
}

impl StaticReliability {
    pub fn new() -> Self {
        Self::default()
    }

    /// 設置分數（截斷到 0–100）
    pub fn insert(&mut self, component_id: &str, supplier_id: &str, score: f64) {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 100.0) };
        self.scores
            .insert((component_id.to_string(), supplier_id.to_string()), score);
    }

    /// 建構器模式：設置分數
    pub fn with_score(mut self, component_id: &str, supplier_id: &str, score: f64) -> Self {
        self.insert(component_id, supplier_id, score);
        self
    }

    /// 以固定種子為每筆報價抽一個 0–100 的整數分數
    ///
    /// 抽取順序依報價輸入順序，同種子同資料得到相同分數。
    pub fn seeded(seed: u64, offers: &[SupplierOffer]) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut reliability = Self::new();
        for offer in offers {
            let score = rng.gen_range(0..=100) as f64;
            reliability.insert(&offer.component_id, &offer.supplier_id, score);
        }
        reliability
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl ReliabilitySource for StaticReliability {
    fn score(&self, offer: &SupplierOffer) -> reorder_core::Result<f64> {
        self.scores
            .get(&(offer.component_id.clone(), offer.supplier_id.clone()))
            .copied()
            .ok_or_else(|| {
                ReorderError::NotFound(format!(
                    "供應商 {} 對物料 {} 的可靠度",
                    offer.supplier_id, offer.component_id
                ))
            })
    }
}

/// 排序後的供應商報價
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOffer {
    pub offer: SupplierOffer,

    /// 可靠度分數
    pub reliability: f64,

    /// 今日下單的預計到貨日
    pub expected_arrival: Option<NaiveDate>,

    /// 是否能在缺口日之前到貨（未知缺口日時為 `None`）
    pub arrives_before_breach: Option<bool>,
}

impl RankedOffer {
    /// 是否允許下單：到貨晚於缺口日時不允許
    pub fn can_order(&self) -> bool {
        self.arrives_before_breach.unwrap_or(true)
    }
}

/// 供應商排序器
pub struct SupplierRanking;

impl SupplierRanking {
    /// 依可靠度由高到低排序物料的所有報價
    ///
    /// 同分時維持輸入順序（穩定排序）。任一報價查無分數時整個排序回傳 `NotFound`。
    pub fn rank<R>(
        ledger: &InventoryLedger,
        component_id: &str,
        reliability: &R,
        today: NaiveDate,
        breach_date: Option<NaiveDate>,
    ) -> reorder_core::Result<Vec<RankedOffer>>
    where
        R: ReliabilitySource + ?Sized,
    {
        let mut ranked = ledger
            .offers_for(component_id)?
            .into_iter()
            .map(|offer| -> reorder_core::Result<RankedOffer> {
                let score = reliability.score(offer)?;
                let expected_arrival = offer.expected_arrival(today);
                let arrives_before_breach = match (expected_arrival, breach_date) {
                    (Some(arrival), Some(breach)) => Some(arrival <= breach),
                    _ => None,
                };
                Ok(RankedOffer {
                    offer: offer.clone(),
                    reliability: score,
                    expected_arrival,
                    arrives_before_breach,
                })
            })
            .collect::<reorder_core::Result<Vec<_>>>()?;

        ranked.sort_by(|a, b| b.reliability.total_cmp(&a.reliability));

        tracing::debug!("物料 {} 供應商排序: {} 家", component_id, ranked.len());
        Ok(ranked)
    }
}
