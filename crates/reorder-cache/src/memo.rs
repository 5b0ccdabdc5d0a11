//! 推算結果記憶化
//!
//! 以輸入的雜湊（物料ID、在途版本號、推算配置）為鍵保存結果；
//! 失效只發生在提交補貨單這一條路徑上。

use reorder_core::{InventoryLedger, ProjectionConfig, ProjectionResult};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// 快取鍵
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectionKey(u64);

impl ProjectionKey {
    /// 由推算輸入計算快取鍵
    pub fn new(ledger: &InventoryLedger, component_id: &str, config: &ProjectionConfig) -> Self {
        let mut hasher = DefaultHasher::new();
        component_id.hash(&mut hasher);
        ledger.revision(component_id).hash(&mut hasher);
        config.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// 推算結果快取
#[derive(Debug, Default)]
pub struct ProjectionCache {
    entries: HashMap<ProjectionKey, reorder_core::Result<ProjectionResult>>,
    /// 物料ID → 該物料的快取鍵
    keys_by_component: HashMap<String, Vec<ProjectionKey>>,
    hits: u64,
    misses: u64,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 查詢快取，未命中時以 `compute` 計算並保存
    ///
    /// 失敗結果也會保存，帳本未變動前重算只會得到相同錯誤。
    pub fn get_or_compute(
        &mut self,
        key: ProjectionKey,
        component_id: &str,
        compute: impl FnOnce() -> reorder_core::Result<ProjectionResult>,
    ) -> reorder_core::Result<ProjectionResult> {
        if let Some(cached) = self.entries.get(&key) {
            self.hits += 1;
            tracing::debug!("物料 {} 快取命中", component_id);
            return cached.clone();
        }

        self.misses += 1;
        tracing::debug!("物料 {} 快取未命中，重新推算", component_id);
        let result = compute();
        self.entries.insert(key, result.clone());
        self.keys_by_component
            .entry(component_id.to_string())
            .or_default()
            .push(key);
        result
    }

    /// 清除單一物料的所有快取，回傳清除筆數
    pub fn invalidate(&mut self, component_id: &str) -> usize {
        let keys = self.keys_by_component.remove(component_id).unwrap_or_default();
        for key in &keys {
            self.entries.remove(key);
        }
        tracing::debug!("物料 {} 快取失效 {} 筆", component_id, keys.len());
        keys.len()
    }

    /// 清除全部快取
    pub fn clear(&mut self) {
        self.entries.clear();
        self.keys_by_component.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
