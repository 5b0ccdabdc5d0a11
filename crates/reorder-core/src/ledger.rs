//! 庫存帳本
//!
//! 保存 BOM 用量、現有庫存、安全庫存、供應商報價與在途供應。
//! 在途供應只能追加；追加後同一行程內的後續讀取立即可見。

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::component::Component;
use crate::supplier::SupplierOffer;
use crate::supply::IncomingSupplyRecord;
use crate::{ReorderError, Result};

/// 庫存帳本
#[derive(Debug, Clone, Default)]
pub struct InventoryLedger {
    /// 物料（保留輸入順序）
    components: Vec<Component>,

    /// 物料ID → components 索引
    index: HashMap<String, usize>,

    /// 供應商報價
    offers: Vec<SupplierOffer>,

    /// 在途供應（只追加）
    incoming: Vec<IncomingSupplyRecord>,

    /// 每個物料的在途版本號，每次追加 +1
    revisions: HashMap<String, u64>,
}

impl InventoryLedger {
    /// 創建空帳本
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加物料
    pub fn add_component(&mut self, component: Component) -> Result<()> {
        component.validate()?;
        if self.index.contains_key(&component.component_id) {
            return Err(ReorderError::Duplicate(format!(
                "物料 {}",
                component.component_id
            )));
        }

        self.index
            .insert(component.component_id.clone(), self.components.len());
        self.components.push(component);
        Ok(())
    }

    /// 添加供應商報價
    pub fn add_offer(&mut self, offer: SupplierOffer) -> Result<()> {
        self.component(&offer.component_id)?;
        if offer.lead_time_days < 0 {
            return Err(ReorderError::InvalidQuantity(format!(
                "供應商 {} 對物料 {} 的交期為負：{}",
                offer.supplier_id, offer.component_id, offer.lead_time_days
            )));
        }
        self.offers.push(offer);
        Ok(())
    }

    /// 追加在途供應
    pub fn append_incoming(&mut self, record: IncomingSupplyRecord) -> Result<()> {
        self.component(&record.component_id)?;
        *self
            .revisions
            .entry(record.component_id.clone())
            .or_insert(0) += 1;
        self.incoming.push(record);
        Ok(())
    }

    /// 查詢物料
    pub fn component(&self, component_id: &str) -> Result<&Component> {
        self.index
            .get(component_id)
            .map(|&i| &self.components[i])
            .ok_or_else(|| ReorderError::component_not_found(component_id))
    }

    /// 所有物料（輸入順序）
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// 所有供應商報價
    pub fn offers(&self) -> &[SupplierOffer] {
        &self.offers
    }

    /// 所有在途供應
    pub fn incoming(&self) -> &[IncomingSupplyRecord] {
        &self.incoming
    }

    /// 物料的供應商報價（輸入順序），物料不存在時回傳 `NotFound`
    pub fn offers_for(&self, component_id: &str) -> Result<Vec<&SupplierOffer>> {
        self.component(component_id)?;
        Ok(self
            .offers
            .iter()
            .filter(|o| o.component_id == component_id)
            .collect())
    }

    /// 查詢指定供應商對物料的報價
    pub fn offer(&self, component_id: &str, supplier_id: &str) -> Result<&SupplierOffer> {
        self.offers_for(component_id)?
            .into_iter()
            .find(|o| o.supplier_id == supplier_id)
            .ok_or_else(|| {
                ReorderError::NotFound(format!(
                    "供應商 {} 對物料 {} 的報價",
                    supplier_id, component_id
                ))
            })
    }

    /// 物料的在途供應
    pub fn incoming_for(&self, component_id: &str) -> Result<Vec<&IncomingSupplyRecord>> {
        self.component(component_id)?;
        Ok(self
            .incoming
            .iter()
            .filter(|r| r.component_id == component_id)
            .collect())
    }

    /// 到貨日落在 (after, up_to] 的在途數量合計
    ///
    /// `after` 為 `None` 表示不設下限。
    pub fn incoming_between(
        &self,
        component_id: &str,
        after: Option<i64>,
        up_to: i64,
    ) -> Result<Decimal> {
        let records = self.incoming_for(component_id)?;
        sum_quantities(
            component_id,
            records.into_iter().filter(|r| r.arrives_within(after, up_to)),
        )
    }

    /// 已下單（全部在途）數量
    pub fn on_order_quantity(&self, component_id: &str) -> Result<Decimal> {
        let records = self.incoming_for(component_id)?;
        sum_quantities(component_id, records)
    }

    /// 物料的在途版本號
    pub fn revision(&self, component_id: &str) -> u64 {
        self.revisions.get(component_id).copied().unwrap_or(0)
    }
}

fn sum_quantities<'a>(
    component_id: &str,
    records: impl IntoIterator<Item = &'a IncomingSupplyRecord>,
) -> Result<Decimal> {
    records.into_iter().try_fold(Decimal::ZERO, |total, r| {
        total
            .checked_add(r.quantity)
            .ok_or_else(|| ReorderError::overflow(format!("物料 {} 的在途數量合計", component_id)))
    })
}
