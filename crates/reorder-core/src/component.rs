//! 物料模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ReorderError, Result};

/// 庫存物料（BOM 用量 + 現有庫存 + 安全庫存）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// 物料ID
    pub component_id: String,

    /// 物料說明
    pub description: String,

    /// 每單位成品用量（來自 BOM）
    pub per_unit_ratio: Decimal,

    /// 現有庫存
    pub current_stock: Decimal,

    /// 安全庫存
    pub safety_stock: Decimal,
}

impl Component {
    /// 創建新的物料記錄
    pub fn new(
        component_id: String,
        per_unit_ratio: Decimal,
        current_stock: Decimal,
        safety_stock: Decimal,
    ) -> Self {
        Self {
            component_id,
            description: String::new(),
            per_unit_ratio,
            current_stock,
            safety_stock,
        }
    }

    /// 建構器模式：設置說明
    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    /// 驗證數量欄位：用量比例須為正，庫存與安全庫存不可為負
    pub fn validate(&self) -> Result<()> {
        if self.per_unit_ratio <= Decimal::ZERO {
            return Err(ReorderError::InvalidQuantity(format!(
                "物料 {} 用量比例必須為正：{}",
                self.component_id, self.per_unit_ratio
            )));
        }
        if self.current_stock < Decimal::ZERO {
            return Err(ReorderError::InvalidQuantity(format!(
                "物料 {} 現有庫存為負：{}",
                self.component_id, self.current_stock
            )));
        }
        if self.safety_stock < Decimal::ZERO {
            return Err(ReorderError::InvalidQuantity(format!(
                "物料 {} 安全庫存為負：{}",
                self.component_id, self.safety_stock
            )));
        }
        Ok(())
    }

    /// 當下可建構量
    ///
    /// 以 `per_unit_ratio * current_stock` 計算（乘法，而非除法），
    /// 與既有報表數字保持一致。
    pub fn build_capacity(&self) -> Result<Decimal> {
        self.per_unit_ratio
            .checked_mul(self.current_stock)
            .ok_or_else(|| ReorderError::overflow(format!("物料 {} 的可建構量", self.component_id)))
    }

    /// 檢查可建構量是否已低於安全庫存
    pub fn is_below_safety_stock(&self) -> Result<bool> {
        Ok(self.build_capacity()? < self.safety_stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_component() {
        let component = Component::new(
            "PUMP-1".to_string(),
            Decimal::from(2),
            Decimal::from(50),
            Decimal::from(20),
        )
        .with_description("Infusion pump".to_string());

        assert_eq!(component.component_id, "PUMP-1");
        assert_eq!(component.description, "Infusion pump");
        assert_eq!(component.build_capacity().unwrap(), Decimal::from(100));
        assert!(!component.is_below_safety_stock().unwrap());
    }

    #[test]
    fn test_build_capacity_multiplies_ratio() {
        let component = Component::new(
            "SCREW-4".to_string(),
            Decimal::new(5, 1), // 0.5
            Decimal::from(30),
            Decimal::from(20),
        );

        // 0.5 * 30 = 15 < 20
        assert_eq!(component.build_capacity().unwrap(), Decimal::from(15));
        assert!(component.is_below_safety_stock().unwrap());
    }

    #[test]
    fn test_validate_rejects_negative_quantities() {
        let negative_stock = Component::new(
            "VALVE-2".to_string(),
            Decimal::ONE,
            Decimal::from(-1),
            Decimal::ZERO,
        );
        assert!(matches!(
            negative_stock.validate(),
            Err(ReorderError::InvalidQuantity(_))
        ));

        let negative_floor = Component::new(
            "VALVE-2".to_string(),
            Decimal::ONE,
            Decimal::from(10),
            Decimal::from(-5),
        );
        assert!(negative_floor.validate().is_err());

        let zero_ratio = Component::new(
            "VALVE-2".to_string(),
            Decimal::ZERO,
            Decimal::from(10),
            Decimal::ZERO,
        );
        assert!(zero_ratio.validate().is_err());
    }

    #[test]
    fn test_build_capacity_overflow_is_invalid_quantity() {
        let component = Component::new(
            "PUMP-1".to_string(),
            Decimal::from(2),
            Decimal::MAX,
            Decimal::ZERO,
        );

        assert!(matches!(
            component.build_capacity(),
            Err(ReorderError::InvalidQuantity(_))
        ));
    }
}
