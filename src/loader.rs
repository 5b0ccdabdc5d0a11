//! 參考資料載入
//!
//! 從資料目錄讀取六張 CSV 參考表，組裝成帳本、用量預測與可靠度表。

use anyhow::{Context, Result};
use reorder_calc::StaticReliability;
use reorder_core::snapshot::{
    BomRow, CurrentStockRow, IncomingPoRow, SafetyStockRow, SupplierRow, UsageForecastRow,
};
use reorder_core::{
    Component, IncomingSupplyRecord, InventoryLedger, ReorderError, SupplierOffer, UsageForecast,
    UsageForecastEntry, YearMonth,
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const BOM_FILE: &str = "bom.csv";
pub const CURRENT_STOCK_FILE: &str = "current_stock.csv";
pub const INCOMING_PO_FILE: &str = "incoming_po.csv";
pub const SAFETY_STOCK_FILE: &str = "safety_stock.csv";
pub const SUPPLIER_LIST_FILE: &str = "supplier_list.csv";
pub const USAGE_FORECAST_FILE: &str = "usage_forecast.csv";
pub const RELIABILITY_FILE: &str = "supplier_reliability.csv";

/// 供應商可靠度列（選用表）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReliabilityRow {
    #[serde(rename = "Item ID")]
    pub item_id: String,
    #[serde(rename = "Supplier ID")]
    pub supplier_id: String,
    #[serde(rename = "Reliability")]
    pub reliability: f64,
}

/// 已解析、尚未組裝的參考表
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub bom: Vec<BomRow>,
    pub current_stock: Vec<CurrentStockRow>,
    pub incoming_po: Vec<IncomingPoRow>,
    pub safety_stock: Vec<SafetyStockRow>,
    pub supplier_list: Vec<SupplierRow>,
    pub usage_forecast: Vec<UsageForecastRow>,
    pub reliability: Option<Vec<ReliabilityRow>>,
}

/// 組裝完成的資料來源
#[derive(Debug, Clone)]
pub struct DataSources {
    pub ledger: InventoryLedger,
    pub forecast: UsageForecast,
    pub reliability: StaticReliability,
}

/// 讀取一張 CSV 表
///
/// `table` 只用於錯誤訊息；解析錯誤帶有行號。
pub fn read_rows<T, R>(reader: R, table: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in csv_reader.deserialize::<T>().enumerate() {
        // 表頭為第 1 行
        let row = record.with_context(|| format!("{} 第 {} 行解析失敗", table, i + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

fn read_file<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>> {
    let path = dir.join(name);
    let file = File::open(&path).with_context(|| format!("無法開啟 {}", path.display()))?;
    read_rows(file, name)
}

/// 從資料目錄載入
///
/// 每筆報價先以 `seed` 抽取可靠度，`supplier_reliability.csv` 存在時再以表中分數覆寫。
pub fn load_dir(dir: &Path, seed: u64) -> Result<DataSources> {
    tracing::info!("載入參考資料: {}", dir.display());

    let reliability_path = dir.join(RELIABILITY_FILE);
    let reliability = if reliability_path.exists() {
        Some(read_file(dir, RELIABILITY_FILE)?)
    } else {
        tracing::debug!("{} 不存在，使用種子 {} 產生可靠度", RELIABILITY_FILE, seed);
        None
    };

    let tables = RawTables {
        bom: read_file(dir, BOM_FILE)?,
        current_stock: read_file(dir, CURRENT_STOCK_FILE)?,
        incoming_po: read_file(dir, INCOMING_PO_FILE)?,
        safety_stock: read_file(dir, SAFETY_STOCK_FILE)?,
        supplier_list: read_file(dir, SUPPLIER_LIST_FILE)?,
        usage_forecast: read_file(dir, USAGE_FORECAST_FILE)?,
        reliability,
    };

    assemble(tables, seed)
}

/// 由參考表組裝帳本、預測與可靠度
pub fn assemble(tables: RawTables, seed: u64) -> Result<DataSources> {
    let stock: HashMap<&str, Decimal> = tables
        .current_stock
        .iter()
        .map(|r| (r.item_id.as_str(), r.current_stock))
        .collect();
    let safety: HashMap<&str, Decimal> = tables
        .safety_stock
        .iter()
        .map(|r| (r.item_id.as_str(), r.safety_stock))
        .collect();

    let mut ledger = InventoryLedger::new();
    for row in &tables.bom {
        let current_stock = stock.get(row.item_id.as_str()).copied().ok_or_else(|| {
            ReorderError::NotFound(format!("物料 {} 的現有庫存", row.item_id))
        })?;
        let safety_stock = safety.get(row.item_id.as_str()).copied().ok_or_else(|| {
            ReorderError::NotFound(format!("物料 {} 的安全庫存", row.item_id))
        })?;

        ledger
            .add_component(
                Component::new(row.item_id.clone(), row.quantity, current_stock, safety_stock)
                    .with_description(row.description.clone()),
            )
            .with_context(|| format!("{} 物料 {}", BOM_FILE, row.item_id))?;
    }

    for row in &tables.supplier_list {
        if ledger.component(&row.item_id).is_err() {
            tracing::warn!("{}: 物料 {} 不在 BOM 中，略過", SUPPLIER_LIST_FILE, row.item_id);
            continue;
        }
        ledger
            .add_offer(
                SupplierOffer::new(
                    row.item_id.clone(),
                    row.supplier_id.clone(),
                    row.lead_time_days,
                    row.reorder_quantity,
                )
                .with_supplier_name(row.supplier_name.clone()),
            )
            .with_context(|| format!("{} 物料 {}", SUPPLIER_LIST_FILE, row.item_id))?;
    }

    for row in &tables.incoming_po {
        if ledger.component(&row.item_id).is_err() {
            tracing::warn!("{}: 物料 {} 不在 BOM 中，略過", INCOMING_PO_FILE, row.item_id);
            continue;
        }
        ledger.append_incoming(
            IncomingSupplyRecord::new(
                row.item_id.clone(),
                row.stock_due,
                row.arrive_time_days,
                row.supplier_id.clone(),
            )
            .with_description(row.description.clone()),
        )?;
    }

    let forecast = build_forecast(&ledger, &tables.usage_forecast)?
        .with_source_rows(tables.usage_forecast.clone());

    // 可靠度表未列出的報價沿用種子抽出的分數
    let mut reliability = StaticReliability::seeded(seed, ledger.offers());
    for row in tables.reliability.iter().flatten() {
        reliability.insert(&row.item_id, &row.supplier_id, row.reliability);
    }

    tracing::info!(
        "載入完成：物料 {} 筆，報價 {} 筆，在途 {} 筆，預測 {} 筆",
        ledger.components().len(),
        ledger.offers().len(),
        ledger.incoming().len(),
        forecast.len()
    );

    Ok(DataSources {
        ledger,
        forecast,
        reliability,
    })
}

/// 組裝用量預測
///
/// 不帶 `Item ID` 的列是成品預測，套用到 BOM 中每個物料。
fn build_forecast(ledger: &InventoryLedger, rows: &[UsageForecastRow]) -> Result<UsageForecast> {
    let mut forecast = UsageForecast::new();

    for row in rows {
        let period = YearMonth::new(row.year, row.month)
            .with_context(|| format!("{} 的期間 {}-{}", USAGE_FORECAST_FILE, row.year, row.month))?;

        let targets: Vec<&str> = match &row.item_id {
            Some(item_id) => vec![item_id.as_str()],
            None => ledger
                .components()
                .iter()
                .map(|c| c.component_id.as_str())
                .collect(),
        };

        for component_id in targets {
            forecast
                .add_entry(UsageForecastEntry::new(
                    component_id.to_string(),
                    period,
                    row.usage,
                ))
                .with_context(|| format!("{} 物料 {}", USAGE_FORECAST_FILE, component_id))?;
        }
    }

    Ok(forecast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reorder_calc::ReliabilitySource;

    const BOM: &str = "Item ID,Description,Quantity\nPUMP-1,Infusion pump,2\nVALVE-2,Check valve,1\n";
    const STOCK: &str = "Item ID,Current Stock\nPUMP-1,50\nVALVE-2,500\n";
    const SAFETY: &str = "Item ID,Safety Stock\nPUMP-1,20\nVALVE-2,10\n";
    const SUPPLIERS: &str = "Item ID,Supplier ID,Supplier Name,Reorder Quantity,Lead Time (days)\n\
        PUMP-1,SUP-07,Rajit's Pumps,25,10\n\
        VALVE-2,SUP-09,Valve Works,100,14\n\
        GHOST-9,SUP-09,Valve Works,1,1\n";
    const INCOMING: &str = "Item ID,Description,Stock Due,Arrive Time (days),Supplier ID\n\
        PUMP-1,Infusion pump,40,-2,SUP-07\n";
    const FORECAST: &str = "Month,Year,Usage\n10,2025,30\n11,2025,30\n";

    fn tables() -> RawTables {
        RawTables {
            bom: read_rows(BOM.as_bytes(), BOM_FILE).unwrap(),
            current_stock: read_rows(STOCK.as_bytes(), CURRENT_STOCK_FILE).unwrap(),
            incoming_po: read_rows(INCOMING.as_bytes(), INCOMING_PO_FILE).unwrap(),
            safety_stock: read_rows(SAFETY.as_bytes(), SAFETY_STOCK_FILE).unwrap(),
            supplier_list: read_rows(SUPPLIERS.as_bytes(), SUPPLIER_LIST_FILE).unwrap(),
            usage_forecast: read_rows(FORECAST.as_bytes(), USAGE_FORECAST_FILE).unwrap(),
            reliability: None,
        }
    }

    #[test]
    fn test_assemble_reference_tables() {
        let sources = assemble(tables(), 7).unwrap();
        let ledger = &sources.ledger;

        let pump = ledger.component("PUMP-1").unwrap();
        assert_eq!(pump.description, "Infusion pump");
        assert_eq!(pump.build_capacity().unwrap(), Decimal::from(100));

        // GHOST-9 不在 BOM，略過
        assert_eq!(ledger.offers().len(), 2);
        assert_eq!(ledger.incoming_for("PUMP-1").unwrap()[0].arrival_offset_days, -2);

        // 無 Item ID 的預測套用到每個物料
        assert_eq!(sources.forecast.len(), 4);
        assert_eq!(sources.reliability.len(), 2);
    }

    #[test]
    fn test_keyed_forecast_applies_to_one_component() {
        let mut raw = tables();
        raw.usage_forecast = read_rows(
            "Item ID,Month,Year,Usage\nVALVE-2,12,2025,8\n".as_bytes(),
            USAGE_FORECAST_FILE,
        )
        .unwrap();

        let sources = assemble(raw, 0).unwrap();
        let entries = sources.forecast.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].component_id, "VALVE-2");
    }

    #[test]
    fn test_missing_safety_row_is_not_found() {
        let mut raw = tables();
        raw.safety_stock.retain(|r| r.item_id != "VALVE-2");

        let err = assemble(raw, 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReorderError>(),
            Some(ReorderError::NotFound(_))
        ));
    }

    #[test]
    fn test_reliability_table_overrides_seed() {
        let mut raw = tables();
        raw.reliability = Some(
            read_rows(
                "Item ID,Supplier ID,Reliability\nPUMP-1,SUP-07,88\nVALVE-2,SUP-09,41.5\n"
                    .as_bytes(),
                RELIABILITY_FILE,
            )
            .unwrap(),
        );

        let sources = assemble(raw, 0).unwrap();
        let offer = sources.ledger.offer("VALVE-2", "SUP-09").unwrap();
        assert_eq!(sources.reliability.score(offer).unwrap(), 41.5);
    }

    #[test]
    fn test_partial_reliability_table_falls_back_to_seed() {
        let seeded = assemble(tables(), 5).unwrap();

        let mut raw = tables();
        raw.reliability = Some(
            read_rows(
                "Item ID,Supplier ID,Reliability\nVALVE-2,SUP-09,41.5\n".as_bytes(),
                RELIABILITY_FILE,
            )
            .unwrap(),
        );
        let sources = assemble(raw, 5).unwrap();

        let pump = sources.ledger.offer("PUMP-1", "SUP-07").unwrap();
        assert_eq!(
            sources.reliability.score(pump).unwrap(),
            seeded.reliability.score(pump).unwrap()
        );
        let valve = sources.ledger.offer("VALVE-2", "SUP-09").unwrap();
        assert_eq!(sources.reliability.score(valve).unwrap(), 41.5);
    }

    #[test]
    fn test_forecast_table_rows_stay_as_loaded() {
        let sources = assemble(tables(), 0).unwrap();

        let rows = sources.forecast.table_rows();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.item_id.is_none()));
    }

    #[test]
    fn test_parse_error_reports_line() {
        let broken = "Item ID,Current Stock\nPUMP-1,50\nVALVE-2,lots\n";
        let err = read_rows::<CurrentStockRow, _>(broken.as_bytes(), CURRENT_STOCK_FILE).unwrap_err();
        assert!(err.to_string().contains("第 3 行"));
    }
}
