//! 命令列介面

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use reorder_cache::ReorderSession;
use reorder_calc::{OrderRequest, OutcomeStatus, ReliabilitySource, ReorderReport};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::loader;

#[derive(Parser, Debug)]
#[command(
    name = "reorder",
    about = "Project safety-stock breaches and reorder deadlines for stocked components",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// 覆寫環境配置的全域參數
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Directory holding the reference CSV tables
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Projection date (YYYY-MM-DD, defaults to the local date)
    #[arg(long, global = true, value_parser = parse_date)]
    pub today: Option<NaiveDate>,

    /// Maximum number of months to simulate before giving up
    #[arg(long, global = true)]
    pub horizon_months: Option<u32>,

    /// Log level when RUST_LOG is not set
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Seed for reliability scores missing from supplier_reliability.csv
    #[arg(long, global = true)]
    pub reliability_seed: Option<u64>,
}

impl ConfigOverrides {
    /// 將命令列參數套用到配置
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(today) = self.today {
            config.today = Some(today);
        }
        if let Some(months) = self.horizon_months {
            config.horizon_months = months;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(seed) = self.reliability_seed {
            config.reliability_seed = seed;
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Reorder deadline for every component (default command)
    Report {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suppliers for a component ranked by reliability
    Suppliers { item_id: String },
    /// Month-by-month depletion trace for a component
    Trace { item_id: String },
    /// Submit a reorder and show the updated projection
    Order {
        item_id: String,
        supplier_id: String,
        /// Multiple of the supplier's standard reorder quantity
        multiplier: Decimal,
    },
    /// Tables and report as JSON for the natural-language query service
    Context,
}

/// 執行命令
pub fn run(cli: Cli, config: &AppConfig) -> Result<()> {
    let sources = loader::load_dir(&config.data_dir, config.reliability_seed)?;
    let mut session = ReorderSession::new(
        sources.ledger,
        sources.forecast,
        sources.reliability,
        config.projection(),
    );

    match cli.command.unwrap_or(Command::Report { json: false }) {
        Command::Report { json } => {
            let report = session.report();
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Command::Suppliers { item_id } => print_suppliers(&mut session, &item_id)?,
        Command::Trace { item_id } => {
            let depletion = session.depletion(&item_id)?;
            println!("{}  缺口日 {}", depletion.component_id, depletion.breach_date);
            println!(
                "{:<8} {:>12} {:>10} {:>10} {:>12} {:>8}",
                "月份", "月初", "到貨", "用量", "月底", "窗口"
            );
            for month in &depletion.trace {
                println!(
                    "{:<8} {:>12} {:>10} {:>10} {:>12} {:>8}",
                    month.period.to_string(),
                    month.opening_capacity,
                    month.incoming,
                    month.usage,
                    month.closing_capacity,
                    month.cutoff_days
                );
            }
        }
        Command::Order {
            item_id,
            supplier_id,
            multiplier,
        } => {
            let request = OrderRequest::new(item_id.clone(), supplier_id, multiplier);
            let record = session.submit_order(&request)?;
            println!(
                "已提交 {}: {} 件，供應商 {}，{} 天後到貨",
                record.component_id, record.quantity, record.supplier_id, record.arrival_offset_days
            );
            let projection = session.project(&item_id)?;
            println!(
                "更新後最後下單日 {}（{:?}，尚餘 {} 天）",
                projection.last_order_date, projection.urgency, projection.days_until_trouble
            );
        }
        Command::Context => {
            println!("{}", session.query_context().to_json_pretty()?);
        }
    }

    Ok(())
}

fn print_report(report: &ReorderReport) {
    println!("基準日 {}", report.generated_on);
    println!(
        "{:<12} {:<24} {:>12} {:>12} {:>8}  {}",
        "物料", "說明", "缺口日", "最後下單日", "剩餘天數", "狀態"
    );
    for row in &report.rows {
        match &row.status {
            OutcomeStatus::Projected(result) => println!(
                "{:<12} {:<24} {:>12} {:>12} {:>8}  {:?} ({})",
                row.component_id,
                row.description,
                result.breach_date.to_string(),
                result.last_order_date.to_string(),
                result.days_until_trouble,
                result.urgency,
                result.urgency.color()
            ),
            OutcomeStatus::Failed { error } => {
                println!("{:<12} {:<24} 推算失敗: {}", row.component_id, row.description, error)
            }
        }
    }
}

fn print_suppliers<R: ReliabilitySource>(
    session: &mut ReorderSession<R>,
    item_id: &str,
) -> Result<()> {
    let ranked = session.suppliers(item_id)?;
    println!(
        "{:<10} {:<24} {:>8} {:>10} {:>12}  {}",
        "供應商", "名稱", "可靠度", "標準量", "預計到貨", "可下單"
    );
    for offer in &ranked {
        let arrival = offer
            .expected_arrival
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:<24} {:>8.0} {:>10} {:>12}  {}",
            offer.offer.supplier_id,
            offer.offer.supplier_name,
            offer.reliability,
            offer.offer.reorder_quantity,
            arrival,
            if offer.can_order() { "是" } else { "否" }
        );
    }
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
