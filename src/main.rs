use anyhow::Result;
use clap::Parser;
use reorder::cli::{self, Cli};
use reorder::{logging, AppConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    cli.overrides.apply(&mut config);

    logging::init(&config.log_level)?;
    tracing::debug!(?config, "配置載入完成");

    cli::run(cli, &config)
}
