// src/bin/summarize_totals.rs
use std::env;
use tob_reform_dashboard::config::AppConfig;
use tob_reform_dashboard::models::{DisplayUnit, ScoringType};
use tob_reform_dashboard::services::format::format_headline;
use tob_reform_dashboard::services::loader::load_data;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let scoring_type = match env::args().nth(1) {
        Some(arg) => arg.parse::<ScoringType>().map_err(anyhow::Error::msg)?,
        None => ScoringType::Static,
    };

    let config = AppConfig::from_env()?;
    let catalog = config.load_catalog()?;
    let dataset = load_data(&config.data_source(), scoring_type, config.parse_policy).await?;

    println!("{} ({} reforms)", scoring_type.label(), dataset.reforms.len());
    for reform_id in dataset.reform_ids() {
        let totals = dataset.totals(reform_id).unwrap_or_default();
        let name = catalog.find(reform_id).map(|r| r.short_name.as_str()).unwrap_or(reform_id);
        println!(
            "{:<24} 10y {:>9} ({:>7} of payroll)   75y {:>9} ({:>7} of payroll)",
            name,
            format_headline(totals.ten_year, DisplayUnit::Billions),
            format_headline(totals.ten_year_pct_payroll, DisplayUnit::PctPayroll),
            format_headline(totals.total, DisplayUnit::Billions),
            format_headline(totals.total_pct_payroll, DisplayUnit::PctPayroll),
        );
    }
    Ok(())
}
