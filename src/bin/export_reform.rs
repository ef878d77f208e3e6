// src/bin/export_reform.rs
// Usage: export_reform <static|dynamic> <reform_id>
use std::env;
use tob_reform_dashboard::config::AppConfig;
use tob_reform_dashboard::models::ScoringType;
use tob_reform_dashboard::services::export::{export_file_name, export_to_csv};
use tob_reform_dashboard::services::loader::load_data;
use tob_reform_dashboard::BoxError;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        return Err("usage: export_reform <static|dynamic> <reform_id>".into());
    }
    let scoring_type: ScoringType = args[1].parse()?;
    let reform_id = &args[2];

    let config = AppConfig::from_env()?;
    let catalog = config.load_catalog()?;
    let dataset = load_data(&config.data_source(), scoring_type, config.parse_policy).await?;

    let series = dataset
        .series(reform_id)
        .ok_or_else(|| format!("No {} results for reform '{}'", scoring_type, reform_id))?;
    let reform_name = catalog
        .find(reform_id)
        .map(|r| r.name.as_str())
        .unwrap_or(reform_id.as_str());

    eprintln!("Writing {}", export_file_name(reform_id));
    print!("{}", export_to_csv(series, reform_name)?);
    Ok(())
}
