use std::path::Path;

use anyhow::Result;
use chrono::Local;
use log::info;

use fokuswatch::analysis::{read_log, ActivityTables, AnalysisReport};
use fokuswatch::config::MonitorConfig;

const REPORT_DIR: &str = "reports";
const SETTINGS_FILE: &str = "settings.json";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = MonitorConfig::load_or_default(Path::new(SETTINGS_FILE));
    let entries = read_log(&config.log_file)?;

    let tables = ActivityTables::from_entries(&entries);
    let report = AnalysisReport::build(&entries, &tables);

    print!("{}", report.render());

    let path = report.write_to_dir(Path::new(REPORT_DIR), Local::now().naive_local())?;
    info!("analysis saved to {}", path.display());

    Ok(())
}
