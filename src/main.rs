use std::io::BufReader;
use std::path::Path;

use anyhow::Result;
use log::info;

use fokuswatch::{JsonlSource, MonitorConfig, MonitorController};

const SETTINGS_FILE: &str = "settings.json";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("fokuswatch starting up...");

    let config = MonitorConfig::load_or_default(Path::new(SETTINGS_FILE));
    let source = JsonlSource::new(BufReader::new(std::io::stdin()), config.motion_threshold);

    let controller = MonitorController::new();
    let cancel_token = controller.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            cancel_token.cancel();
        }
    });

    let summary = controller.run(source, config).await?;
    info!(
        "monitoring ended: {} frames, {} transitions logged, final state {}",
        summary.frames, summary.transitions, summary.final_state
    );

    Ok(())
}
