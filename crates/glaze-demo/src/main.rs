mod spinner;

use anyhow::Result;
use glaze_engine::logging::{init_logging, LoggingConfig};
use glaze_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use spinner::Spinner;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "glaze demo".to_string(),
        initial_size: LogicalSize::new(800.0, 600.0),
        ..Default::default()
    };

    log::info!("starting glaze demo");
    Runtime::run(config, Spinner::new())
}
