mod states;

use std::path::Path;

use anyhow::Result;
use madeira_engine::device::GpuInit;
use madeira_engine::logging::init_logging;
use madeira_engine::{ApplicationHost, HostConfig, WindowBackend};

use crate::states::TitleState;

const CONFIG_FILE: &str = "madeira.toml";

fn main() -> Result<()> {
    let config = if Path::new(CONFIG_FILE).is_file() {
        HostConfig::load(CONFIG_FILE)?
    } else {
        HostConfig::default().with_title("madeira demo")
    };
    init_logging(&config.logging);

    let backend = WindowBackend::new(&config, GpuInit::default())?;
    let mut host = ApplicationHost::new(config, backend);

    host.change_state(TitleState::default())?;
    host.run()
}
