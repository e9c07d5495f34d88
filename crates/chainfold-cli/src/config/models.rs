use chainfold::engine::config as core_config;
use std::path::PathBuf;

pub struct AppConfig {
    pub output_prefix: PathBuf,
    pub core_config: core_config::SimulationConfig,
}
