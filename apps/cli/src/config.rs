use std::path::{Path, PathBuf};

use log::LevelFilter;

use crate::cli::Cli;

const APP_DIR_NAME: &str = "valueof";

/// Runtime settings resolved from flags, environment and platform defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub api_url: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone().unwrap_or_else(default_data_dir),
            api_url: cli.api_url.trim().trim_end_matches('/').to_string(),
            log_level: log_level(cli.verbose),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// `<platform data dir>/valueof`, or `./valueof` when the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger. `RUST_LOG` takes precedence over `-v`.
pub fn init_logging(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.parse_env(env_logger::Env::default());
    let _ = builder.try_init();
}
