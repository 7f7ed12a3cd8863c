//! Log setup. The terminal belongs to the UI, so records go to a file.

use std::fs::{self, File};
use std::path::PathBuf;

use env_logger::{Builder, Target};
use stardrift_config::Config;

/// Log file name inside the platform cache directory.
const LOG_FILE: &str = "stardrift.log";

/// Install a file logger when `RUST_LOG` is set. Returns the log path.
pub fn init() -> color_eyre::Result<Option<PathBuf>> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(None);
    }

    let dirs = Config::project_dirs()?;
    let dir = dirs.cache_dir();
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = File::create(&path)?;

    Builder::from_default_env()
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(Some(path))
}
