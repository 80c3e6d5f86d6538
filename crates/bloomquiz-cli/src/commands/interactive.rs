//! The `bloomquiz interactive` command (also the default).

use std::io;
use std::path::PathBuf;

use anyhow::Result;

use crate::config::load_config_from;
use crate::console::Session;

/// Command-line switches that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub no_clear: bool,
    pub no_pause: bool,
}

pub fn execute(config_path: Option<PathBuf>, overrides: Overrides) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if overrides.no_clear {
        config.clear_screen = false;
    }
    if overrides.no_pause {
        config.pause_after_action = false;
    }
    tracing::debug!(?config, "starting interactive session");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), config);
    session.run()
}
