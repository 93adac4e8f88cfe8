//! The `cfg` command: resolved configuration with the source of each value.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "state_path": {
//!     "value": "luckydraw-state.json",
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources().map_err(|e| {
        tracing::debug!(error = %e, "configuration rejected");
        CliError::Config(format!("Invalid configuration: {}", e))
    })?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "state_path": {
            "value": config.state_path,
            "source": sources.state_path,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "auto_interval_secs": {
            "value": config.auto_interval_secs,
            "source": sources.auto_interval_secs,
        },
        "reveal_delay_ms": {
            "value": config.reveal_delay_ms,
            "source": sources.reveal_delay_ms,
        },
        "poll_interval_ms": {
            "value": config.poll_interval_ms,
            "source": sources.poll_interval_ms,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
