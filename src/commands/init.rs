//! Write a default configuration file

use std::fs;
use std::path::Path;

use bizpulse::config::Config;
use bizpulse::output::{OperationResult, OutputMode};
use bizpulse::paths;

/// Write `bizpulse.toml` (or the `--config` path) with default settings
pub fn init(path: Option<&Path>, force: bool, mode: OutputMode) -> anyhow::Result<()> {
    let default_path = paths::project_config();
    let path = path.unwrap_or(&default_path);

    if path.exists() && !force {
        OperationResult {
            success: false,
            message: format!(
                "Already initialized ({} exists).\nUse --force to overwrite.",
                path.display()
            ),
        }
        .render(mode);
        return Ok(());
    }

    let content = format!(
        "# bizpulse configuration\n#\n# Remove a section to fall back to the built-in defaults.\n\n{}",
        Config::template().to_toml()?
    );
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    log::debug!("wrote {}", path.display());

    OperationResult {
        success: true,
        message: format!("Created {}", path.display()),
    }
    .render(mode);
    Ok(())
}
