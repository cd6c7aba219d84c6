// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{LineageError, Result};
use crate::tasks::discovery::build_globset;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = LineageError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.analysis, raw.discovery, raw.colors))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_discovery(cfg)?;
    validate_colors(cfg)?;
    Ok(())
}

fn validate_discovery(cfg: &RawConfigFile) -> Result<()> {
    if cfg.discovery.include.is_empty() {
        return Err(LineageError::ConfigError(
            "[discovery].include must contain at least one pattern".to_string(),
        ));
    }

    build_globset(&cfg.discovery.include)
        .map_err(|e| LineageError::ConfigError(format!("[discovery].include: {e:#}")))?;
    build_globset(&cfg.discovery.exclude)
        .map_err(|e| LineageError::ConfigError(format!("[discovery].exclude: {e:#}")))?;

    Ok(())
}

fn validate_colors(cfg: &RawConfigFile) -> Result<()> {
    for (level, color) in cfg.colors.iter() {
        if !is_hex_color(color) {
            return Err(LineageError::ConfigError(format!(
                "[colors].{} must be a hex colour like \"#A1B2C3\" (got \"{}\")",
                level, color
            )));
        }
    }
    Ok(())
}

/// `#RRGGBB` or `#RRGGBBAA`.
fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}
