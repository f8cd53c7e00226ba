// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./autoshorts.toml` > `~/.config/autoshorts/autoshorts.toml`
//! > `/etc/autoshorts/autoshorts.toml` with environment variable overrides via
//! the `AUTOSHORTS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::AutoshortsConfig;

/// System-wide config file location.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/autoshorts/autoshorts.toml";

/// Local config file name, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = "autoshorts.toml";

/// Config sections that env var keys are mapped onto.
const SECTIONS: &[&str] = &[
    "pipeline",
    "trends",
    "openai",
    "replicate",
    "youtube",
    "gateway",
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/autoshorts/autoshorts.toml` (system-wide)
/// 3. `~/.config/autoshorts/autoshorts.toml` (user XDG config)
/// 4. `./autoshorts.toml` (local directory)
/// 5. `AUTOSHORTS_*` environment variables
pub fn load_config() -> Result<AutoshortsConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<AutoshortsConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AutoshortsConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AutoshortsConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AutoshortsConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AutoshortsConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("autoshorts").join(LOCAL_CONFIG_FILE))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `AUTOSHORTS_YOUTUBE_REFRESH_TOKEN` must map to
/// `youtube.refresh_token`, not `youtube.refresh.token`.
fn env_provider() -> Env {
    Env::prefixed("AUTOSHORTS_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a lowercased, prefix-stripped env key onto its dotted config path.
fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(
            map_env_key("youtube_refresh_token"),
            "youtube.refresh_token"
        );
        assert_eq!(
            map_env_key("pipeline_default_region"),
            "pipeline.default_region"
        );
        assert_eq!(map_env_key("unrelated"), "unrelated");
    }

    #[test]
    fn env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
[pipeline]
default_region = "DE"

[gateway]
port = 8080
"#,
            )?;
            jail.set_env("AUTOSHORTS_PIPELINE_DEFAULT_REGION", "GB");
            jail.set_env("AUTOSHORTS_OPENAI_API_KEY", "sk-test");

            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.pipeline.default_region, "GB");
            assert_eq!(config.gateway.port, 8080);
            assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
            Ok(())
        });
    }
}
