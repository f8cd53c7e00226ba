// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as model identifier shape, polling bounds, and non-empty regions.

use crate::diagnostic::ConfigError;
use crate::model::AutoshortsConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AutoshortsConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.pipeline.default_region.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "pipeline.default_region must not be empty".to_string(),
        });
    }

    if config.trends.max_topics == 0 {
        errors.push(ConfigError::Validation {
            message: "trends.max_topics must be at least 1".to_string(),
        });
    }

    if config.openai.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.model must not be empty".to_string(),
        });
    }

    if !is_valid_model_identifier(&config.replicate.model) {
        errors.push(ConfigError::Validation {
            message: format!(
                "replicate.model `{}` must look like `owner/name` or `owner/name:version`",
                config.replicate.model
            ),
        });
    }

    if config.replicate.poll_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "replicate.poll_interval_secs must be at least 1".to_string(),
        });
    }

    if config.replicate.max_wait_secs < config.replicate.poll_interval_secs {
        errors.push(ConfigError::Validation {
            message: format!(
                "replicate.max_wait_secs ({}) must not be shorter than replicate.poll_interval_secs ({})",
                config.replicate.max_wait_secs, config.replicate.poll_interval_secs
            ),
        });
    }

    if config.youtube.category_id.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "youtube.category_id must not be empty".to_string(),
        });
    }

    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    }

    if config.gateway.port == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.port must not be 0".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks the `owner/name[:version]` shape used by Replicate.
pub fn is_valid_model_identifier(model: &str) -> bool {
    let (name, version) = match model.split_once(':') {
        Some((name, version)) => (name, Some(version)),
        None => (model, None),
    };
    if version.is_some_and(|v| v.trim().is_empty()) {
        return false;
    }
    match name.split_once('/') {
        Some((owner, model_name)) => {
            !owner.trim().is_empty() && !model_name.trim().is_empty() && !model_name.contains('/')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&AutoshortsConfig::default()).is_ok());
    }

    #[test]
    fn model_identifier_shapes() {
        assert!(is_valid_model_identifier("black-forest-labs/flux-video"));
        assert!(is_valid_model_identifier("owner/name:abc123"));
        assert!(!is_valid_model_identifier("flux-video"));
        assert!(!is_valid_model_identifier("owner/"));
        assert!(!is_valid_model_identifier("owner/name:"));
        assert!(!is_valid_model_identifier("a/b/c"));
    }

    #[test]
    fn collects_every_error() {
        let mut config = AutoshortsConfig::default();
        config.pipeline.default_region = " ".into();
        config.trends.max_topics = 0;
        config.replicate.poll_interval_secs = 0;
        config.gateway.port = 0;

        let errors = validate_config(&config).expect_err("should fail");
        assert_eq!(errors.len(), 4, "got: {errors:?}");
    }

    #[test]
    fn max_wait_must_cover_one_poll() {
        let mut config = AutoshortsConfig::default();
        config.replicate.poll_interval_secs = 10;
        config.replicate.max_wait_secs = 5;

        let errors = validate_config(&config).expect_err("should fail");
        assert!(errors[0].to_string().contains("max_wait_secs"));
    }
}
