// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration validation rules.

use crate::runtime::CronlabConfig;
use crate::ConfigError;

/// Upper bound for `engine.count`.
pub const MAX_COUNT: usize = 100;

/// Validate the configuration.
///
/// Returns Ok(()) if valid, or ConfigError::InvalidValue naming the key.
pub fn validate_config(config: &CronlabConfig) -> Result<(), ConfigError> {
	validate_engine(config)?;

	Ok(())
}

fn validate_engine(config: &CronlabConfig) -> Result<(), ConfigError> {
	let engine = &config.engine;

	if engine.count == 0 {
		return Err(ConfigError::invalid_value(
			"engine.count",
			"must be at least 1",
		));
	}

	if engine.count > MAX_COUNT {
		return Err(ConfigError::invalid_value(
			"engine.count",
			format!("must be at most {MAX_COUNT}"),
		));
	}

	if engine.timezone.trim().is_empty() {
		return Err(ConfigError::invalid_value(
			"engine.timezone",
			"cannot be empty",
		));
	}

	Ok(())
}
