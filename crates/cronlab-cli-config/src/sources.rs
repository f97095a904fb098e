// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: files, environment, CLI, defaults.

use std::path::PathBuf;

use tracing::{debug, trace, warn};

use crate::layer::ConfigLayer;
use crate::paths::{workspace_config_path, PathsConfig};
use crate::ConfigError;

/// Prefix shared by every environment variable the tool reads.
pub const ENV_PREFIX: &str = "CRONLAB_";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	SystemFile = 20,
	UserFile = 30,
	WorkspaceFile = 40,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	/// Precedence level
	fn precedence(&self) -> Precedence;

	/// Load configuration layer from this source
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading defaults");
		// Defaults are applied when the runtime config is built
		Ok(ConfigLayer::default())
	}
}

/// File-based configuration source (TOML).
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	name: &'static str,
	required: bool,
}

impl FileSource {
	/// System config: /etc/cronlab/config.toml
	pub fn system(paths: &PathsConfig) -> Self {
		Self::custom(
			paths.system_config_file.clone(),
			Precedence::SystemFile,
			"system-config",
		)
	}

	/// User config: ~/.config/cronlab/config.toml
	pub fn user(paths: &PathsConfig) -> Self {
		Self::custom(
			paths.user_config_file.clone(),
			Precedence::UserFile,
			"user-config",
		)
	}

	/// Workspace config: .cronlab/config.toml
	pub fn workspace() -> Result<Self, ConfigError> {
		Ok(Self::custom(
			workspace_config_path()?,
			Precedence::WorkspaceFile,
			"workspace-config",
		))
	}

	/// File named with `--config`. It must exist and overrides the workspace file.
	pub fn explicit(path: PathBuf) -> Self {
		Self {
			required: true,
			..Self::custom(path, Precedence::WorkspaceFile, "explicit-config")
		}
	}

	/// Custom file path with specified precedence
	pub fn custom(path: PathBuf, precedence: Precedence, name: &'static str) -> Self {
		Self {
			path,
			precedence,
			name,
			required: false,
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		self.name
	}

	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			if self.required {
				return Err(ConfigError::FileNotFound(self.path.clone()));
			}
			debug!(path = %self.path.display(), source = self.name, "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), source = self.name, "loading config file");

		let content = std::fs::read_to_string(&self.path)?;
		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!(source = self.name, "parsed config layer");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Reads `CRONLAB_TIMEZONE`, `CRONLAB_COUNT`, `CRONLAB_LOG_LEVEL` and
/// `CRONLAB_LOG_FORMAT`. Other `CRONLAB_` variables are ignored.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(layer_from_vars(std::env::vars()))
	}
}

pub(crate) fn layer_from_vars(vars: impl IntoIterator<Item = (String, String)>) -> ConfigLayer {
	let mut layer = ConfigLayer::default();

	for (key, value) in vars {
		let Some(name) = key.strip_prefix(ENV_PREFIX) else {
			continue;
		};

		let value = value.trim().to_string();
		if value.is_empty() {
			continue;
		}

		trace!(key = %key, "processing env var");

		match name {
			"TIMEZONE" => layer.engine_mut().timezone = Some(value),
			"COUNT" => match value.parse() {
				Ok(count) => layer.engine_mut().count = Some(count),
				Err(_) => warn!(key = %key, value = %value, "ignoring non-numeric count"),
			},
			"LOG_LEVEL" => layer.logging_mut().level = Some(value),
			"LOG_FORMAT" => layer.logging_mut().format = Some(value),
			_ => {}
		}
	}

	layer
}

/// CLI override source.
pub struct CliSource {
	overrides: CliOverrides,
}

/// CLI argument overrides.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub timezone: Option<String>,
	pub count: Option<usize>,
	pub log_level: Option<String>,
	pub log_format: Option<String>,
	pub config_file: Option<PathBuf>,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading CLI overrides");
		let mut layer = ConfigLayer::default();

		if let Some(ref timezone) = self.overrides.timezone {
			layer.engine_mut().timezone = Some(timezone.clone());
		}

		if let Some(count) = self.overrides.count {
			layer.engine_mut().count = Some(count);
		}

		if let Some(ref level) = self.overrides.log_level {
			layer.logging_mut().level = Some(level.clone());
		}

		if let Some(ref format) = self.overrides.log_format {
			layer.logging_mut().format = Some(format.clone());
		}

		Ok(layer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Cli > Precedence::Environment);
		assert!(Precedence::Environment > Precedence::WorkspaceFile);
		assert!(Precedence::WorkspaceFile > Precedence::UserFile);
		assert!(Precedence::UserFile > Precedence::SystemFile);
		assert!(Precedence::SystemFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert_eq!(layer, ConfigLayer::default());
	}

	#[test]
	fn test_file_source_missing_file_returns_empty() {
		let source = FileSource::custom(
			PathBuf::from("/nonexistent/config.toml"),
			Precedence::UserFile,
			"test",
		);
		assert_eq!(source.load().unwrap(), ConfigLayer::default());
	}

	#[test]
	fn test_explicit_file_must_exist() {
		let source = FileSource::explicit(PathBuf::from("/nonexistent/config.toml"));
		assert!(matches!(source.load(), Err(ConfigError::FileNotFound(_))));
	}

	#[test]
	fn test_file_source_reads_toml() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[engine]\ncount = 7").unwrap();

		let source = FileSource::custom(file.path().to_path_buf(), Precedence::UserFile, "test");
		let layer = source.load().unwrap();
		assert_eq!(layer.engine.unwrap().count, Some(7));
	}

	#[test]
	fn test_file_source_reports_parse_errors_with_path() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[engine\ncount = ").unwrap();

		let source = FileSource::custom(file.path().to_path_buf(), Precedence::UserFile, "test");
		match source.load() {
			Err(ConfigError::TomlParse { path, .. }) => assert_eq!(path, file.path()),
			other => panic!("expected parse error, got {other:?}"),
		}
	}

	#[test]
	fn test_env_vars_map_to_layer() {
		let layer = layer_from_vars(vars(&[
			("CRONLAB_TIMEZONE", "America/New_York"),
			("CRONLAB_COUNT", " 25 "),
			("CRONLAB_LOG_LEVEL", "debug"),
			("CRONLAB_LOG_FORMAT", "json"),
			("CRONLAB_UNKNOWN", "x"),
			("TIMEZONE", "Asia/Tokyo"),
		]));

		let engine = layer.engine.unwrap();
		assert_eq!(engine.timezone.as_deref(), Some("America/New_York"));
		assert_eq!(engine.count, Some(25));
		let logging = layer.logging.unwrap();
		assert_eq!(logging.level.as_deref(), Some("debug"));
		assert_eq!(logging.format.as_deref(), Some("json"));
	}

	#[test]
	fn test_env_skips_empty_and_malformed_values() {
		let layer = layer_from_vars(vars(&[("CRONLAB_TIMEZONE", "  "), ("CRONLAB_COUNT", "ten")]));
		assert_eq!(layer, ConfigLayer::default());
	}

	#[test]
	fn test_cli_source_sets_only_given_values() {
		let source = CliSource::new(CliOverrides {
			count: Some(3),
			log_format: Some("compact".to_string()),
			..Default::default()
		});
		let layer = source.load().unwrap();
		let engine = layer.engine.unwrap();
		assert_eq!(engine.count, Some(3));
		assert_eq!(engine.timezone, None);
		assert_eq!(layer.logging.unwrap().format.as_deref(), Some("compact"));
	}
}
