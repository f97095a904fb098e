// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime configuration types with resolved defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::layer::*;
use crate::paths::PathsConfig;
use crate::ConfigError;

pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_COUNT: usize = 10;

/// The final, validated configuration for cronlab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CronlabConfig {
	pub engine: EngineConfig,
	pub logging: LoggingConfig,

	/// Resolved XDG paths (not serialized)
	#[serde(skip)]
	pub paths: PathsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
	/// Display timezone for next executions
	pub timezone: String,
	/// Number of next executions to compute
	pub count: usize,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			timezone: DEFAULT_TIMEZONE.to_string(),
			count: DEFAULT_COUNT,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Error,
	#[default]
	Warn,
	Info,
	Debug,
	Trace,
}

impl LogLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::Error => "error",
			LogLevel::Warn => "warn",
			LogLevel::Info => "info",
			LogLevel::Debug => "debug",
			LogLevel::Trace => "trace",
		}
	}
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for LogLevel {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"error" => Ok(LogLevel::Error),
			"warn" | "warning" => Ok(LogLevel::Warn),
			"info" => Ok(LogLevel::Info),
			"debug" => Ok(LogLevel::Debug),
			"trace" => Ok(LogLevel::Trace),
			_ => Err(format!("unknown log level: {s}")),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
	Compact,
}

impl fmt::Display for LogFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LogFormat::Pretty => write!(f, "pretty"),
			LogFormat::Json => write!(f, "json"),
			LogFormat::Compact => write!(f, "compact"),
		}
	}
}

impl FromStr for LogFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"pretty" => Ok(LogFormat::Pretty),
			"json" => Ok(LogFormat::Json),
			"compact" => Ok(LogFormat::Compact),
			_ => Err(format!("unknown log format: {s}")),
		}
	}
}

impl CronlabConfig {
	/// Build runtime config from a merged layer and paths.
	pub fn from_layer(layer: ConfigLayer, paths: PathsConfig) -> Result<Self, ConfigError> {
		Ok(Self {
			engine: build_engine_config(layer.engine),
			logging: build_logging_config(layer.logging),
			paths,
		})
	}
}

fn build_engine_config(layer: Option<EngineLayer>) -> EngineConfig {
	let layer = layer.unwrap_or_default();
	EngineConfig {
		timezone: layer
			.timezone
			.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
		count: layer.count.unwrap_or(DEFAULT_COUNT),
	}
}

fn build_logging_config(layer: Option<LoggingLayer>) -> LoggingConfig {
	let layer = layer.unwrap_or_default();
	LoggingConfig {
		level: parse_log_level(layer.level.as_deref()),
		format: parse_log_format(layer.format.as_deref()),
	}
}

fn parse_log_level(s: Option<&str>) -> LogLevel {
	match s.map(str::parse::<LogLevel>) {
		Some(Ok(level)) => level,
		Some(Err(err)) => {
			warn!(error = %err, "falling back to default log level");
			LogLevel::default()
		}
		None => LogLevel::default(),
	}
}

fn parse_log_format(s: Option<&str>) -> LogFormat {
	match s.map(str::parse::<LogFormat>) {
		Some(Ok(format)) => format,
		Some(Err(err)) => {
			warn!(error = %err, "falling back to default log format");
			LogFormat::default()
		}
		None => LogFormat::default(),
	}
}
