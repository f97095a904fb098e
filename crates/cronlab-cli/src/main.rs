// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cronlab_cli_config::{load_config_with_cli, CliOverrides, CronlabConfig, LogFormat, LoggingConfig};
use cronlab_core::{
	build_cron_expression, export_cron_expression, parse_cron_expression_with, presets_by_category,
	CronFieldsInput, CronPreset, ExportFormat, ParseOptions, PresetCategory, CRON_PRESETS,
};

#[derive(Parser, Debug)]
#[command(name = "cronlab", version, about, long_about = None)]
struct Args {
	/// Path to custom configuration file
	#[arg(short, long, global = true)]
	config: Option<PathBuf>,

	/// Log level (overrides config)
	#[arg(short, long, global = true)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long, global = true)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Validate, describe and list the next runs of an expression
	Parse {
		/// Cron expression or @alias (quote it in the shell)
		expression: String,
		/// IANA timezone used to display next runs
		#[arg(short, long)]
		timezone: Option<String>,
		/// Number of next runs to list
		#[arg(short = 'n', long)]
		count: Option<usize>,
		/// Print the full result as JSON
		#[arg(long)]
		json: bool,
	},
	/// Join individual fields into a 5-field expression
	Build {
		#[arg(long)]
		minute: Option<String>,
		#[arg(long)]
		hour: Option<String>,
		/// Day of month
		#[arg(long)]
		day: Option<String>,
		#[arg(long)]
		month: Option<String>,
		/// Day of week
		#[arg(long)]
		weekday: Option<String>,
	},
	/// Embed an expression in a platform configuration snippet
	Export {
		expression: String,
		/// shell, docker, k8s, github-actions, python or nodejs
		#[arg(short, long)]
		format: ExportFormat,
	},
	/// List example expressions
	Presets {
		/// frequent, daily, weekly, monthly, yearly or special
		#[arg(long)]
		category: Option<PresetCategory>,
		/// Print the catalog as JSON
		#[arg(long)]
		json: bool,
	},
}

impl From<&Args> for CliOverrides {
	fn from(args: &Args) -> Self {
		let (timezone, count) = match &args.command {
			Command::Parse {
				timezone, count, ..
			} => (timezone.clone(), *count),
			_ => (None, None),
		};

		Self {
			timezone,
			count,
			log_level: args.log_level.clone(),
			log_format: if args.json_logs {
				Some("json".to_string())
			} else {
				None
			},
			config_file: args.config.clone(),
		}
	}
}

fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("cronlab={}", logging.level)));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}

fn main() -> Result<ExitCode> {
	let args = Args::parse();

	let config = load_config_with_cli(CliOverrides::from(&args))
		.context("failed to load configuration")?;

	init_tracing(&config.logging);

	debug!(
		timezone = %config.engine.timezone,
		count = config.engine.count,
		"starting cronlab"
	);

	match args.command {
		Command::Parse {
			expression, json, ..
		} => run_parse(&config, &expression, json),
		Command::Build {
			minute,
			hour,
			day,
			month,
			weekday,
		} => {
			let fields = CronFieldsInput {
				minute,
				hour,
				day,
				month,
				weekday,
			};
			println!("{}", build_cron_expression(&fields));
			Ok(ExitCode::SUCCESS)
		}
		Command::Export { expression, format } => {
			info!(format = %format, "exporting expression");
			println!("{}", export_cron_expression(&expression, format));
			Ok(ExitCode::SUCCESS)
		}
		Command::Presets { category, json } => {
			let presets: Vec<&CronPreset> = match category {
				Some(category) => presets_by_category(category).collect(),
				None => CRON_PRESETS.iter().collect(),
			};
			if json {
				let out = serde_json::to_string_pretty(&presets).context("failed to serialize presets")?;
				println!("{out}");
			} else {
				print!("{}", render::render_presets(presets));
			}
			Ok(ExitCode::SUCCESS)
		}
	}
}

fn run_parse(config: &CronlabConfig, expression: &str, json: bool) -> Result<ExitCode> {
	let options = ParseOptions::default()
		.with_timezone(config.engine.timezone.clone())
		.with_count(config.engine.count);

	let result = parse_cron_expression_with(expression, &options);

	info!(
		expression = %result.expression,
		valid = result.is_valid(),
		runs = result.next_executions.len(),
		"parsed expression"
	);
	for warning in &result.validation.warnings {
		debug!(warning = %warning, "validation warning");
	}

	if json {
		let out = serde_json::to_string_pretty(&result).context("failed to serialize parse result")?;
		println!("{out}");
	} else {
		print!("{}", render::render_parse(&result));
	}

	if result.is_valid() {
		Ok(ExitCode::SUCCESS)
	} else {
		warn!(errors = ?result.validation.errors, "expression is invalid");
		Ok(ExitCode::from(1))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn cli_definition_is_consistent() {
		Args::command().debug_assert();
	}

	#[test]
	fn parse_flags_become_overrides() {
		let args = Args::parse_from([
			"cronlab",
			"--json-logs",
			"parse",
			"0 9 * * 1-5",
			"--timezone",
			"Asia/Tokyo",
			"-n",
			"3",
		]);
		let overrides = CliOverrides::from(&args);
		assert_eq!(overrides.timezone.as_deref(), Some("Asia/Tokyo"));
		assert_eq!(overrides.count, Some(3));
		assert_eq!(overrides.log_format.as_deref(), Some("json"));
		assert!(overrides.config_file.is_none());
	}

	#[test]
	fn global_flags_follow_the_subcommand() {
		let args = Args::parse_from(["cronlab", "presets", "--config", "/tmp/c.toml", "-l", "debug"]);
		let overrides = CliOverrides::from(&args);
		assert_eq!(overrides.config_file, Some(PathBuf::from("/tmp/c.toml")));
		assert_eq!(overrides.log_level.as_deref(), Some("debug"));
		assert!(overrides.timezone.is_none());
	}

	#[test]
	fn export_format_is_parsed() {
		let args = Args::parse_from(["cronlab", "export", "@daily", "--format", "github-actions"]);
		match args.command {
			Command::Export { format, .. } => assert_eq!(format, ExportFormat::GithubActions),
			other => panic!("unexpected command {other:?}"),
		}
	}

	#[test]
	fn unknown_export_format_is_rejected() {
		assert!(Args::try_parse_from(["cronlab", "export", "@daily", "--format", "cron"]).is_err());
	}

	#[test]
	fn preset_category_is_parsed() {
		let args = Args::parse_from(["cronlab", "presets", "--category", "monthly"]);
		match args.command {
			Command::Presets { category, json } => {
				assert_eq!(category, Some(PresetCategory::Monthly));
				assert!(!json);
			}
			other => panic!("unexpected command {other:?}"),
		}
	}
}
