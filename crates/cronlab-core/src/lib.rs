// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cron expression engine.
//!
//! Parses 5, 6 and 7 field cron expressions (and `@daily`-style aliases),
//! validates every field against its domain, renders an English
//! description and lists upcoming executions.
//!
//! ```
//! use cronlab_core::parse_cron_expression;
//!
//! let result = parse_cron_expression("0 9 * * 1-5", "Europe/Berlin");
//! assert!(result.is_valid());
//! assert_eq!(result.human_description, "At 09:00, Monday through Friday");
//! ```
//!
//! `L`, `W` and `#` are accepted and described, but they do not narrow the
//! days considered by the next-execution search; a warning says so.

pub mod builder;
pub mod describe;
pub mod error;
pub mod export;
pub mod expression;
pub mod field;
pub mod normalize;
pub mod preset;
pub mod schedule;
pub mod validate;

pub use builder::{build_cron_expression, CronFieldsInput};
pub use describe::describe_field;
pub use error::{CronError, FieldError, Result};
pub use export::{export_cron_expression, ExportFormat};
pub use expression::{
	parse_cron_expression, parse_cron_expression_with, CronField, CronParseResult, ParseOptions,
	DEFAULT_TIMEZONE,
};
pub use field::{FieldExpr, FieldKind, FieldPart, StepBase};
pub use normalize::{expand_alias, normalize_expression, CRON_ALIASES};
pub use preset::{presets_by_category, CronPreset, PresetCategory, CRON_PRESETS};
pub use schedule::{NextExecution, ScheduleSets, DEFAULT_EXECUTION_COUNT, YEAR_HORIZON};
pub use validate::Validation;
