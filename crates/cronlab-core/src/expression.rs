// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Parse results and the `parse` entry points.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::describe::{describe_expression, describe_field};
use crate::field::{FieldKind, ParsedField};
use crate::normalize::normalize_expression;
use crate::schedule::{to_executions, NextExecution, ScheduleSets, DEFAULT_EXECUTION_COUNT};
use crate::validate::{validate_fields, Validation};

/// Timezone used when the caller gives none, or one that does not resolve.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// One parsed component of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CronField {
	pub kind: FieldKind,
	pub raw_value: String,
	pub human_description: String,
	pub is_valid: bool,
	pub error_message: Option<String>,
}

impl From<&ParsedField> for CronField {
	fn from(field: &ParsedField) -> Self {
		match &field.expr {
			Ok(expr) => Self {
				kind: field.kind,
				raw_value: field.raw.clone(),
				human_description: describe_field(expr),
				is_valid: true,
				error_message: None,
			},
			Err(err) => Self {
				kind: field.kind,
				raw_value: field.raw.clone(),
				human_description: format!("on {} {}", field.kind.name(), field.raw),
				is_valid: false,
				error_message: Some(err.to_string()),
			},
		}
	}
}

/// Everything the engine knows about an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CronParseResult {
	/// The expression as given.
	pub expression: String,
	/// Aliases expanded, whitespace collapsed. Empty on structural errors.
	pub normalized_expression: String,
	pub fields: Vec<CronField>,
	pub validation: Validation,
	pub human_description: String,
	pub next_executions: Vec<NextExecution>,
	/// Display timezone actually used for formatting.
	pub timezone: String,
}

impl CronParseResult {
	pub fn is_valid(&self) -> bool {
		self.validation.is_valid
	}

	/// The field of the given kind, if the expression has one.
	pub fn field(&self, kind: FieldKind) -> Option<&CronField> {
		self.fields.iter().find(|field| field.kind == kind)
	}
}

/// Knobs for [`parse_cron_expression_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ParseOptions {
	/// IANA timezone used to format next executions.
	pub timezone: String,
	/// How many next executions to compute.
	pub count: usize,
	/// Reference instant; the current time when `None`.
	pub now: Option<DateTime<Utc>>,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self {
			timezone: DEFAULT_TIMEZONE.to_string(),
			count: DEFAULT_EXECUTION_COUNT,
			now: None,
		}
	}
}

impl ParseOptions {
	pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
		self.timezone = timezone.into();
		self
	}

	pub fn with_count(mut self, count: usize) -> Self {
		self.count = count;
		self
	}

	pub fn at(mut self, now: DateTime<Utc>) -> Self {
		self.now = Some(now);
		self
	}
}

/// Parse an expression relative to the current time.
///
/// Never fails: malformed input yields a result whose
/// [`Validation::is_valid`] is false.
pub fn parse_cron_expression(expression: &str, timezone: &str) -> CronParseResult {
	parse_cron_expression_with(expression, &ParseOptions::default().with_timezone(timezone))
}

/// Parse an expression with explicit options.
pub fn parse_cron_expression_with(expression: &str, options: &ParseOptions) -> CronParseResult {
	let now = options.now.unwrap_or_else(Utc::now);
	let (tz, timezone_warning) = resolve_timezone(&options.timezone);

	let normalized = match normalize_expression(expression) {
		Ok(normalized) => normalized,
		Err(err) => {
			return CronParseResult {
				expression: expression.to_string(),
				normalized_expression: String::new(),
				fields: Vec::new(),
				validation: Validation::structural(err.to_string()),
				human_description: String::new(),
				next_executions: Vec::new(),
				timezone: tz.name().to_string(),
			};
		}
	};

	let tokens: Vec<&str> = normalized.split(' ').collect();
	let parsed: Vec<ParsedField> = FieldKind::layout(tokens.len())
		.unwrap_or_default()
		.iter()
		.zip(&tokens)
		.map(|(kind, raw)| ParsedField::parse(*kind, raw))
		.collect();

	let mut validation = validate_fields(&parsed);
	validation.warnings.extend(timezone_warning);

	let next_executions = if validation.is_valid {
		ScheduleSets::from_fields(&parsed)
			.map(|sets| to_executions(sets.next_after(now, options.count), now, tz))
			.unwrap_or_default()
	} else {
		Vec::new()
	};

	CronParseResult {
		expression: expression.to_string(),
		fields: parsed.iter().map(CronField::from).collect(),
		human_description: describe_expression(&parsed),
		normalized_expression: normalized,
		validation,
		next_executions,
		timezone: tz.name().to_string(),
	}
}

fn resolve_timezone(timezone: &str) -> (Tz, Option<String>) {
	match timezone.trim().parse::<Tz>() {
		Ok(tz) => (tz, None),
		Err(_) => (
			Tz::UTC,
			Some(format!("Unknown timezone '{}'; times are shown in UTC", timezone)),
		),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;

	fn options() -> ParseOptions {
		ParseOptions::default().at(Utc.with_ymd_and_hms(2026, 1, 19, 10, 30, 0).unwrap())
	}

	#[test]
	fn valid_expression_result() {
		let result = parse_cron_expression_with("*/5 * * * *", &options().with_count(3));
		assert!(result.is_valid());
		assert_eq!(result.normalized_expression, "*/5 * * * *");
		assert_eq!(result.fields.len(), 5);
		assert_eq!(result.fields[0].kind, FieldKind::Minute);
		assert_eq!(result.fields[0].human_description, "every 5 minutes");
		assert_eq!(result.human_description, "Every 5 minutes");
		assert_eq!(result.next_executions.len(), 3);
		assert_eq!(result.next_executions[0].relative, "in 5 minutes");
		assert_eq!(result.timezone, "UTC");
	}

	#[test]
	fn field_count_error_is_structural() {
		let result = parse_cron_expression_with("* * *", &options());
		assert!(!result.is_valid());
		assert!(result.fields.is_empty());
		assert_eq!(result.validation.errors.len(), 1);
		assert!(result.validation.errors[0].contains("found 3"));
		assert!(result.next_executions.is_empty());
	}

	#[test]
	fn field_error_keeps_other_fields() {
		let result = parse_cron_expression_with("0 25 * * *", &options());
		assert!(!result.is_valid());
		assert_eq!(result.fields.len(), 5);
		assert!(result.fields[0].is_valid);
		assert!(!result.fields[1].is_valid);
		assert_eq!(
			result.fields[1].error_message.as_deref(),
			Some("value 25 is out of range (0-23)")
		);
		assert!(result.next_executions.is_empty());
	}

	#[test]
	fn unknown_timezone_falls_back_to_utc() {
		let result =
			parse_cron_expression_with("0 9 * * *", &options().with_timezone("Mars/Olympus"));
		assert!(result.is_valid());
		assert_eq!(result.timezone, "UTC");
		assert!(result
			.validation
			.warnings
			.iter()
			.any(|w| w.contains("Mars/Olympus")));
	}

	#[test]
	fn timezone_only_changes_formatting() {
		let utc = parse_cron_expression_with("0 9 * * *", &options());
		let tokyo = parse_cron_expression_with("0 9 * * *", &options().with_timezone("Asia/Tokyo"));
		assert_eq!(utc.next_executions[0].date, tokyo.next_executions[0].date);
		assert_eq!(tokyo.timezone, "Asia/Tokyo");
		assert!(tokyo.next_executions[0].formatted.ends_with("18:00:00 JST"));
	}

	#[test]
	fn result_serializes_to_json() {
		let result = parse_cron_expression_with("@daily", &options().with_count(1));
		let json = serde_json::to_value(&result).unwrap();
		assert_eq!(json["normalized_expression"], "0 0 * * *");
		assert_eq!(json["fields"][2]["kind"], "day_of_month");
		assert_eq!(json["validation"]["is_valid"], true);
	}
}
