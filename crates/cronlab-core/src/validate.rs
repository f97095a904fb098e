// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Whole-expression validation: per-field errors and advisory warnings.

use serde::{Deserialize, Serialize};

use crate::field::{find_field, FieldExpr, FieldKind, ParsedField};

pub const WARN_DAY_OR_WEEKDAY: &str =
	"Both day of month and day of week are restricted; the job runs when either one matches";
pub const WARN_EVERY_MINUTE: &str = "Minute and hour are both '*'; the job runs every minute";
pub const WARN_FEBRUARY: &str =
	"February never has a 30th or 31st day; those dates never run in February";
pub const WARN_SPECIAL_TOKENS: &str =
	"L, W and # are described but not applied when computing next executions";
pub const WARN_SECONDS: &str =
	"Seconds are not applied when computing next executions; runs are listed at second 0";

/// Outcome of validating an expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Validation {
	pub is_valid: bool,
	pub errors: Vec<String>,
	pub warnings: Vec<String>,
}

impl Validation {
	/// A failed validation with a single top-level error.
	pub fn structural(error: impl Into<String>) -> Self {
		Self {
			is_valid: false,
			errors: vec![error.into()],
			warnings: Vec::new(),
		}
	}
}

/// Collect field errors and, when every field parsed, the advisory warnings.
pub(crate) fn validate_fields(fields: &[ParsedField]) -> Validation {
	let errors: Vec<String> = fields
		.iter()
		.filter_map(|field| {
			field
				.expr
				.as_ref()
				.err()
				.map(|err| err.clone().in_field(field.kind).to_string())
		})
		.collect();

	let warnings = if errors.is_empty() {
		collect_warnings(fields)
	} else {
		Vec::new()
	};

	Validation {
		is_valid: errors.is_empty(),
		errors,
		warnings,
	}
}

fn collect_warnings(fields: &[ParsedField]) -> Vec<String> {
	let get = |kind| find_field(fields, kind).and_then(ParsedField::valid);
	// L, W and # expand to no values, so they never restrict the search
	let restricted = |kind| get(kind).and_then(FieldExpr::values).is_some();
	let wildcard = |expr: Option<&FieldExpr>| expr.is_some_and(FieldExpr::is_wildcard);

	let mut warnings = Vec::new();

	if restricted(FieldKind::DayOfMonth) && restricted(FieldKind::DayOfWeek) {
		warnings.push(WARN_DAY_OR_WEEKDAY.to_string());
	}

	if wildcard(get(FieldKind::Minute)) && wildcard(get(FieldKind::Hour)) {
		warnings.push(WARN_EVERY_MINUTE.to_string());
	}

	let months = get(FieldKind::Month).and_then(FieldExpr::values);
	let days = get(FieldKind::DayOfMonth).and_then(FieldExpr::values);
	if let (Some(months), Some(days)) = (months, days) {
		if months.contains(&2) && (days.contains(&30) || days.contains(&31)) {
			warnings.push(WARN_FEBRUARY.to_string());
		}
	}

	if fields
		.iter()
		.filter_map(ParsedField::valid)
		.any(FieldExpr::has_special)
	{
		warnings.push(WARN_SPECIAL_TOKENS.to_string());
	}

	if get(FieldKind::Second).is_some_and(|e| e.single_value() != Some(0)) {
		warnings.push(WARN_SECONDS.to_string());
	}

	warnings
}
