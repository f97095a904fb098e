// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Alias expansion and field splitting.

use crate::error::{CronError, Result};

/// Shorthand tokens and their canonical 5-field form.
///
/// `@reboot` has no schedule equivalent; it maps to the yearly form so it can
/// still be parsed and described.
pub const CRON_ALIASES: &[(&str, &str)] = &[
	("@yearly", "0 0 1 1 *"),
	("@annually", "0 0 1 1 *"),
	("@monthly", "0 0 1 * *"),
	("@weekly", "0 0 * * 0"),
	("@daily", "0 0 * * *"),
	("@midnight", "0 0 * * *"),
	("@hourly", "0 * * * *"),
	("@reboot", "0 0 1 1 *"),
];

/// Look up the canonical form of an alias, ignoring case.
pub fn expand_alias(token: &str) -> Option<&'static str> {
	CRON_ALIASES
		.iter()
		.find(|(alias, _)| alias.eq_ignore_ascii_case(token))
		.map(|(_, canonical)| *canonical)
}

/// Normalize an expression to its canonical, single-space separated form.
///
/// Aliases are expanded; anything else keeps its tokens as written. The
/// result always has 5, 6 or 7 fields.
pub fn normalize_expression(expression: &str) -> Result<String> {
	let trimmed = expression.trim();
	if trimmed.is_empty() {
		return Err(CronError::Empty);
	}

	if let Some(canonical) = expand_alias(trimmed) {
		return Ok(canonical.to_string());
	}

	if trimmed.starts_with('@') && !trimmed.contains(char::is_whitespace) {
		return Err(CronError::UnknownAlias(trimmed.to_string()));
	}

	let fields: Vec<&str> = trimmed.split_whitespace().collect();
	if !(5..=7).contains(&fields.len()) {
		return Err(CronError::FieldCount(fields.len()));
	}

	Ok(fields.join(" "))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn aliases_expand_case_insensitively() {
		assert_eq!(normalize_expression("@daily").unwrap(), "0 0 * * *");
		assert_eq!(normalize_expression("  @DAILY ").unwrap(), "0 0 * * *");
		assert_eq!(normalize_expression("@Hourly").unwrap(), "0 * * * *");
	}

	#[test]
	fn reboot_maps_to_yearly() {
		assert_eq!(
			normalize_expression("@reboot").unwrap(),
			normalize_expression("@yearly").unwrap()
		);
	}

	#[test]
	fn whitespace_is_collapsed() {
		assert_eq!(
			normalize_expression(" */5\t*  * *   * ").unwrap(),
			"*/5 * * * *"
		);
	}

	#[test]
	fn field_count_is_checked() {
		assert_eq!(normalize_expression("* * * *"), Err(CronError::FieldCount(4)));
		assert_eq!(
			normalize_expression("* * * * * * * *"),
			Err(CronError::FieldCount(8))
		);
		assert!(normalize_expression("0 * * * * *").is_ok());
		assert!(normalize_expression("0 * * * * * 2030").is_ok());
	}

	#[test]
	fn empty_and_unknown_alias_are_errors() {
		assert_eq!(normalize_expression("   "), Err(CronError::Empty));
		assert_eq!(
			normalize_expression("@fortnightly"),
			Err(CronError::UnknownAlias("@fortnightly".to_string()))
		);
	}
}
