// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end behaviour of the public engine surface.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use cronlab_core::{
	build_cron_expression, export_cron_expression, parse_cron_expression,
	parse_cron_expression_with, CronFieldsInput, CronParseResult, ExportFormat, FieldExpr,
	FieldKind, ParseOptions,
};
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2026, 1, 19, 10, 30, 17).unwrap()
}

fn parse_at(expression: &str) -> CronParseResult {
	parse_cron_expression_with(expression, &ParseOptions::default().at(now()))
}

fn raw_values(result: &CronParseResult) -> Vec<String> {
	result.fields.iter().map(|f| f.raw_value.clone()).collect()
}

#[test]
fn all_wildcards_run_every_minute() {
	for expression in ["* * * * *", "* * * * * *", "* * * * * * *"] {
		let result = parse_at(expression);
		assert!(result.is_valid(), "{}", expression);
		assert!(
			result.human_description.contains("every minute"),
			"{}: {}",
			expression,
			result.human_description
		);
	}
}

#[test]
fn first_execution_is_next_whole_minute() {
	let result = parse_at("* * * * *");
	assert_eq!(
		result.next_executions[0].date,
		Utc.with_ymd_and_hms(2026, 1, 19, 10, 31, 0).unwrap()
	);
	assert_eq!(result.next_executions[0].relative, "in 1 minute");
	assert_eq!(result.next_executions.len(), 10);
}

#[test]
fn yearly_alias_matches_explicit_form() {
	let alias = parse_at("@yearly");
	let explicit = parse_at("0 0 1 1 *");
	assert_eq!(alias.normalized_expression, explicit.normalized_expression);
	assert_eq!(raw_values(&alias), raw_values(&explicit));
	assert_eq!(alias.next_executions, explicit.next_executions);
	assert_eq!(alias.expression, "@yearly");
}

#[test]
fn reversed_range_invalidates_the_field() {
	let result = parse_at("0 17-9 * * *");
	assert!(!result.is_valid());
	let hour = result.field(FieldKind::Hour).unwrap();
	assert!(!hour.is_valid);
	assert!(hour.error_message.is_some());
	assert!(result.validation.errors[0].starts_with("hour:"));
}

#[test]
fn february_thirtieth_warns_and_never_runs() {
	let result = parse_at("0 0 30 2 *");
	assert!(result.is_valid());
	assert!(result
		.validation
		.warnings
		.iter()
		.any(|w| w.contains("February")));
	assert!(result.next_executions.is_empty());
}

#[test]
fn day_or_weekday_never_matches_neither() {
	let result = parse_at("0 0 1 * 1");
	assert!(result.is_valid());
	assert_eq!(result.next_executions.len(), 10);
	for execution in &result.next_executions {
		let date = execution.date;
		assert!(
			date.day() == 1 || date.weekday().num_days_from_sunday() == 1,
			"{} is neither the 1st nor a Monday",
			date
		);
	}
}

#[test]
fn kubernetes_export_embeds_schedule() {
	let snippet = export_cron_expression("0 9 * * 1-5", ExportFormat::K8s);
	assert!(snippet.contains(r#"schedule: "0 9 * * 1-5""#));
}

#[test]
fn zero_step_is_invalid_and_five_step_expands() {
	assert!(!parse_at("*/0 * * * *").is_valid());

	let result = parse_at("*/5 * * * *");
	assert!(result.is_valid());
	let minutes = FieldExpr::parse(FieldKind::Minute, &result.fields[0].raw_value)
		.unwrap()
		.values()
		.unwrap();
	assert_eq!(
		minutes.into_iter().collect::<Vec<_>>(),
		(0..60).step_by(5).collect::<Vec<_>>()
	);
	assert!(result
		.next_executions
		.iter()
		.all(|e| e.date.minute() % 5 == 0 && e.date.second() == 0));
}

#[test]
fn special_tokens_are_flagged_not_matched() {
	let result = parse_at("0 0 L * *");
	assert!(result.is_valid());
	assert!(result.human_description.contains("last day of the month"));
	assert!(result
		.validation
		.warnings
		.iter()
		.any(|w| w.contains("not applied")));
	// L does not narrow the search, so this runs daily
	assert_eq!(
		result.next_executions[0].date,
		Utc.with_ymd_and_hms(2026, 1, 20, 0, 0, 0).unwrap()
	);
}

#[test]
fn last_day_with_weekday_runs_on_the_weekday_only() {
	let result = parse_at("0 0 L * 1");
	assert!(result.is_valid());
	assert!(!result
		.validation
		.warnings
		.iter()
		.any(|w| w.contains("either one matches")));
	assert_eq!(result.next_executions.len(), 10);
	assert!(result
		.next_executions
		.iter()
		.all(|e| e.date.weekday().num_days_from_sunday() == 1));
}

#[test]
fn structural_errors_never_panic() {
	for expression in ["", "   ", "* * *", "@never", "a b c d e f g h"] {
		let result = parse_cron_expression(expression, "UTC");
		assert!(!result.is_valid(), "{:?}", expression);
		assert!(result.fields.is_empty());
		assert_eq!(result.validation.errors.len(), 1);
	}
}

fn field_token(min: u32, max: u32) -> impl Strategy<Value = String> {
	prop_oneof![
		Just("*".to_string()),
		(min..=max).prop_map(|v| v.to_string()),
		(1..=max).prop_map(|step| format!("*/{}", step)),
		(min..=max, min..=max).prop_map(|(a, b)| format!("{}-{}", a.min(b), a.max(b))),
	]
}

proptest! {
	#[test]
	fn built_expressions_roundtrip(
		minute in field_token(0, 59),
		hour in field_token(0, 23),
		month in field_token(1, 12),
		weekday in field_token(0, 6),
	) {
		let input = CronFieldsInput::default()
			.minute(minute.clone())
			.hour(hour.clone())
			.month(month.clone())
			.weekday(weekday.clone());
		let expression = build_cron_expression(&input);
		let result = parse_cron_expression_with(&expression, &ParseOptions::default().at(now()).with_count(1));

		prop_assert!(result.is_valid(), "{}: {:?}", expression, result.validation.errors);
		prop_assert_eq!(&result.normalized_expression, &expression);
		prop_assert_eq!(
			raw_values(&result),
			vec![minute, hour, "*".to_string(), month, weekday]
		);
	}
}
