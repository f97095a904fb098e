// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Next executions agree with the `cron` crate wherever the two share
//! semantics: at most one of day of month and day of week is restricted.

use std::str::FromStr;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use cron::Schedule;
use cronlab_core::{parse_cron_expression_with, ParseOptions, YEAR_HORIZON};
use proptest::prelude::*;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn now() -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2026, 1, 19, 10, 30, 17).unwrap()
}

fn ours(expression: &str, count: usize) -> Vec<DateTime<Utc>> {
	let options = ParseOptions::default().at(now()).with_count(count);
	let result = parse_cron_expression_with(expression, &options);
	assert!(result.is_valid(), "{}: {:?}", expression, result.validation.errors);
	result.next_executions.iter().map(|e| e.date).collect()
}

/// The `cron` crate wants a leading seconds field.
fn reference(expression: &str, count: usize) -> Vec<DateTime<Utc>> {
	let last_year = now().year() + YEAR_HORIZON;
	Schedule::from_str(&format!("0 {}", expression))
		.unwrap()
		.after(&now())
		.take_while(|date| date.year() <= last_year)
		.take(count)
		.collect()
}

#[test]
fn matches_reference_schedules() {
	for expression in [
		"* * * * *",
		"*/15 * * * *",
		"0 9 * * Mon-Fri",
		"0 0 * * Sun",
		"30 2 1 * *",
		"0 12 31 * *",
		"0 0 29 2 *",
		"0 6 15 */3 *",
		"5,35 8-18/2 * Jan,Jul *",
		"45 23 * * Sat",
	] {
		assert_eq!(ours(expression, 10), reference(expression, 10), "{}", expression);
	}
}

fn day_field() -> impl Strategy<Value = (String, String)> {
	prop_oneof![
		(1u32..=31).prop_map(|day| (day.to_string(), "*".to_string())),
		(0usize..7).prop_map(|weekday| ("*".to_string(), WEEKDAYS[weekday].to_string())),
		(0usize..6, 1usize..7).prop_map(|(start, len)| {
			let end = (start + len).min(6);
			let range = format!("{}-{}", WEEKDAYS[start], WEEKDAYS[end]);
			("*".to_string(), range)
		}),
	]
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn single_day_restriction_matches_reference(
		minute in 0u32..60,
		hour in 0u32..24,
		month in 1u32..=12,
		(day, weekday) in day_field(),
	) {
		let expression = format!("{} {} {} {} {}", minute, hour, day, month, weekday);
		let got = ours(&expression, 5);
		let want = reference(&expression, 5);
		prop_assert_eq!(got, want, "{}", expression);
	}
}
