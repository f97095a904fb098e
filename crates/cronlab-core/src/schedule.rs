// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Next-execution search.
//!
//! Candidates are enumerated year by year, then month, day, hour and minute,
//! each restricted to the values its field allows. Seconds are always 0.
//! Matching uses UTC wall-clock components; the display timezone only
//! affects formatting.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::field::{FieldKind, ParsedField};

/// How many years past the current one the search looks at.
pub const YEAR_HORIZON: i32 = 4;

/// Number of executions returned when the caller does not ask otherwise.
pub const DEFAULT_EXECUTION_COUNT: usize = 10;

/// One upcoming execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NextExecution {
	pub date: DateTime<Utc>,
	/// Long form in the display timezone, e.g. `Monday, January 19, 2026 at 09:00:00 UTC`.
	pub formatted: String,
	/// Coarse distance from now, e.g. `in 3 hours`.
	pub relative: String,
}

/// Allowed values per field; `None` places no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSets {
	pub minutes: Option<BTreeSet<u32>>,
	pub hours: Option<BTreeSet<u32>>,
	pub days: Option<BTreeSet<u32>>,
	pub months: Option<BTreeSet<u32>>,
	pub weekdays: Option<BTreeSet<u32>>,
	pub years: Option<BTreeSet<u32>>,
}

impl ScheduleSets {
	/// Resolve the sets from parsed fields. Returns `None` if any field is invalid.
	pub(crate) fn from_fields(fields: &[ParsedField]) -> Option<Self> {
		let mut sets = Self::default();
		for field in fields {
			let values = field.valid()?.values();
			match field.kind {
				FieldKind::Second => {}
				FieldKind::Minute => sets.minutes = values,
				FieldKind::Hour => sets.hours = values,
				FieldKind::DayOfMonth => sets.days = values,
				FieldKind::Month => sets.months = values,
				FieldKind::DayOfWeek => sets.weekdays = values,
				FieldKind::Year => sets.years = values,
			}
		}
		Some(sets)
	}

	/// Day-of-month / day-of-week disjunction.
	///
	/// When both are restricted either one may match; otherwise the
	/// restricted one decides, and with neither every day passes.
	pub fn day_matches(&self, day: u32, weekday: u32) -> bool {
		match (&self.days, &self.weekdays) {
			(Some(days), Some(weekdays)) => days.contains(&day) || weekdays.contains(&weekday),
			(Some(days), None) => days.contains(&day),
			(None, Some(weekdays)) => weekdays.contains(&weekday),
			(None, None) => true,
		}
	}

	/// Up to `count` instants strictly after `now`, ascending.
	///
	/// Fewer are returned when the year horizon runs out first.
	pub fn next_after(&self, now: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
		let mut found = Vec::new();
		if count == 0 {
			return found;
		}

		let start = now.naive_utc();
		let today = start.date();
		let hours = candidates(&self.hours, 0, 23);
		let minutes = candidates(&self.minutes, 0, 59);

		for year in start.year()..=start.year() + YEAR_HORIZON {
			if !allows(&self.years, year as u32) {
				continue;
			}
			for month in candidates(&self.months, 1, 12) {
				if (year, month) < (start.year(), start.month()) {
					continue;
				}
				// from_ymd_opt drops days the month does not have
				for day in 1..=31 {
					let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
						continue;
					};
					if date < today || !self.day_matches(day, date.weekday().num_days_from_sunday()) {
						continue;
					}
					for &hour in &hours {
						if date == today && hour < start.hour() {
							continue;
						}
						for &minute in &minutes {
							let Some(candidate) = date.and_hms_opt(hour, minute, 0) else {
								continue;
							};
							if candidate <= start {
								continue;
							}
							found.push(Utc.from_utc_datetime(&candidate));
							if found.len() >= count {
								return found;
							}
						}
					}
				}
			}
		}

		found
	}
}

fn candidates(set: &Option<BTreeSet<u32>>, min: u32, max: u32) -> Vec<u32> {
	match set {
		Some(values) => values.range(min..=max).copied().collect(),
		None => (min..=max).collect(),
	}
}

fn allows(set: &Option<BTreeSet<u32>>, value: u32) -> bool {
	set.as_ref().map_or(true, |values| values.contains(&value))
}

/// Long-form rendering of an instant in the display timezone.
pub fn format_in_timezone(instant: DateTime<Utc>, tz: Tz) -> String {
	instant
		.with_timezone(&tz)
		.format("%A, %B %-d, %Y at %H:%M:%S %Z")
		.to_string()
}

/// Coarse relative phrase: `in N days`, `in N hours`, `in N minutes` or `now`.
pub fn relative_time(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
	let seconds = (instant - now).num_seconds();
	if seconds <= 0 {
		return "now".to_string();
	}

	let minutes = (seconds + 59) / 60;
	let (amount, unit) = if minutes >= 24 * 60 {
		(minutes / (24 * 60), "day")
	} else if minutes >= 60 {
		(minutes / 60, "hour")
	} else {
		(minutes, "minute")
	};

	if amount == 1 {
		format!("in 1 {}", unit)
	} else {
		format!("in {} {}s", amount, unit)
	}
}

/// Build the result entries for a list of instants.
pub fn to_executions(instants: Vec<DateTime<Utc>>, now: DateTime<Utc>, tz: Tz) -> Vec<NextExecution> {
	instants
		.into_iter()
		.map(|date| NextExecution {
			date,
			formatted: format_in_timezone(date, tz),
			relative: relative_time(date, now),
		})
		.collect()
}
