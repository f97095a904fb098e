// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Human-readable descriptions of fields and whole expressions.
//!
//! A sentence is a time part (minute and hour, plus seconds when present)
//! followed by date clauses for day of month, month, day of week and year,
//! always in that order. A field that failed to parse is echoed literally as
//! `on <field name> <raw value>` rather than dropped.

use crate::field::{find_field, FieldExpr, FieldKind, FieldPart, ParsedField, StepBase};

const MONTHS: [&str; 12] = [
	"January",
	"February",
	"March",
	"April",
	"May",
	"June",
	"July",
	"August",
	"September",
	"October",
	"November",
	"December",
];

const WEEKDAYS: [&str; 7] = [
	"Sunday",
	"Monday",
	"Tuesday",
	"Wednesday",
	"Thursday",
	"Friday",
	"Saturday",
];

const DATE_KINDS: [FieldKind; 4] = [
	FieldKind::DayOfMonth,
	FieldKind::Month,
	FieldKind::DayOfWeek,
	FieldKind::Year,
];

/// English name of a month, 1-based.
pub fn month_name(month: u32) -> &'static str {
	month
		.checked_sub(1)
		.and_then(|index| MONTHS.get(index as usize))
		.copied()
		.unwrap_or("?")
}

/// English name of a weekday, 0 and 7 both being Sunday.
pub fn weekday_name(weekday: u32) -> &'static str {
	WEEKDAYS[(weekday % 7) as usize]
}

/// Describe a single parsed field, e.g. `every 5 minutes` or `in January`.
pub fn describe_field(expr: &FieldExpr) -> String {
	let kind = expr.kind();
	if expr.is_wildcard() {
		return every(kind);
	}

	match expr.parts() {
		[part] => describe_part(kind, part),
		parts => match plain_values(parts) {
			Some(values) => describe_list(kind, values),
			None => join_words(parts.iter().map(|part| describe_part(kind, part)).collect()),
		},
	}
}

/// Compose the sentence for a whole expression.
pub(crate) fn describe_expression(fields: &[ParsedField]) -> String {
	let mut clauses = vec![time_part(fields)];

	for kind in DATE_KINDS {
		let Some(field) = find_field(fields, kind) else {
			continue;
		};
		match field.valid() {
			Some(expr) if expr.is_wildcard() => {}
			Some(expr) => clauses.push(describe_field(expr)),
			None => clauses.push(literal(field)),
		}
	}

	clauses.join(", ")
}

fn time_part(fields: &[ParsedField]) -> String {
	let minute = find_field(fields, FieldKind::Minute);
	let hour = find_field(fields, FieldKind::Hour);
	let second = find_field(fields, FieldKind::Second);

	let mut second_clause = second.and_then(|field| match field.valid() {
		Some(expr) if expr.single_value() == Some(0) => None,
		Some(expr) => Some(describe_field(expr)),
		None => Some(literal(field)),
	});

	let (Some(m), Some(h)) = (
		minute.and_then(ParsedField::valid),
		hour.and_then(ParsedField::valid),
	) else {
		let mut clauses: Vec<String> = [minute, hour]
			.into_iter()
			.flatten()
			.map(|field| match field.valid() {
				Some(expr) => describe_field(expr),
				None => literal(field),
			})
			.collect();
		clauses.extend(second_clause);
		return capitalize(&clauses.join(", "));
	};

	let time = match (m.single_value(), h.single_value()) {
		(Some(mv), Some(hv)) => {
			match second.and_then(ParsedField::valid).and_then(FieldExpr::single_value) {
				Some(sv) => {
					second_clause = None;
					format!("At {:02}:{:02}:{:02}", hv, mv, sv)
				}
				None => format!("At {:02}:{:02}", hv, mv),
			}
		}
		(Some(mv), None) if h.is_wildcard() => format!("At minute {} past every hour", mv),
		(None, Some(hv)) if m.is_wildcard() => format!("At every minute past hour {}", hv),
		_ if m.is_wildcard() && h.is_wildcard() => "At every minute".to_string(),
		_ => {
			let mut time = capitalize(&describe_field(m));
			if !h.is_wildcard() {
				time.push_str(", ");
				time.push_str(&hour_clause(h));
			}
			time
		}
	};

	match second_clause {
		Some(clause) => format!("{}, {}", time, clause),
		None => time,
	}
}

fn hour_clause(hour: &FieldExpr) -> String {
	match hour.parts() {
		[FieldPart::Value(v)] => format!("past hour {}", v),
		[FieldPart::Range(start, end)] => format!("past hours {} through {}", start, end),
		parts => match plain_values(parts) {
			Some(values) => format!(
				"past hours {}",
				join_words(values.iter().map(u32::to_string).collect())
			),
			None => describe_field(hour),
		},
	}
}

fn literal(field: &ParsedField) -> String {
	format!("on {} {}", field.kind.name(), field.raw)
}

fn every(kind: FieldKind) -> String {
	format!("every {}", kind.unit().0)
}

fn format_value(kind: FieldKind, value: u32) -> String {
	match kind {
		FieldKind::Month => month_name(value).to_string(),
		FieldKind::DayOfWeek => weekday_name(value).to_string(),
		_ => value.to_string(),
	}
}

fn describe_part(kind: FieldKind, part: &FieldPart) -> String {
	match *part {
		FieldPart::Any => every(kind),
		FieldPart::Value(v) => describe_list(kind, vec![v]),
		FieldPart::Range(start, end) => describe_range(kind, start, end),
		FieldPart::Step { base, step } => describe_step(kind, base, step),
		FieldPart::LastDayOfMonth => "on the last day of the month".to_string(),
		FieldPart::LastWeekdayOfMonth => "on the last weekday of the month".to_string(),
		FieldPart::NearestWeekday(day) => {
			format!("on the weekday nearest day {} of the month", day)
		}
		FieldPart::LastOfWeekday(weekday) => {
			format!("on the last {} of the month", weekday_name(weekday))
		}
		FieldPart::NthWeekday { weekday, nth } => format!(
			"on the {} {} of the month",
			nth_word(nth),
			weekday_name(weekday)
		),
	}
}

fn describe_list(kind: FieldKind, mut values: Vec<u32>) -> String {
	if kind == FieldKind::DayOfWeek {
		for value in values.iter_mut() {
			*value %= 7;
		}
		values.sort_unstable();
		values.dedup();
	}

	let joined = join_words(values.iter().map(|v| format_value(kind, *v)).collect());
	match kind {
		FieldKind::Second => format!("at second {}", joined),
		FieldKind::Minute => format!("at minute {}", joined),
		FieldKind::Hour => format!("at hour {}", joined),
		FieldKind::DayOfMonth => format!("on day {} of the month", joined),
		FieldKind::Month | FieldKind::Year => format!("in {}", joined),
		FieldKind::DayOfWeek => format!("on {}", joined),
	}
}

fn describe_range(kind: FieldKind, start: u32, end: u32) -> String {
	let (from, to) = (format_value(kind, start), format_value(kind, end));
	match kind {
		FieldKind::Second | FieldKind::Minute | FieldKind::Hour => {
			format!("every {} from {} through {}", kind.unit().0, from, to)
		}
		FieldKind::DayOfMonth => format!("on days {} through {} of the month", from, to),
		FieldKind::Month | FieldKind::Year => format!("from {} through {}", from, to),
		FieldKind::DayOfWeek => format!("{} through {}", from, to),
	}
}

fn describe_step(kind: FieldKind, base: StepBase, step: u32) -> String {
	// a step wider than its base fires once
	if let [value] = step_values(kind, base, step).as_slice() {
		return describe_list(kind, vec![*value]);
	}

	let (one, many) = kind.unit();
	let head = if step == 1 {
		format!("every {}", one)
	} else {
		format!("every {} {}", step, many)
	};

	match base {
		StepBase::Any => head,
		StepBase::From(start) => format!("{} from {}", head, format_value(kind, start)),
		StepBase::Range(start, end) => format!(
			"{} from {} through {}",
			head,
			format_value(kind, start),
			format_value(kind, end)
		),
	}
}

/// First two values a step resolves to.
fn step_values(kind: FieldKind, base: StepBase, step: u32) -> Vec<u32> {
	let (span_min, span_max) = kind.span();
	let (start, end) = match base {
		StepBase::Any => (span_min, span_max),
		StepBase::From(start) => (start, span_max.max(start)),
		StepBase::Range(start, end) => (start, end),
	};
	(start..=end).step_by(step.max(1) as usize).take(2).collect()
}

/// Values of a list made only of single values.
fn plain_values(parts: &[FieldPart]) -> Option<Vec<u32>> {
	parts
		.iter()
		.map(|part| match part {
			FieldPart::Value(v) => Some(*v),
			_ => None,
		})
		.collect()
}

fn nth_word(nth: u32) -> &'static str {
	match nth {
		1 => "first",
		2 => "second",
		3 => "third",
		4 => "fourth",
		_ => "fifth",
	}
}

/// `a`, `a and b`, `a, b and c`.
fn join_words(mut items: Vec<String>) -> String {
	match items.len() {
		0 => String::new(),
		1 => items.remove(0),
		_ => {
			let last = items.pop().unwrap_or_default();
			format!("{} and {}", items.join(", "), last)
		}
	}
}

fn capitalize(text: &str) -> String {
	let mut chars = text.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
