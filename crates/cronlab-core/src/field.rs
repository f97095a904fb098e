// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Field grammar: kinds, token forms and value resolution.
//!
//! A field token is a comma-separated list of parts. Each part is one of
//! `*`, a single value or name, a `start-end` range, a step over `*`, a
//! value or a range (`*/5`, `5/15`, `2-10/2`), or one of the descriptive
//! special tokens (`L`, `LW`, `15W`, `5L`, `1#2`).

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Range used to expand `*` on the year field, which has no domain bounds.
pub const YEAR_SPAN: (u32, u32) = (1970, 2099);

const MONTH_NAMES: [&str; 12] = [
	"jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const WEEKDAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// Position-dependent kind of a cron field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
	Second,
	Minute,
	Hour,
	DayOfMonth,
	Month,
	DayOfWeek,
	Year,
}

impl FieldKind {
	const FIVE: [FieldKind; 5] = [
		Self::Minute,
		Self::Hour,
		Self::DayOfMonth,
		Self::Month,
		Self::DayOfWeek,
	];

	const SIX: [FieldKind; 6] = [
		Self::Second,
		Self::Minute,
		Self::Hour,
		Self::DayOfMonth,
		Self::Month,
		Self::DayOfWeek,
	];

	const SEVEN: [FieldKind; 7] = [
		Self::Second,
		Self::Minute,
		Self::Hour,
		Self::DayOfMonth,
		Self::Month,
		Self::DayOfWeek,
		Self::Year,
	];

	/// Field kinds for an expression with `count` fields.
	///
	/// Six fields prepend seconds, seven fields also append the year.
	pub fn layout(count: usize) -> Option<&'static [FieldKind]> {
		match count {
			5 => Some(&Self::FIVE),
			6 => Some(&Self::SIX),
			7 => Some(&Self::SEVEN),
			_ => None,
		}
	}

	/// Inclusive domain bounds. The year is unconstrained.
	pub fn bounds(self) -> Option<(u32, u32)> {
		match self {
			Self::Second | Self::Minute => Some((0, 59)),
			Self::Hour => Some((0, 23)),
			Self::DayOfMonth => Some((1, 31)),
			Self::Month => Some((1, 12)),
			Self::DayOfWeek => Some((0, 7)),
			Self::Year => None,
		}
	}

	/// Values `*` expands to.
	pub(crate) fn span(self) -> (u32, u32) {
		match self {
			Self::DayOfWeek => (0, 6),
			Self::Year => YEAR_SPAN,
			other => other.bounds().unwrap_or(YEAR_SPAN),
		}
	}

	/// Human name used in error messages and literal fallbacks.
	pub fn name(self) -> &'static str {
		match self {
			Self::Second => "second",
			Self::Minute => "minute",
			Self::Hour => "hour",
			Self::DayOfMonth => "day of month",
			Self::Month => "month",
			Self::DayOfWeek => "day of week",
			Self::Year => "year",
		}
	}

	/// Singular and plural unit used in descriptions.
	pub(crate) fn unit(self) -> (&'static str, &'static str) {
		match self {
			Self::Second => ("second", "seconds"),
			Self::Minute => ("minute", "minutes"),
			Self::Hour => ("hour", "hours"),
			Self::DayOfMonth => ("day", "days"),
			Self::Month => ("month", "months"),
			Self::DayOfWeek => ("day of the week", "days of the week"),
			Self::Year => ("year", "years"),
		}
	}

	/// Whether `?` may stand in for `*`.
	fn accepts_question_mark(self) -> bool {
		matches!(self, Self::DayOfMonth | Self::DayOfWeek)
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Base of a step part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepBase {
	/// `*/k`
	Any,
	/// `n/k`: from `n` to the upper bound.
	From(u32),
	/// `a-b/k`
	Range(u32, u32),
}

/// One comma-separated part of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPart {
	Any,
	Value(u32),
	Range(u32, u32),
	Step { base: StepBase, step: u32 },
	/// `L` in the day-of-month field.
	LastDayOfMonth,
	/// `LW` in the day-of-month field.
	LastWeekdayOfMonth,
	/// `15W` in the day-of-month field.
	NearestWeekday(u32),
	/// `5L` in the day-of-week field.
	LastOfWeekday(u32),
	/// `1#2` in the day-of-week field.
	NthWeekday { weekday: u32, nth: u32 },
}

impl FieldPart {
	/// `L`, `W` and `#` forms. These are described but never matched.
	pub fn is_special(&self) -> bool {
		matches!(
			self,
			Self::LastDayOfMonth
				| Self::LastWeekdayOfMonth
				| Self::NearestWeekday(_)
				| Self::LastOfWeekday(_)
				| Self::NthWeekday { .. }
		)
	}
}

/// A parsed and domain-checked field token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldExpr {
	kind: FieldKind,
	parts: Vec<FieldPart>,
}

impl FieldExpr {
	/// Parse `raw` as a field of the given kind.
	pub fn parse(kind: FieldKind, raw: &str) -> Result<Self, FieldError> {
		let parts = raw
			.split(',')
			.map(|part| parse_part(kind, part))
			.collect::<Result<Vec<_>, _>>()?;
		Ok(Self { kind, parts })
	}

	pub fn kind(&self) -> FieldKind {
		self.kind
	}

	pub fn parts(&self) -> &[FieldPart] {
		&self.parts
	}

	/// `*` (or `?`) on its own.
	pub fn is_wildcard(&self) -> bool {
		matches!(self.parts.as_slice(), [FieldPart::Any])
	}

	pub fn has_special(&self) -> bool {
		self.parts.iter().any(FieldPart::is_special)
	}

	/// The single value this field pins, if it is exactly one value.
	pub fn single_value(&self) -> Option<u32> {
		match self.parts.as_slice() {
			[FieldPart::Value(v)] => Some(*v),
			_ => None,
		}
	}

	/// Values this field allows, or `None` when it places no restriction.
	///
	/// Special parts contribute nothing; a field made only of special parts
	/// is therefore unrestricted. Day-of-week 7 folds into 0.
	pub fn values(&self) -> Option<BTreeSet<u32>> {
		if self.parts.contains(&FieldPart::Any) {
			return None;
		}

		let (_, span_max) = self.kind.span();
		let mut restricted = false;
		let mut values = BTreeSet::new();
		for part in &self.parts {
			match *part {
				FieldPart::Value(v) => {
					values.insert(v);
				}
				FieldPart::Range(start, end) => {
					let (start, end) = self.clamp(start, end);
					values.extend(start..=end);
				}
				FieldPart::Step { base, step } => {
					let (start, end) = match base {
						StepBase::Any => self.kind.span(),
						StepBase::From(start) => (start, span_max.max(start)),
						StepBase::Range(start, end) => self.clamp(start, end),
					};
					values.extend((start..=end).step_by(step as usize));
				}
				_ => continue,
			}
			restricted = true;
		}

		if self.kind == FieldKind::DayOfWeek && values.remove(&7) {
			values.insert(0);
		}

		restricted.then_some(values)
	}

	/// Year ranges only expand within [`YEAR_SPAN`].
	fn clamp(&self, start: u32, end: u32) -> (u32, u32) {
		match self.kind {
			FieldKind::Year => (start.max(YEAR_SPAN.0), end.min(YEAR_SPAN.1)),
			_ => (start, end),
		}
	}
}

/// A field token together with its parse outcome.
#[derive(Debug, Clone)]
pub(crate) struct ParsedField {
	pub kind: FieldKind,
	pub raw: String,
	pub expr: Result<FieldExpr, FieldError>,
}

impl ParsedField {
	pub fn parse(kind: FieldKind, raw: &str) -> Self {
		Self {
			kind,
			raw: raw.to_string(),
			expr: FieldExpr::parse(kind, raw),
		}
	}

	pub fn valid(&self) -> Option<&FieldExpr> {
		self.expr.as_ref().ok()
	}
}

pub(crate) fn find_field(fields: &[ParsedField], kind: FieldKind) -> Option<&ParsedField> {
	fields.iter().find(|field| field.kind == kind)
}

fn parse_part(kind: FieldKind, part: &str) -> Result<FieldPart, FieldError> {
	if part.is_empty() {
		return Err(FieldError::EmptyPart);
	}

	if part == "*" || (part == "?" && kind.accepts_question_mark()) {
		return Ok(FieldPart::Any);
	}

	if let Some((base, step)) = part.split_once('/') {
		return parse_step(kind, base, step);
	}

	if let Some(special) = parse_special(kind, part)? {
		return Ok(special);
	}

	if let Some((start, end)) = part.split_once('-') {
		let (start, end) = parse_range(kind, part, start, end)?;
		return Ok(FieldPart::Range(start, end));
	}

	resolve_value(kind, part).map(FieldPart::Value)
}

fn parse_step(kind: FieldKind, base: &str, step: &str) -> Result<FieldPart, FieldError> {
	let step = match parse_number(step) {
		Some(n) if n > 0 => n,
		_ => return Err(FieldError::InvalidStep(step.to_string())),
	};

	let base = if base == "*" {
		StepBase::Any
	} else if let Some((start, end)) = base.split_once('-') {
		let (start, end) = parse_range(kind, base, start, end)?;
		StepBase::Range(start, end)
	} else if base.is_empty() {
		return Err(FieldError::EmptyPart);
	} else {
		StepBase::From(resolve_value(kind, base)?)
	};

	Ok(FieldPart::Step { base, step })
}

fn parse_range(
	kind: FieldKind,
	raw: &str,
	start: &str,
	end: &str,
) -> Result<(u32, u32), FieldError> {
	if start.is_empty() || end.is_empty() {
		return Err(FieldError::IncompleteRange(raw.to_string()));
	}
	let start = resolve_value(kind, start)?;
	let end = resolve_value(kind, end)?;
	if start > end {
		return Err(FieldError::ReversedRange { start, end });
	}
	Ok((start, end))
}

fn parse_special(kind: FieldKind, part: &str) -> Result<Option<FieldPart>, FieldError> {
	let upper = part.to_ascii_uppercase();

	if let Some((weekday, nth)) = upper.split_once('#') {
		if kind != FieldKind::DayOfWeek {
			return Err(misplaced("#", FieldKind::DayOfWeek));
		}
		let weekday = resolve_value(kind, weekday)?;
		let nth = parse_number(nth).ok_or_else(|| FieldError::UnknownValue(part.to_string()))?;
		if !(1..=5).contains(&nth) {
			return Err(FieldError::InvalidOccurrence(nth));
		}
		return Ok(Some(FieldPart::NthWeekday { weekday, nth }));
	}

	match kind {
		FieldKind::DayOfMonth => {
			if upper == "L" {
				return Ok(Some(FieldPart::LastDayOfMonth));
			}
			if upper == "LW" {
				return Ok(Some(FieldPart::LastWeekdayOfMonth));
			}
			if let Some(day) = upper.strip_suffix('W') {
				return resolve_value(kind, day).map(|d| Some(FieldPart::NearestWeekday(d)));
			}
			Ok(None)
		}
		FieldKind::DayOfWeek => {
			if upper == "L" {
				return Err(misplaced("L", FieldKind::DayOfMonth));
			}
			if let Some(weekday) = upper.strip_suffix('L') {
				return resolve_value(kind, weekday).map(|d| Some(FieldPart::LastOfWeekday(d)));
			}
			if is_suffixed_number(&upper, 'W') {
				return Err(misplaced("W", FieldKind::DayOfMonth));
			}
			Ok(None)
		}
		_ => {
			if is_suffixed_number(&upper, 'L') {
				return Err(misplaced("L", FieldKind::DayOfMonth));
			}
			if is_suffixed_number(&upper, 'W') {
				return Err(misplaced("W", FieldKind::DayOfMonth));
			}
			Ok(None)
		}
	}
}

fn misplaced(token: &str, allowed: FieldKind) -> FieldError {
	FieldError::MisplacedSpecial {
		token: token.to_string(),
		allowed: allowed.name(),
	}
}

/// `L`, `W`, `15W`: the suffix on nothing or on a plain number.
fn is_suffixed_number(token: &str, suffix: char) -> bool {
	token
		.strip_suffix(suffix)
		.is_some_and(|rest| rest.is_empty() || parse_number(rest).is_some())
}

fn parse_number(token: &str) -> Option<u32> {
	if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	token.parse().ok()
}

fn name_value(kind: FieldKind, token: &str) -> Option<u32> {
	let lower = token.to_ascii_lowercase();
	let names: &[&str] = match kind {
		FieldKind::Month => &MONTH_NAMES,
		FieldKind::DayOfWeek => &WEEKDAY_NAMES,
		_ => return None,
	};
	let offset = if kind == FieldKind::Month { 1 } else { 0 };
	names
		.iter()
		.position(|name| *name == lower)
		.map(|index| index as u32 + offset)
}

/// Resolve a single number or name and check it against the domain.
fn resolve_value(kind: FieldKind, token: &str) -> Result<u32, FieldError> {
	let value = parse_number(token)
		.or_else(|| name_value(kind, token))
		.ok_or_else(|| FieldError::UnknownValue(token.to_string()))?;

	if let Some((min, max)) = kind.bounds() {
		if value < min || value > max {
			return Err(FieldError::out_of_range(value, (min, max)));
		}
	}
	Ok(value)
}

impl FromStr for FieldKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"second" => Ok(Self::Second),
			"minute" => Ok(Self::Minute),
			"hour" => Ok(Self::Hour),
			"day_of_month" => Ok(Self::DayOfMonth),
			"month" => Ok(Self::Month),
			"day_of_week" => Ok(Self::DayOfWeek),
			"year" => Ok(Self::Year),
			_ => Err(format!("unknown field kind: {}", s)),
		}
	}
}
