// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the cron engine.
//!
//! These never escape [`crate::parse_cron_expression`]; they are folded into
//! the structured [`crate::CronParseResult`] before it is returned.

use thiserror::Error;

use crate::field::FieldKind;

/// Result type for cron engine operations.
pub type Result<T> = std::result::Result<T, CronError>;

/// Errors that make a whole expression unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CronError {
	#[error("Cron expression cannot be empty")]
	Empty,

	#[error("Invalid number of fields: expected 5, 6 or 7, found {0}")]
	FieldCount(usize),

	#[error("Unknown alias '{0}'")]
	UnknownAlias(String),

	#[error("{kind}: {message}")]
	InvalidField { kind: FieldKind, message: String },
}

/// Errors raised while parsing a single field token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
	#[error("empty value in list")]
	EmptyPart,

	#[error("unrecognized value '{0}'")]
	UnknownValue(String),

	#[error("value {value} is out of range ({min}-{max})")]
	OutOfRange { value: u32, min: u32, max: u32 },

	#[error("range '{0}' needs both a start and an end")]
	IncompleteRange(String),

	#[error("range start {start} is greater than end {end}")]
	ReversedRange { start: u32, end: u32 },

	#[error("step '{0}' must be a positive integer")]
	InvalidStep(String),

	#[error("'{token}' is only allowed in the {allowed} field")]
	MisplacedSpecial {
		token: String,
		allowed: &'static str,
	},

	#[error("occurrence {0} must be between 1 and 5")]
	InvalidOccurrence(u32),
}

impl FieldError {
	pub(crate) fn out_of_range(value: u32, (min, max): (u32, u32)) -> Self {
		Self::OutOfRange { value, min, max }
	}

	/// Attach the field that failed to parse.
	pub fn in_field(self, kind: FieldKind) -> CronError {
		CronError::InvalidField {
			kind,
			message: self.to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn field_count_message_names_the_count() {
		assert_eq!(
			CronError::FieldCount(4).to_string(),
			"Invalid number of fields: expected 5, 6 or 7, found 4"
		);
	}

	#[test]
	fn field_error_carries_field_name() {
		let err = FieldError::out_of_range(60, (0, 59)).in_field(FieldKind::Minute);
		assert_eq!(err.to_string(), "minute: value 60 is out of range (0-59)");
	}
}
