// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Assemble a 5-field expression from individual field strings.

use serde::{Deserialize, Serialize};

/// Field strings for [`build_cron_expression`]. Missing fields become `*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CronFieldsInput {
	#[serde(default)]
	pub minute: Option<String>,
	#[serde(default)]
	pub hour: Option<String>,
	#[serde(default)]
	pub day: Option<String>,
	#[serde(default)]
	pub month: Option<String>,
	#[serde(default)]
	pub weekday: Option<String>,
}

impl CronFieldsInput {
	pub fn minute(mut self, value: impl Into<String>) -> Self {
		self.minute = Some(value.into());
		self
	}

	pub fn hour(mut self, value: impl Into<String>) -> Self {
		self.hour = Some(value.into());
		self
	}

	pub fn day(mut self, value: impl Into<String>) -> Self {
		self.day = Some(value.into());
		self
	}

	pub fn month(mut self, value: impl Into<String>) -> Self {
		self.month = Some(value.into());
		self
	}

	pub fn weekday(mut self, value: impl Into<String>) -> Self {
		self.weekday = Some(value.into());
		self
	}
}

/// Join the five fields with single spaces. No validation happens here.
pub fn build_cron_expression(fields: &CronFieldsInput) -> String {
	[
		&fields.minute,
		&fields.hour,
		&fields.day,
		&fields.month,
		&fields.weekday,
	]
	.iter()
	.map(|field| field.as_deref().unwrap_or("*"))
	.collect::<Vec<_>>()
	.join(" ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_fields_default_to_wildcard() {
		assert_eq!(build_cron_expression(&CronFieldsInput::default()), "* * * * *");
	}

	#[test]
	fn fields_are_joined_in_order() {
		let input = CronFieldsInput::default()
			.minute("0")
			.hour("9")
			.weekday("1-5");
		assert_eq!(build_cron_expression(&input), "0 9 * * 1-5");
	}

	#[test]
	fn values_are_not_validated() {
		let input = CronFieldsInput::default().minute("99");
		assert_eq!(build_cron_expression(&input), "99 * * * *");
	}

	#[test]
	fn deserializes_partial_input() {
		let input: CronFieldsInput = serde_json::from_str(r#"{"hour":"12"}"#).unwrap();
		assert_eq!(build_cron_expression(&input), "* 12 * * *");
	}
}
