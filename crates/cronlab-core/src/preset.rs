// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Catalog of named example expressions.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Grouping used when listing presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum PresetCategory {
	Frequent,
	Daily,
	Weekly,
	Monthly,
	Yearly,
	Special,
}

impl fmt::Display for PresetCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Frequent => write!(f, "frequent"),
			Self::Daily => write!(f, "daily"),
			Self::Weekly => write!(f, "weekly"),
			Self::Monthly => write!(f, "monthly"),
			Self::Yearly => write!(f, "yearly"),
			Self::Special => write!(f, "special"),
		}
	}
}

impl FromStr for PresetCategory {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"frequent" => Ok(Self::Frequent),
			"daily" => Ok(Self::Daily),
			"weekly" => Ok(Self::Weekly),
			"monthly" => Ok(Self::Monthly),
			"yearly" => Ok(Self::Yearly),
			"special" => Ok(Self::Special),
			_ => Err(format!("unknown preset category: {}", s)),
		}
	}
}

/// A named example expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CronPreset {
	pub name: &'static str,
	pub expression: &'static str,
	pub description: &'static str,
	pub category: PresetCategory,
}

const fn preset(
	name: &'static str,
	expression: &'static str,
	description: &'static str,
	category: PresetCategory,
) -> CronPreset {
	CronPreset {
		name,
		expression,
		description,
		category,
	}
}

pub static CRON_PRESETS: &[CronPreset] = &[
	// Frequent
	preset("Every minute", "* * * * *", "Runs once every minute", PresetCategory::Frequent),
	preset("Every 5 minutes", "*/5 * * * *", "Runs every five minutes", PresetCategory::Frequent),
	preset("Every 15 minutes", "*/15 * * * *", "Runs every quarter hour", PresetCategory::Frequent),
	preset("Every 30 minutes", "*/30 * * * *", "Runs every half hour", PresetCategory::Frequent),
	preset("Every hour", "0 * * * *", "Runs at the start of every hour", PresetCategory::Frequent),
	preset("Every 6 hours", "0 */6 * * *", "Runs four times a day", PresetCategory::Frequent),
	// Daily
	preset("Daily at midnight", "0 0 * * *", "Runs every day at 00:00", PresetCategory::Daily),
	preset("Daily at 9 AM", "0 9 * * *", "Runs every morning at 09:00", PresetCategory::Daily),
	preset("Daily at noon", "0 12 * * *", "Runs every day at 12:00", PresetCategory::Daily),
	preset("Twice a day", "0 9,21 * * *", "Runs at 09:00 and 21:00", PresetCategory::Daily),
	// Weekly
	preset("Weekdays at 9 AM", "0 9 * * 1-5", "Runs Monday through Friday at 09:00", PresetCategory::Weekly),
	preset("Every Monday", "0 0 * * 1", "Runs every Monday at 00:00", PresetCategory::Weekly),
	preset("Weekends", "0 10 * * 0,6", "Runs Saturday and Sunday at 10:00", PresetCategory::Weekly),
	preset("Every Sunday", "0 0 * * 0", "Runs every Sunday at 00:00", PresetCategory::Weekly),
	// Monthly
	preset("First of the month", "0 0 1 * *", "Runs on day 1 of every month at 00:00", PresetCategory::Monthly),
	preset("Mid-month", "0 0 15 * *", "Runs on day 15 of every month at 00:00", PresetCategory::Monthly),
	preset("Last day of the month", "0 0 L * *", "Runs on the last day of every month", PresetCategory::Monthly),
	preset("Quarterly", "0 0 1 */3 *", "Runs on the first day of every quarter", PresetCategory::Monthly),
	// Yearly
	preset("Yearly", "0 0 1 1 *", "Runs on January 1st at 00:00", PresetCategory::Yearly),
	preset("Twice a year", "0 0 1 1,7 *", "Runs on January 1st and July 1st", PresetCategory::Yearly),
	// Special
	preset("@hourly", "@hourly", "Alias for 0 * * * *", PresetCategory::Special),
	preset("@daily", "@daily", "Alias for 0 0 * * *", PresetCategory::Special),
	preset("@weekly", "@weekly", "Alias for 0 0 * * 0", PresetCategory::Special),
	preset("@monthly", "@monthly", "Alias for 0 0 1 * *", PresetCategory::Special),
	preset("@yearly", "@yearly", "Alias for 0 0 1 1 *", PresetCategory::Special),
	preset("@reboot", "@reboot", "Runs at startup; treated as yearly for scheduling", PresetCategory::Special),
];

/// Presets in one category, in catalog order.
pub fn presets_by_category(category: PresetCategory) -> impl Iterator<Item = &'static CronPreset> {
	CRON_PRESETS
		.iter()
		.filter(move |preset| preset.category == category)
}
