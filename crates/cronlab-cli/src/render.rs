// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Plain-text rendering of engine results.

use std::fmt::Write;

use cronlab_core::{CronParseResult, CronPreset};

/// Multi-section report for `cronlab parse`.
pub fn render_parse(result: &CronParseResult) -> String {
	let mut out = String::new();

	let _ = writeln!(out, "Expression:  {}", result.expression);
	if !result.normalized_expression.is_empty()
		&& result.normalized_expression != result.expression.trim()
	{
		let _ = writeln!(out, "Normalized:  {}", result.normalized_expression);
	}
	if !result.human_description.is_empty() {
		let _ = writeln!(out, "Description: {}", result.human_description);
	}
	let _ = writeln!(out, "Timezone:    {}", result.timezone);

	if !result.fields.is_empty() {
		let name_width = result
			.fields
			.iter()
			.map(|f| f.kind.name().len())
			.max()
			.unwrap_or(0);
		let raw_width = result
			.fields
			.iter()
			.map(|f| f.raw_value.len())
			.max()
			.unwrap_or(0);

		let _ = writeln!(out, "\nFields:");
		for field in &result.fields {
			let detail = match &field.error_message {
				Some(message) => format!("invalid: {message}"),
				None => field.human_description.clone(),
			};
			let _ = writeln!(
				out,
				"  {:<name_width$}  {:<raw_width$}  {}",
				field.kind.name(),
				field.raw_value,
				detail,
			);
		}
	}

	write_list(&mut out, "Errors", &result.validation.errors);
	write_list(&mut out, "Warnings", &result.validation.warnings);

	if result.is_valid() {
		let _ = writeln!(out, "\nNext executions:");
		if result.next_executions.is_empty() {
			let _ = writeln!(out, "  none in the search window");
		}
		for (index, execution) in result.next_executions.iter().enumerate() {
			let _ = writeln!(
				out,
				"  {:>2}. {} ({})",
				index + 1,
				execution.formatted,
				execution.relative
			);
		}
	}

	out
}

/// One line per preset, grouped in catalog order.
pub fn render_presets<'a>(presets: impl IntoIterator<Item = &'a CronPreset>) -> String {
	let presets: Vec<&CronPreset> = presets.into_iter().collect();
	let width = presets
		.iter()
		.map(|p| p.expression.len())
		.max()
		.unwrap_or(0);

	let mut out = String::new();
	let mut current = None;
	for preset in presets {
		if current != Some(preset.category) {
			if current.is_some() {
				out.push('\n');
			}
			let _ = writeln!(out, "[{}]", preset.category);
			current = Some(preset.category);
		}
		let _ = writeln!(
			out,
			"  {:<width$}  {} - {}",
			preset.expression, preset.name, preset.description
		);
	}
	out
}

fn write_list(out: &mut String, title: &str, items: &[String]) {
	if items.is_empty() {
		return;
	}
	let _ = writeln!(out, "\n{title}:");
	for item in items {
		let _ = writeln!(out, "  - {item}");
	}
}
