// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ready-to-paste snippets embedding an expression.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const PLACEHOLDER: &str = "{expression}";

const SHELL_TEMPLATE: &str = r#"# Crontab entry (edit with: crontab -e)
# minute hour day-of-month month day-of-week command
{expression} /path/to/your/script.sh >> /var/log/cron-job.log 2>&1
"#;

const DOCKER_TEMPLATE: &str = r#"# docker-compose.yml
services:
  cron-job:
    image: alpine:latest
    command: >
      sh -c "echo '{expression} /usr/local/bin/job.sh' | crontab - && crond -f -l 2"
    volumes:
      - ./job.sh:/usr/local/bin/job.sh:ro
    restart: unless-stopped
"#;

const K8S_TEMPLATE: &str = r#"apiVersion: batch/v1
kind: CronJob
metadata:
  name: scheduled-job
spec:
  schedule: "{expression}"
  concurrencyPolicy: Forbid
  jobTemplate:
    spec:
      template:
        spec:
          containers:
            - name: job
              image: busybox:latest
              command: ["/bin/sh", "-c", "echo Running scheduled job"]
          restartPolicy: OnFailure
"#;

const GITHUB_ACTIONS_TEMPLATE: &str = r#"name: Scheduled Workflow

on:
  schedule:
    - cron: '{expression}'
  workflow_dispatch:

jobs:
  run:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - name: Run scheduled task
        run: echo "Running scheduled task"
"#;

const PYTHON_TEMPLATE: &str = r#"from apscheduler.schedulers.blocking import BlockingScheduler
from apscheduler.triggers.cron import CronTrigger


def job():
    print("Running scheduled job")


scheduler = BlockingScheduler()
scheduler.add_job(job, CronTrigger.from_crontab("{expression}"))
scheduler.start()
"#;

const NODEJS_TEMPLATE: &str = r#"const cron = require('node-cron');

cron.schedule('{expression}', () => {
  console.log('Running scheduled job');
});
"#;

/// Target context for [`export_cron_expression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
	Shell,
	Docker,
	K8s,
	GithubActions,
	Python,
	Nodejs,
}

impl ExportFormat {
	pub const ALL: [ExportFormat; 6] = [
		Self::Shell,
		Self::Docker,
		Self::K8s,
		Self::GithubActions,
		Self::Python,
		Self::Nodejs,
	];

	fn template(self) -> &'static str {
		match self {
			Self::Shell => SHELL_TEMPLATE,
			Self::Docker => DOCKER_TEMPLATE,
			Self::K8s => K8S_TEMPLATE,
			Self::GithubActions => GITHUB_ACTIONS_TEMPLATE,
			Self::Python => PYTHON_TEMPLATE,
			Self::Nodejs => NODEJS_TEMPLATE,
		}
	}
}

impl fmt::Display for ExportFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Shell => write!(f, "shell"),
			Self::Docker => write!(f, "docker"),
			Self::K8s => write!(f, "k8s"),
			Self::GithubActions => write!(f, "github-actions"),
			Self::Python => write!(f, "python"),
			Self::Nodejs => write!(f, "nodejs"),
		}
	}
}

impl FromStr for ExportFormat {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"shell" => Ok(Self::Shell),
			"docker" => Ok(Self::Docker),
			"k8s" => Ok(Self::K8s),
			"github-actions" => Ok(Self::GithubActions),
			"python" => Ok(Self::Python),
			"nodejs" => Ok(Self::Nodejs),
			_ => Err(format!("unknown export format: {}", s)),
		}
	}
}

/// Render `expression` into a snippet for `format`.
///
/// The expression is embedded verbatim; validate it first with
/// [`crate::parse_cron_expression`] if that matters.
pub fn export_cron_expression(expression: &str, format: ExportFormat) -> String {
	format.template().replace(PLACEHOLDER, expression)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn k8s_embeds_schedule() {
		let snippet = export_cron_expression("0 9 * * 1-5", ExportFormat::K8s);
		assert!(snippet.contains(r#"schedule: "0 9 * * 1-5""#));
		assert!(snippet.contains("kind: CronJob"));
	}

	#[test]
	fn every_format_embeds_the_expression() {
		for format in ExportFormat::ALL {
			let snippet = export_cron_expression("*/15 * * * *", format);
			assert!(snippet.contains("*/15 * * * *"), "{} snippet", format);
			assert!(!snippet.contains(PLACEHOLDER), "{} snippet", format);
		}
	}

	#[test]
	fn github_actions_quotes_with_single_quotes() {
		let snippet = export_cron_expression("0 0 * * *", ExportFormat::GithubActions);
		assert!(snippet.contains("- cron: '0 0 * * *'"));
	}

	#[test]
	fn format_names_roundtrip() {
		for format in ExportFormat::ALL {
			assert_eq!(format.to_string().parse::<ExportFormat>().unwrap(), format);
		}
		assert!("crontab".parse::<ExportFormat>().is_err());
	}

	#[test]
	fn serde_names_match_display() {
		for format in ExportFormat::ALL {
			let json = serde_json::to_string(&format).unwrap();
			assert_eq!(json, format!("\"{}\"", format));
		}
	}
}
