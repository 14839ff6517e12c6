use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::OutputFormat;
use crate::types::MoveOutcome;

/// Renders run results in the selected format.
#[derive(Debug, Default, Clone, Copy)]
pub struct Printer {
    pub format: OutputFormat,
    pub quiet: bool,
}

#[derive(Tabled)]
struct MoveRow {
    #[tabled(rename = "Issue")]
    issue: String,
    #[tabled(rename = "Repository")]
    repository: String,
    #[tabled(rename = "Pipeline")]
    pipeline: String,
    #[tabled(rename = "Result")]
    result: String,
}

impl From<&MoveOutcome> for MoveRow {
    fn from(outcome: &MoveOutcome) -> Self {
        Self {
            issue: format!("#{}", outcome.issue_number),
            repository: outcome.repository_id.clone().unwrap_or_else(|| "-".into()),
            pipeline: outcome.pipeline_id.clone(),
            result: match &outcome.result {
                Ok(status) => format!("moved [{status}]").green().to_string(),
                Err(e) => e.to_string().red().to_string(),
            },
        }
    }
}

#[derive(Serialize)]
struct MoveRecord<'a> {
    issue: u64,
    repository_id: Option<&'a str>,
    pipeline_id: &'a str,
    moved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a MoveOutcome> for MoveRecord<'a> {
    fn from(outcome: &'a MoveOutcome) -> Self {
        Self {
            issue: outcome.issue_number,
            repository_id: outcome.repository_id.as_deref(),
            pipeline_id: &outcome.pipeline_id,
            moved: outcome.is_success(),
            status: outcome.result.as_ref().ok().copied(),
            error: outcome.result.as_ref().err().map(ToString::to_string),
        }
    }
}

impl Printer {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn print_outcomes(&self, outcomes: &[MoveOutcome]) {
        if self.quiet {
            return;
        }
        println!("{}", self.render(outcomes));
    }

    fn render(&self, outcomes: &[MoveOutcome]) -> String {
        match self.format {
            OutputFormat::Json => {
                let records: Vec<MoveRecord> = outcomes.iter().map(MoveRecord::from).collect();
                serde_json::to_string_pretty(&records).unwrap_or_default()
            }
            OutputFormat::Table if outcomes.is_empty() => "No linked issues to move".to_string(),
            OutputFormat::Table => {
                let rows: Vec<MoveRow> = outcomes.iter().map(MoveRow::from).collect();
                Table::new(rows).with(Style::rounded()).to_string()
            }
        }
    }
}

/// Report a fatal error the way the hosting CI understands.
///
/// Under GitHub Actions this also emits an `::error::` workflow command so the
/// failure is surfaced on the run summary.
pub fn report_failure(message: &str) {
    eprintln!("Error: {message}");
    if std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true") {
        println!("::error::{}", escape_workflow_data(message));
    }
}

fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
