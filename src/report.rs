//! Text rendering of flow execution results.

use chrono::DateTime;
use serde_json::Value;

use crate::model::execution::FlowExecution;

const PREVIEW_ROWS: usize = 5;
const FULL_PRINT_LIMIT: usize = 10;

/// Renders an execution result as a multi-line text report: header, status
/// and timing, then per-step detail with bounded previews of row data.
pub fn format_execution(execution: &FlowExecution) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Flow \"{}\" Execution Results\n",
        execution.flow_name
    ));
    out.push_str(&"=".repeat(30));
    out.push_str("\n\n");
    out.push_str(&format!("Status: {}\n", execution.status));
    out.push_str(&format!(
        "Start Time: {}\n",
        format_timestamp(execution.start_time.as_deref())
    ));
    out.push_str(&format!(
        "End Time: {}\n",
        format_timestamp(execution.end_time.as_deref())
    ));
    out.push_str(&format!("Total Steps: {}\n\n", execution.total_steps));

    if !execution.steps.is_empty() {
        out.push_str("Step Details:\n");
        out.push_str(&"-".repeat(30));
        out.push('\n');

        for (index, step) in execution.steps.iter().enumerate() {
            out.push_str(&format!(
                "\n{}. {} ({})\n",
                index + 1,
                step.step_name,
                step.step_type
            ));
            out.push_str(&format!("   Status: {}\n", step.status));

            if let Some(data) = &step.data {
                out.push_str("   Data:\n");
                for (key, value) in data {
                    format_data_entry(&mut out, key, value);
                }
            }

            if let Some(integration) = &step.integration_name {
                out.push_str(&format!("   Integration: {}\n", integration));
            }
            if let Some(rule) = &step.rule_name {
                out.push_str(&format!("   Rule: {}\n", rule));
            }
        }
    }

    out
}

fn format_data_entry(out: &mut String, key: &str, value: &Value) {
    match value {
        Value::Array(rows) => {
            out.push_str(&format!("     {}: {} rows\n", key, rows.len()));
            if rows.len() <= FULL_PRINT_LIMIT {
                for (row_index, row) in rows.iter().enumerate() {
                    out.push_str(&format!("       {}: {}\n", row_index, row));
                }
            } else {
                out.push_str(&format!("       (showing first {} rows)\n", PREVIEW_ROWS));
                for (row_index, row) in rows.iter().take(PREVIEW_ROWS).enumerate() {
                    out.push_str(&format!("       {}: {}\n", row_index, row));
                }
                out.push_str(&format!(
                    "       ... and {} more rows\n",
                    rows.len() - PREVIEW_ROWS
                ));
            }
        }
        Value::String(text) => out.push_str(&format!("     {}: {}\n", key, text)),
        other => out.push_str(&format!("     {}: {}\n", key, other)),
    }
}

/// Timestamps arrive as RFC 3339 strings, possibly with a bracketed zone id
/// suffix that is not part of RFC 3339. Unparseable input is shown raw.
fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return "-".to_string();
    };

    let trimmed = raw.split('[').next().unwrap_or(raw);
    match DateTime::parse_from_rfc3339(trimmed) {
        Ok(timestamp) => timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}
