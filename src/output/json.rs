use crate::error::Result;
use crate::CollectReport;

/// Render the full report as pretty JSON.
pub fn render(report: &CollectReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}
