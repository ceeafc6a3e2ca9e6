use crate::error::Result;
use crate::CollectReport;

/// One compact resource union per line, in report order.
pub fn render(report: &CollectReport) -> Result<String> {
    let mut output = String::new();
    for resource in &report.resources {
        output.push_str(&resource.evidence.resource.to_json()?);
        output.push('\n');
    }
    Ok(output)
}
