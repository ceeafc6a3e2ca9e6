use crate::CollectReport;

/// Render a report as a plain console summary, one block per resource.
pub fn render(report: &CollectReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n  {}: {} resource(s), {} relationship(s), cloud service {}\n\n",
        report.source_name,
        report.resources.len(),
        report.edges.len(),
        report.cloud_service_id,
    ));

    for resource in &report.resources {
        let kind = resource.types.first().map(String::as_str).unwrap_or("-");
        let name = if resource.name.is_empty() {
            String::new()
        } else {
            format!(" ({})", resource.name)
        };
        output.push_str(&format!("  [{:<24}] {}{}\n", kind, resource.id, name));

        for rel in &resource.relationships {
            output.push_str(&format!("           {} -> {}\n", rel.property, rel.value));
        }
    }

    if !report.failures.is_empty() {
        output.push_str(&format!("\n  {} resource(s) failed:\n", report.failures.len()));
        for failure in &report.failures {
            output.push_str(&format!("  [FAILED] {}: {}\n", failure.resource_id, failure.message));
        }
    }

    let status = if report.failures.is_empty() { "OK" } else { "INCOMPLETE" };
    output.push_str(&format!("\n  Result: {}\n\n", status));

    output
}
