pub mod compact;
pub mod console;
pub mod json;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::CollectReport;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Compact,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            "compact" | "ndjson" => Some(Self::Compact),
            _ => None,
        }
    }
}

/// Render a collect report into the specified format.
pub fn render(report: &CollectReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render(report)),
        OutputFormat::Json => json::render(report),
        OutputFormat::Compact => compact::render(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_format_names() {
        assert_eq!(OutputFormat::from_str_lenient("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str_lenient("text"), Some(OutputFormat::Console));
        assert_eq!(OutputFormat::from_str_lenient("ndjson"), Some(OutputFormat::Compact));
        assert_eq!(OutputFormat::from_str_lenient("sarif"), None);
    }
}
