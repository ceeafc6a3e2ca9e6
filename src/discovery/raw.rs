use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Builds the `raw` snapshot of a resource: every provider payload it was
/// translated from, grouped by the payload's type name.
///
/// ```
/// use cloudposture::discovery::Raw;
///
/// #[derive(serde::Serialize)]
/// struct Server { id: &'static str }
///
/// let raw = Raw::new().with(&Server { id: "srv-1" }).build();
/// assert!(raw.contains(r#"[{"id":"srv-1"}]"#));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Raw {
    payloads: BTreeMap<String, Vec<Value>>,
}

impl Raw {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a payload. Payloads that fail to serialize are kept as `null`.
    pub fn with<T: Serialize + ?Sized>(mut self, payload: &T) -> Self {
        let type_name = std::any::type_name::<T>();
        let value = serde_json::to_value(payload).unwrap_or_else(|e| {
            tracing::debug!(type_name, error = %e, "raw payload not serializable");
            Value::Null
        });
        self.payloads
            .entry(type_name.to_string())
            .or_default()
            .push(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    pub fn build(&self) -> String {
        serde_json::to_string(&self.payloads).unwrap_or_default()
    }
}

/// Shortcut for a single payload.
pub fn raw<T: Serialize + ?Sized>(payload: &T) -> String {
    Raw::new().with(payload).build()
}
