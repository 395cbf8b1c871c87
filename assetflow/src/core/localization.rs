//! Localization payloads attached to scripts.

use serde::{Deserialize, Serialize};

/// Data exposed to a script as a global object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizationPayload {
    /// Handle of the script the data is printed next to.
    pub handle: String,
    /// Global variable name, e.g. `avadaHeaderVars`.
    pub object_name: String,
    /// Ordered key/value data.
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl LocalizationPayload {
    /// Creates a payload.
    #[must_use]
    pub fn new(
        handle: impl Into<String>,
        object_name: impl Into<String>,
        data: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            handle: handle.into(),
            object_name: object_name.into(),
            data,
        }
    }

    /// Gets a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Renders the payload as the inline script the host prints,
    /// `var name = {...};`.
    ///
    /// Slashes are escaped as `\/` so string values cannot close the
    /// surrounding `<script>` element.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be serialized.
    pub fn to_inline_script(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(&self.data)?.replace('/', "\\/");
        Ok(format!("var {} = {};", self.object_name, json))
    }
}
