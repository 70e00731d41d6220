//! The permission document and the store contract built on top of it.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::types::{TagallError, TagallResult};

/// Top-level key holding the per-group flags
pub const GROUP_FLAGS_KEY: &str = "tagallPermissions";
/// Top-level key holding the owner-controlled global override
pub const GLOBAL_FLAG_KEY: &str = "globalTagallAllowed";

/// The shared document, kept as raw JSON so keys owned by other features
/// survive a read-modify-write untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionDocument {
    root: Map<String, Value>,
}

impl PermissionDocument {
    /// Build a document from parsed JSON; anything but an object is unreadable
    pub fn from_value(value: Value) -> TagallResult<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(TagallError::store_unreadable(format!(
                "expected a JSON object at the document root, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parse raw file contents
    pub fn from_slice(bytes: &[u8]) -> TagallResult<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| TagallError::store_unreadable(format!("invalid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Flag for one group; absent or non-boolean values read as `false`
    pub fn group_flag(&self, group_id: &str) -> bool {
        self.root
            .get(GROUP_FLAGS_KEY)
            .and_then(Value::as_object)
            .and_then(|groups| groups.get(group_id))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn global_flag(&self) -> bool {
        self.root
            .get(GLOBAL_FLAG_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn set_group_flag(&mut self, group_id: &str, enabled: bool) {
        let groups = self
            .root
            .entry(GROUP_FLAGS_KEY)
            .or_insert_with(|| Value::Object(Map::new()));

        if !groups.is_object() {
            *groups = Value::Object(Map::new());
        }

        if let Value::Object(groups) = groups {
            groups.insert(group_id.to_string(), Value::Bool(enabled));
        }
    }

    pub fn set_global_flag(&mut self, enabled: bool) {
        self.root
            .insert(GLOBAL_FLAG_KEY.to_string(), Value::Bool(enabled));
    }

    /// Serialize as pretty-printed JSON with two-space indentation
    pub fn to_pretty_vec(&self) -> TagallResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.root)?)
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.root.clone())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Raw load/save of the whole document.
///
/// `load` returns an empty document when nothing has been written yet and an
/// error when the stored content cannot be parsed. `save` must replace the
/// document atomically: on error the previous content stays visible.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    async fn load(&self) -> TagallResult<PermissionDocument>;
    async fn save(&self, document: &PermissionDocument) -> TagallResult<()>;
}

/// Read and write the tagall flags.
///
/// Reads never fail: an unreadable document yields the admins-only default.
/// Writes report success as a boolean and leave the stored state untouched on
/// failure.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    async fn get_group_flag(&self, group_id: &str) -> bool;
    async fn set_group_flag(&self, group_id: &str, enabled: bool) -> bool;
    async fn get_global_flag(&self) -> bool;
    async fn set_global_flag(&self, enabled: bool) -> bool;
}

#[async_trait]
impl<B> PermissionStore for B
where
    B: DocumentBackend,
{
    async fn get_group_flag(&self, group_id: &str) -> bool {
        match self.load().await {
            Ok(document) => {
                let enabled = document.group_flag(group_id);
                debug!(group_id, enabled, "read group tagall flag");
                enabled
            }
            Err(error) => {
                warn!(%error, group_id, "error reading tagall permissions, using admins-only default");
                false
            }
        }
    }

    async fn set_group_flag(&self, group_id: &str, enabled: bool) -> bool {
        // A corrupt document is not overwritten; other features own keys in it.
        let result = async {
            let mut document = self.load().await?;
            document.set_group_flag(group_id, enabled);
            self.save(&document).await
        }
        .await;

        match result {
            Ok(()) => {
                info!(group_id, enabled, "group tagall flag updated");
                true
            }
            Err(error) => {
                warn!(%error, group_id, enabled, "error setting tagall permission");
                false
            }
        }
    }

    async fn get_global_flag(&self) -> bool {
        match self.load().await {
            Ok(document) => {
                let enabled = document.global_flag();
                debug!(enabled, "read global tagall flag");
                enabled
            }
            Err(error) => {
                warn!(%error, "error reading global tagall setting, using disabled default");
                false
            }
        }
    }

    async fn set_global_flag(&self, enabled: bool) -> bool {
        let result = async {
            let mut document = self.load().await?;
            document.set_global_flag(enabled);
            self.save(&document).await
        }
        .await;

        match result {
            Ok(()) => {
                info!(enabled, "global tagall flag updated");
                true
            }
            Err(error) => {
                warn!(%error, enabled, "error setting global tagall permission");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_defaults_to_false() {
        let document = PermissionDocument::default();
        assert!(!document.group_flag("group@g.us"));
        assert!(!document.global_flag());
    }

    #[test]
    fn test_non_object_root_is_unreadable() {
        for value in [json!(null), json!([1, 2]), json!("text"), json!(true)] {
            let err = PermissionDocument::from_value(value).unwrap_err();
            assert!(matches!(err, TagallError::StoreUnreadable { .. }));
        }
    }

    #[test]
    fn test_invalid_json_is_unreadable() {
        let err = PermissionDocument::from_slice(b"{\"tagallPermissions\": ").unwrap_err();
        assert!(matches!(err, TagallError::StoreUnreadable { .. }));

        let err = PermissionDocument::from_slice(b"").unwrap_err();
        assert!(matches!(err, TagallError::StoreUnreadable { .. }));
    }

    #[test]
    fn test_non_boolean_flags_read_as_false() {
        let document = PermissionDocument::from_value(json!({
            "tagallPermissions": { "a@g.us": "yes", "b@g.us": 1, "c@g.us": true },
            "globalTagallAllowed": "true"
        }))
        .unwrap();

        assert!(!document.group_flag("a@g.us"));
        assert!(!document.group_flag("b@g.us"));
        assert!(document.group_flag("c@g.us"));
        assert!(!document.global_flag());
    }

    #[test]
    fn test_set_group_flag_replaces_malformed_group_map() {
        let mut document = PermissionDocument::from_value(json!({
            "tagallPermissions": "broken",
            "welcome": { "a@g.us": "hi" }
        }))
        .unwrap();

        document.set_group_flag("a@g.us", true);

        assert_eq!(
            document.as_value(),
            json!({
                "tagallPermissions": { "a@g.us": true },
                "welcome": { "a@g.us": "hi" }
            })
        );
    }

    #[test]
    fn test_setters_preserve_unrelated_keys() {
        let mut document = PermissionDocument::from_value(json!({
            "antilink": { "x@g.us": true },
            "tagallPermissions": { "x@g.us": false },
            "warnings": [1, 2, 3]
        }))
        .unwrap();

        document.set_group_flag("y@g.us", true);
        document.set_global_flag(true);

        assert_eq!(
            document.as_value(),
            json!({
                "antilink": { "x@g.us": true },
                "tagallPermissions": { "x@g.us": false, "y@g.us": true },
                "warnings": [1, 2, 3],
                "globalTagallAllowed": true
            })
        );
    }

    #[test]
    fn test_pretty_output_uses_two_space_indent() {
        let mut document = PermissionDocument::default();
        document.set_global_flag(false);
        let text = String::from_utf8(document.to_pretty_vec().unwrap()).unwrap();
        assert_eq!(text, "{\n  \"globalTagallAllowed\": false\n}");
    }
}
