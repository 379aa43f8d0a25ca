use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Label {
    pub name: String,
    /// Six hex digits without a leading `#`.
    #[serde(default)]
    pub color: String,
    pub description: Option<String>,
}
