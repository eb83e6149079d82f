use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Key success metric tracked for an area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ksm {
    pub id: Uuid,
    pub name: String,
    pub abbreviation: String,
    pub formula: String,
    pub description: String,
    /// Value the metric should stay within.
    pub guard_rail: String,
    /// Value at which the metric needs attention.
    pub alert_level: String,
}

impl Default for Ksm {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            abbreviation: String::new(),
            formula: String::new(),
            description: String::new(),
            guard_rail: String::new(),
            alert_level: String::new(),
        }
    }
}
