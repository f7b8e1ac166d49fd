use crate::error::Result;
use crate::io;
use crate::paths::Layout;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Performance budgets attached to a plan. All optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budgets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lcp_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cls: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighthouse_min: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub version: u32,
    pub goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgets: Option<Budgets>,
    pub created_at: DateTime<Utc>,
}

impl Plan {
    pub fn new(goal: impl Into<String>, budgets: Option<Budgets>) -> Self {
        Self {
            version: 1,
            goal: goal.into(),
            budgets,
            created_at: Utc::now(),
        }
    }

    /// Overwrites the plan file wholesale.
    pub fn save(&self, layout: &Layout) -> Result<()> {
        io::write_json(&layout.plan_file, self)
    }

    pub fn load(layout: &Layout) -> Result<Self> {
        io::read_json(&layout.plan_file)
    }
}
