use serde::{Deserialize, Serialize};

/// Which backing collection a reference fact was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactCategory {
    Remedy,
    Scheme,
}

/// Read-only snapshot of a remedy or scheme injected into model prompts
/// for grounding. No lifecycle beyond the periodic refresh from the
/// backing store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceFact {
    pub name: String,
    pub description: String,
    pub category: FactCategory,
}
