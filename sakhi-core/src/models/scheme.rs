use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::locale::{resolve, Language};

/// One eligibility entry. The upstream data kept this as a free-form JSON
/// object; values are constrained to scalars here and anything else is
/// rejected at the serde boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CriteriaValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

/// A government welfare scheme row (PMMVY, JSY, state schemes).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct GovernmentScheme {
    pub id: Uuid,
    pub scheme_name: String,
    pub scheme_name_hi: Option<String>,
    pub scheme_name_mr: Option<String>,
    pub description: String,
    pub description_hi: Option<String>,
    pub description_mr: Option<String>,
    pub eligibility_criteria: Json<BTreeMap<String, CriteriaValue>>,
    pub benefits: String,
    pub benefits_hi: Option<String>,
    pub benefits_mr: Option<String>,
    pub application_process: String,
    pub application_process_hi: Option<String>,
    pub application_process_mr: Option<String>,
    pub official_website: Option<String>,
    pub state: Option<String>,
    pub category: String,
    pub active: bool,
}

/// Fully localized scheme view, produced by [`GovernmentScheme::localize`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedScheme {
    pub id: Uuid,
    pub scheme_name: String,
    pub description: String,
    pub eligibility_criteria: BTreeMap<String, CriteriaValue>,
    pub benefits: String,
    pub application_process: String,
    pub official_website: Option<String>,
    pub state: Option<String>,
    pub category: String,
}

impl GovernmentScheme {
    pub fn localize(&self, lang: Language) -> LocalizedScheme {
        LocalizedScheme {
            id: self.id,
            scheme_name: resolve(
                &self.scheme_name,
                self.scheme_name_hi.as_deref(),
                self.scheme_name_mr.as_deref(),
                lang,
            )
            .to_string(),
            description: resolve(
                &self.description,
                self.description_hi.as_deref(),
                self.description_mr.as_deref(),
                lang,
            )
            .to_string(),
            eligibility_criteria: self.eligibility_criteria.0.clone(),
            benefits: resolve(
                &self.benefits,
                self.benefits_hi.as_deref(),
                self.benefits_mr.as_deref(),
                lang,
            )
            .to_string(),
            application_process: resolve(
                &self.application_process,
                self.application_process_hi.as_deref(),
                self.application_process_mr.as_deref(),
                lang,
            )
            .to_string(),
            official_website: self.official_website.clone(),
            state: self.state.clone(),
            category: self.category.clone(),
        }
    }

    /// Case-insensitive match over name and description, used by the
    /// in-memory search filter.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.scheme_name.to_lowercase().contains(&q)
            || self.description.to_lowercase().contains(&q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GovernmentScheme {
        let mut criteria = BTreeMap::new();
        criteria.insert("min_age".to_string(), CriteriaValue::Number(18.0));
        criteria.insert("first_child".to_string(), CriteriaValue::Flag(true));
        criteria.insert("residency".to_string(), CriteriaValue::Text("India".to_string()));

        GovernmentScheme {
            id: Uuid::new_v4(),
            scheme_name: "PMMVY".to_string(),
            scheme_name_hi: Some("पीएमएमवीवाई".to_string()),
            scheme_name_mr: None,
            description: "Maternity benefit programme".to_string(),
            description_hi: None,
            description_mr: Some("मातृत्व लाभ योजना".to_string()),
            eligibility_criteria: Json(criteria),
            benefits: "Cash incentive of Rs 5000".to_string(),
            benefits_hi: None,
            benefits_mr: None,
            application_process: "Apply at the Anganwadi centre".to_string(),
            application_process_hi: None,
            application_process_mr: None,
            official_website: Some("https://pmmvy.example.gov.in".to_string()),
            state: None,
            category: "maternal".to_string(),
            active: true,
        }
    }

    #[test]
    fn test_localize_mixed_translations_fall_back_per_field() {
        let hi = sample().localize(Language::Hi);
        assert_eq!(hi.scheme_name, "पीएमएमवीवाई");
        assert_eq!(hi.description, "Maternity benefit programme");

        let mr = sample().localize(Language::Mr);
        assert_eq!(mr.scheme_name, "PMMVY");
        assert_eq!(mr.description, "मातृत्व लाभ योजना");
    }

    #[test]
    fn test_criteria_values_deserialize_as_scalars() {
        let parsed: BTreeMap<String, CriteriaValue> = serde_json::from_str(
            r#"{"min_age": 18, "first_child": true, "residency": "India"}"#,
        )
        .unwrap();
        assert_eq!(parsed["min_age"], CriteriaValue::Number(18.0));
        assert_eq!(parsed["first_child"], CriteriaValue::Flag(true));
        assert_eq!(
            parsed["residency"],
            CriteriaValue::Text("India".to_string())
        );
    }

    #[test]
    fn test_criteria_values_reject_nested_objects() {
        let parsed: Result<BTreeMap<String, CriteriaValue>, _> =
            serde_json::from_str(r#"{"income": {"max": 100000}}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_matches_searches_name_and_description() {
        let scheme = sample();
        assert!(scheme.matches("pmmvy"));
        assert!(scheme.matches("maternity"));
        assert!(!scheme.matches("vaccination"));
    }
}
