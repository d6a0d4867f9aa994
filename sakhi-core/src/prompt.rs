//! Conversation context assembly for the assistant endpoint.
//!
//! Pure string building over already-fetched rows: recent turns render as
//! "<Role>: <content>" lines in chronological order, reference facts
//! become comma-joined name lists in source order, and a fixed
//! instruction block pins the reply language. The caller caps history at
//! [`HISTORY_LIMIT`] and guarantees a non-empty message.

use crate::locale::Language;
use crate::models::{ChatRole, FactCategory, ReferenceFact};

/// Maximum number of prior turns included in a prompt.
pub const HISTORY_LIMIT: i64 = 10;

/// Number of remedy rows and scheme rows fetched as reference facts.
pub const FACTS_LIMIT: i64 = 5;

/// Rendered in place of the history section when the user has no prior
/// turns, so the context section is never empty.
pub const NO_HISTORY_PLACEHOLDER: &str = "No previous conversation";

/// A minimal (role, content) pair for prompt rendering.
#[derive(Debug, Clone)]
pub struct PromptTurn {
    pub role: ChatRole,
    pub content: String,
}

impl PromptTurn {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Build the system prompt for one chat request.
///
/// `turns` must already be in chronological order, most recent last.
pub fn build_prompt(
    turns: &[PromptTurn],
    facts: &[ReferenceFact],
    user_message: &str,
    target: Language,
) -> String {
    let conversation = if turns.is_empty() {
        NO_HISTORY_PLACEHOLDER.to_string()
    } else {
        turns
            .iter()
            .map(|t| format!("{}: {}", t.role.label(), t.content))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let schemes = joined_names(facts, FactCategory::Scheme);
    let remedies = joined_names(facts, FactCategory::Remedy);
    let language = target.display_name();

    format!(
        "You are HealthSakhi, a compassionate and knowledgeable health assistant for Indian families.\n\
         The user is speaking in {language}.\n\
         IMPORTANT: REPLY ONLY IN THIS LANGUAGE. NEVER REPLY IN ENGLISH if the user speaks Hindi or Marathi.\n\
         Always respond naturally, helpfully, concisely, and empathetically in the user's language.\n\
         Keep language simple, culturally appropriate, and understandable for low-literacy users.\n\
         \n\
         Your expertise:\n\
         1. Maternal health (pregnancy care, prenatal checkups, nutrition)\n\
         2. Child health (vaccinations, growth milestones, common ailments)\n\
         3. Government welfare schemes (PMMVY, JSY, state schemes)\n\
         4. WHO-approved home remedies\n\
         \n\
         Available schemes: {schemes}\n\
         Available remedies: {remedies}\n\
         \n\
         Previous conversation:\n\
         {conversation}\n\
         \n\
         User's message:\n\
         {user_message}\n\
         \n\
         RESPOND ONLY IN THE DETECTED LANGUAGE ({language}).\n"
    )
}

/// Names of the facts in `category`, comma-joined in source order. No
/// deduplication or ranking: the list mirrors the backing query.
fn joined_names(facts: &[ReferenceFact], category: FactCategory) -> String {
    facts
        .iter()
        .filter(|f| f.category == category)
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(name: &str, category: FactCategory) -> ReferenceFact {
        ReferenceFact {
            name: name.to_string(),
            description: String::new(),
            category,
        }
    }

    #[test]
    fn test_empty_history_renders_placeholder() {
        let prompt = build_prompt(&[], &[], "hello", Language::En);
        assert!(prompt.contains(NO_HISTORY_PLACEHOLDER));
        assert!(!prompt.contains("Previous conversation:\n\n"));
    }

    #[test]
    fn test_hindi_scenario_keeps_order_language_and_message() {
        let turns = vec![
            PromptTurn::new(ChatRole::User, "hello"),
            PromptTurn::new(ChatRole::Assistant, "hi"),
        ];
        let prompt = build_prompt(&turns, &[], "fever kya karu", Language::Hi);

        let user_line = prompt.find("User: hello").expect("user line present");
        let assistant_line = prompt.find("Assistant: hi").expect("assistant line present");
        assert!(user_line < assistant_line, "turns must stay chronological");

        assert!(prompt.contains("The user is speaking in Hindi."));
        assert!(prompt.contains("RESPOND ONLY IN THE DETECTED LANGUAGE (Hindi)."));
        assert!(prompt.contains("fever kya karu"));
    }

    #[test]
    fn test_fact_names_grouped_by_category_in_source_order() {
        let facts = vec![
            fact("PMMVY", FactCategory::Scheme),
            fact("Ginger Tea", FactCategory::Remedy),
            fact("JSY", FactCategory::Scheme),
            fact("Turmeric Milk", FactCategory::Remedy),
        ];
        let prompt = build_prompt(&[], &facts, "hi", Language::En);
        assert!(prompt.contains("Available schemes: PMMVY, JSY"));
        assert!(prompt.contains("Available remedies: Ginger Tea, Turmeric Milk"));
    }

    #[test]
    fn test_fact_names_are_not_deduplicated() {
        let facts = vec![
            fact("PMMVY", FactCategory::Scheme),
            fact("PMMVY", FactCategory::Scheme),
        ];
        let prompt = build_prompt(&[], &facts, "hi", Language::En);
        assert!(prompt.contains("Available schemes: PMMVY, PMMVY"));
    }

    #[test]
    fn test_marathi_instruction_block() {
        let prompt = build_prompt(&[], &[], "ताप", Language::Mr);
        assert!(prompt.contains("The user is speaking in Marathi."));
        assert!(prompt.contains("NEVER REPLY IN ENGLISH"));
    }
}
