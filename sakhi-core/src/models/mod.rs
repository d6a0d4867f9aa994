pub mod chat;
pub mod fact;
pub mod profile;
pub mod remedy;
pub mod reminder;
pub mod scheme;

pub use chat::{ChatRole, ChatTurn};
pub use fact::{FactCategory, ReferenceFact};
pub use profile::Profile;
pub use remedy::{HomeRemedy, LocalizedRemedy};
pub use reminder::HealthReminder;
pub use scheme::{CriteriaValue, GovernmentScheme, LocalizedScheme};
