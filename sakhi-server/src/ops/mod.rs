pub mod chat;
pub mod content;
pub mod profiles;
pub mod reminders;
