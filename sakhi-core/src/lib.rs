pub mod completion;
pub mod config;
pub mod db;
pub mod error;
pub mod locale;
pub mod messages;
pub mod models;
pub mod prompt;
pub mod reminders;
pub mod translate;

pub use completion::{
    CerebrasClient, CompletionBackend, CompletionConfig, CompletionError,
};
pub use config::SakhiConfig;
pub use error::SakhiError;
pub use locale::Language;
pub use reminders::ReminderStatus;
pub use translate::{
    DisabledTranslation, HttpTranslationClient, Translation, TranslationBackend,
    TranslationOutcome,
};
