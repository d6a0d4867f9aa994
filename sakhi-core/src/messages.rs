//! Fixed interface strings for the three supported languages.
//!
//! The apology is the payload of every generation-failure response; the
//! welcome opens a chat session. Both are fixed per language, never
//! machine-translated.

use crate::locale::Language;

/// Greeting shown when a chat session opens.
pub fn welcome(lang: Language) -> &'static str {
    match lang {
        Language::En => {
            "Namaste! I'm your HealthSakhi health companion. I'm here to help you with maternal & child health questions, government schemes, and trusted home remedies. How can I assist you today?"
        }
        Language::Hi => {
            "नमस्ते! मैं आपकी HealthSakhi स्वास्थ्य साथी हूँ। मैं मातृ एवं बाल स्वास्थ्य प्रश्नों, सरकारी योजनाओं और भरोसेमंद घरेलू उपचारों में आपकी सहायता के लिए हूँ। आज मैं आपकी कैसे मदद कर सकती हूँ?"
        }
        Language::Mr => {
            "नमस्ते! मी तुमची HealthSakhi आरोग्य साथी आहे. मी तुम्हाला माता आणि बाल आरोग्य प्रश्नांची, सरकारी योजनांची आणि विश्वसनीय घरगुती उपायांची मदत करण्यासाठी येथे आहे. आज मी तुम्हाला कशी मदत करू शकते?"
        }
    }
}

/// Fixed apology returned when reply generation fails.
pub fn apology(lang: Language) -> &'static str {
    match lang {
        Language::En => {
            "I apologize, but I'm having trouble responding right now. Please try again."
        }
        Language::Hi => {
            "मुझे माफ़ करना, मुझे अभी जवाब देने में परेशानी हो रही है। कृपया पुनः प्रयास करें।"
        }
        Language::Mr => {
            "मी माफी मागतो, पण मला सध्या प्रतिसाद देण्यात अडचण येत आहे. कृपया पुन्हा प्रयत्न करा."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strings_exist_for_every_language() {
        for lang in [Language::En, Language::Hi, Language::Mr] {
            assert!(!welcome(lang).is_empty());
            assert!(!apology(lang).is_empty());
        }
    }

    #[test]
    fn test_apology_is_localized() {
        assert_ne!(apology(Language::En), apology(Language::Hi));
        assert_ne!(apology(Language::Hi), apology(Language::Mr));
    }
}
