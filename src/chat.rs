//! Healthcare assistant chat.
//!
//! Messages are forwarded to the language model with a safety prompt. Each
//! message is also tagged with an intent from the triage keyword lists so the
//! client can offer SOS or symptom-check shortcuts.

use serde::Serialize;

use crate::oracle::{LanguageModel, OracleError};
use crate::triage::keywords::scan_flags;

pub const UNAVAILABLE_REPLY: &str = "AI service temporarily unavailable.";

/// Reply language, selected by a short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Marathi,
}

impl Language {
    /// Unknown or missing codes fall back to English.
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(|c| c.trim().to_lowercase()).as_deref() {
            Some("hi") => Language::Hindi,
            Some("mr") => Language::Marathi,
            _ => Language::English,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Marathi => "Marathi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatIntent {
    Emergency,
    Symptom,
    General,
}

pub fn detect_intent(message: &str) -> ChatIntent {
    let flags = scan_flags(message);
    if flags.red_flag.is_some() {
        ChatIntent::Emergency
    } else if flags.yellow_flag.is_some() {
        ChatIntent::Symptom
    } else {
        ChatIntent::General
    }
}

pub fn chat_prompt(message: &str, language: Language) -> String {
    format!(
        "You are a healthcare assistant.\n\n\
         Respond strictly in {}.\n\
         Use simple, clear language appropriate for the user's language.\n\
         Do not diagnose or prescribe medication.\n\
         If symptoms indicate emergency, suggest using the SOS feature.\n\n\
         User: {}",
        language.name(),
        message
    )
}

pub async fn reply<M: LanguageModel>(
    model: &M,
    message: &str,
    language: Language,
) -> Result<String, OracleError> {
    model.generate(&chat_prompt(message, language)).await
}
