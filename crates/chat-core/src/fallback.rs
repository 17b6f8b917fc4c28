//! Local keyword classifier used when the provider cannot answer.
//!
//! Rules are checked in order and the first match wins, so a message
//! containing both a greeting and a farewell is a greeting.

use serde::{Deserialize, Serialize};

pub const GREETING_REPLY: &str = "¡Hola! ¿En qué puedo ayudarte hoy? 😊🤖";
pub const FAREWELL_REPLY: &str = "¡Hasta luego! Que tengas un buen día 👋🤖";
pub const THANKS_REPLY: &str = "¡De nada! Estoy aquí para ayudarte 😊🤖";
pub const WELLBEING_REPLY: &str = "¡Estoy funcionando perfectamente! ¿Y vos cómo estás? 🤖";
pub const IDENTITY_REPLY: &str =
    "Soy tu asistente personal ChatBot. ¡Podés preguntarme lo que quieras! 🤖";
pub const UNKNOWN_REPLY: &str =
    "Perdón, no entendí bien tu mensaje. ¿Podrías reformularlo? 🤔🤖";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Greeting,
    Farewell,
    Thanks,
    Wellbeing,
    Identity,
    Unknown,
}

/// How a rule's keywords are combined
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// At least one keyword occurs
    Any(&'static [&'static str]),
    /// Every keyword occurs
    All(&'static [&'static str]),
}

impl Matcher {
    /// `text` must already be lower-cased.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::Any(words) => words.iter().any(|w| text.contains(w)),
            Matcher::All(words) => words.iter().all(|w| text.contains(w)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FallbackRule {
    pub category: Category,
    pub matcher: Matcher,
    pub reply: &'static str,
}

const DEFAULT_RULES: &[FallbackRule] = &[
    FallbackRule {
        category: Category::Greeting,
        matcher: Matcher::Any(&["hola", "buenos días", "buenas"]),
        reply: GREETING_REPLY,
    },
    FallbackRule {
        category: Category::Farewell,
        matcher: Matcher::Any(&["adiós", "chau", "hasta luego"]),
        reply: FAREWELL_REPLY,
    },
    FallbackRule {
        category: Category::Thanks,
        matcher: Matcher::Any(&["gracias"]),
        reply: THANKS_REPLY,
    },
    FallbackRule {
        category: Category::Wellbeing,
        matcher: Matcher::Any(&["cómo estás", "como estas"]),
        reply: WELLBEING_REPLY,
    },
    FallbackRule {
        category: Category::Identity,
        matcher: Matcher::All(&["nombre", "tuyo"]),
        reply: IDENTITY_REPLY,
    },
];

/// Ordered, first-match-wins keyword classifier
#[derive(Debug, Clone)]
pub struct FallbackClassifier {
    rules: Vec<FallbackRule>,
    unknown_reply: &'static str,
}

impl FallbackClassifier {
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES.to_vec(),
            unknown_reply: UNKNOWN_REPLY,
        }
    }

    pub fn rules(&self) -> &[FallbackRule] {
        &self.rules
    }

    fn find(&self, text: &str) -> Option<&FallbackRule> {
        let lowered = text.to_lowercase();
        self.rules.iter().find(|r| r.matcher.matches(&lowered))
    }

    pub fn classify(&self, text: &str) -> Category {
        self.find(text)
            .map(|r| r.category)
            .unwrap_or(Category::Unknown)
    }

    pub fn reply(&self, text: &str) -> &'static str {
        self.find(text)
            .map(|r| r.reply)
            .unwrap_or(self.unknown_reply)
    }
}

impl Default for FallbackClassifier {
    fn default() -> Self {
        Self::new()
    }
}
