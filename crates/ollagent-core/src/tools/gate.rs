//! Tool gate: decides whether a question is offered tools at all
//!
//! A coarse substring filter. False positives are fine; the point is to keep
//! tools away from definitional and arithmetic questions.

/// Freshness/time triggers, matched case-insensitively as substrings
pub const DEFAULT_TRIGGERS: &[&str] = &[
    "latest",
    "current",
    "today",
    "yesterday",
    "this week",
    "news",
    "price",
    "cost",
    "release",
    "version",
    "updated",
    "2025",
    "2026",
    "now",
    "stock",
    "weather",
    "tomorrow",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolGate {
    triggers: Vec<String>,
}

impl Default for ToolGate {
    fn default() -> Self {
        Self::with_triggers(DEFAULT_TRIGGERS.iter().copied())
    }
}

impl ToolGate {
    /// Gate with a custom trigger list
    pub fn with_triggers<I, S>(triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            triggers: triggers
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    /// True if the question contains any trigger
    pub fn should_offer_tools(&self, question: &str) -> bool {
        let question = question.to_lowercase();
        self.triggers.iter().any(|t| question.contains(t.as_str()))
    }
}
