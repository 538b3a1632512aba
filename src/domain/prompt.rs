// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

/// The questions asked of an AI provider about a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Summary,
    KeyPoints,
    Risks,
}

impl PromptKind {
    pub const ALL: &[PromptKind] = &[Self::Summary, Self::KeyPoints, Self::Risks];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::KeyPoints => "key_points",
            Self::Risks => "risks",
        }
    }

    /// Build the user prompt, keeping at most `max_chars` characters of the document.
    pub fn to_prompt(&self, text: &str, max_chars: usize) -> String {
        let excerpt: String = text.chars().take(max_chars).collect();
        let instruction = match self {
            Self::Summary => {
                "Please provide a simple, easy-to-understand summary of this legal document.\n\
                 Use everyday language and explain what this document means for a regular person:"
            }
            Self::KeyPoints => {
                "Extract the 5 most important points from this legal document.\n\
                 Explain each point in simple terms that a student could understand:"
            }
            Self::Risks => {
                "What are the potential risks or important things someone should know\n\
                 before agreeing to this legal document? Explain in simple terms:"
            }
        };
        format!("{instruction}\n\n{excerpt}")
    }
}
