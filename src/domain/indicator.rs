// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

/// Keyword tables used to flag sentences of interest.
///
/// Matching is a case-insensitive substring test, so `"agree"` also flags
/// "agrees" and "agreement".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Summary,
    Obligation,
    Risk,
}

const SUMMARY_KEYWORDS: &[&str] = &[
    "agree",
    "shall",
    "payment",
    "liability",
    "termination",
    "confidential",
    "governing law",
    "dispute",
];

const OBLIGATION_KEYWORDS: &[&str] = &[
    "shall",
    "must",
    "agrees to",
    "required to",
    "responsible for",
];

const RISK_KEYWORDS: &[&str] = &[
    "liability",
    "penalty",
    "fee",
    "terminate",
    "breach",
    "default",
    "damages",
    "dispute",
    "arbitration",
    "court",
];

impl Indicator {
    pub const ALL: &[Indicator] = &[Self::Summary, Self::Obligation, Self::Risk];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Obligation => "obligation",
            Self::Risk => "risk",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Summary => SUMMARY_KEYWORDS,
            Self::Obligation => OBLIGATION_KEYWORDS,
            Self::Risk => RISK_KEYWORDS,
        }
    }

    pub fn matches(&self, sentence: &str) -> bool {
        let lower = sentence.to_lowercase();
        self.keywords().iter().any(|keyword| lower.contains(keyword))
    }
}
