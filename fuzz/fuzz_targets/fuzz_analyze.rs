// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

#![no_main]

use libfuzzer_sys::fuzz_target;
use plainterms::services::analyzer::DocumentAnalyzer;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let report = DocumentAnalyzer::analyze(&text);
    assert!(report.obligations.len() <= 6);
    assert!(report.risks.len() <= 5);
    assert!(!report.summary.is_empty());
});
