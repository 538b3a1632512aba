// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod analyzer;
pub mod export;
#[cfg(feature = "secure-storage")]
pub mod keychain;
pub mod llm;
pub mod loader;
pub mod presenter;
pub mod simplifier;
pub mod text;
