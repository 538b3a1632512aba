// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

mod indicator;
mod prompt;
mod report;
mod results;
mod sample;

pub use indicator::*;
pub use prompt::*;
pub use report::*;
pub use results::*;
pub use sample::*;
