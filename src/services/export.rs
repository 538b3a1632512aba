// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::domain::AnalysisResults;
use crate::error::Result;

pub struct ResultsExporter;

impl ResultsExporter {
    pub fn to_json(results: &AnalysisResults) -> Result<String> {
        Ok(serde_json::to_string_pretty(results)?)
    }

    /// `analysis_20260101_093000.json`
    pub fn default_file_name(at: DateTime<Local>) -> String {
        format!("analysis_{}.json", at.format("%Y%m%d_%H%M%S"))
    }

    /// Write pretty JSON to `path`, creating parent directories.
    pub fn save(results: &AnalysisResults, path: &Path) -> Result<PathBuf> {
        let json = Self::to_json(results)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write to temp file first, then rename
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, path)?;

        debug!(path = %path.display(), "results saved");
        Ok(path.to_path_buf())
    }
}
