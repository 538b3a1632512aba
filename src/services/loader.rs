// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::path::{Path, PathBuf};

use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub struct DocumentLoader;

impl DocumentLoader {
    /// Read a document: PDFs through text extraction, anything else as UTF-8.
    pub async fn load(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(Error::DocumentNotFound {
                path: path.display().to_string(),
            });
        }

        let text = if is_pdf(path) {
            let owned: PathBuf = path.to_path_buf();
            tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
                .await
                .map_err(|e| unreadable(path, e))?
                .map_err(|e| unreadable(path, e))?
        } else {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| unreadable(path, e))?
        };

        debug!(path = %path.display(), chars = text.len(), "document loaded");
        Ok(text)
    }

    /// Like [`load`](Self::load), but a file that exists and cannot be read
    /// becomes empty text so the analysis still produces a report.
    pub async fn load_or_empty(path: &Path) -> Result<String> {
        match Self::load(path).await {
            Err(Error::Unreadable { path, message }) => {
                warn!(%path, %message, "document unreadable, analyzing as empty");
                Ok(String::new())
            }
            other => other,
        }
    }

    pub async fn read_stdin() -> Result<String> {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(text)
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn unreadable(path: &Path, e: impl std::fmt::Display) -> Error {
    Error::Unreadable {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
