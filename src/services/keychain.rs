// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

//! API keys for hosted providers, kept in the platform keychain.

use crate::config::Provider;
use crate::error::{Error, Result};

const SERVICE: &str = "plainterms";

pub struct Keychain;

impl Keychain {
    /// Parse a provider name, accepting only providers that take a key.
    pub fn provider(name: &str) -> Result<Provider> {
        let provider: Provider = name.parse()?;
        if !provider.requires_api_key() {
            return Err(Error::Config(format!(
                "{provider} does not use an API key (keys are stored for openai and huggingface)"
            )));
        }
        Ok(provider)
    }

    pub fn store(provider: Provider, key: &str) -> Result<()> {
        entry(provider)?.set_password(key).map_err(keyring_error)
    }

    /// `Ok(None)` when nothing is stored for `provider`.
    pub fn lookup(provider: Provider) -> Result<Option<String>> {
        match entry(provider)?.get_password() {
            Ok(key) => Ok(Some(key)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(keyring_error(e)),
        }
    }
}

fn entry(provider: Provider) -> Result<keyring::Entry> {
    keyring::Entry::new(SERVICE, &provider.to_string()).map_err(keyring_error)
}

fn keyring_error(e: keyring::Error) -> Error {
    Error::Keyring(e.to_string())
}
