/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! A minimal buckconfig: `[section]` headers followed by `key = value` lines.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use allocative::Allocative;
use anyhow::Context;

#[derive(Debug, thiserror::Error)]
enum ConfigError {
    #[error("Improperly formatted section. Expected something of the form `[section]`, got {0}")]
    BadSectionMarker(String),
    #[error(
        "Couldn't parse line. Expected section (`[some_section]`) or key assignment (`some_key = some_value`). Got `{0}`"
    )]
    InvalidLine(String),
    #[error("Key assignment `{0}` appears before any section")]
    KeyOutsideSection(String),
    #[error("Invalid value `{value}` for `{key}`: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BuckconfigKeyRef<'a> {
    pub section: &'a str,
    pub property: &'a str,
}

impl Display for BuckconfigKeyRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.section, self.property)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Allocative)]
struct ConfigValue {
    raw: String,
    line: usize,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Allocative)]
pub struct LegacyBuckConfig {
    path: String,
    values: BTreeMap<String, BTreeMap<String, ConfigValue>>,
}

impl LegacyBuckConfig {
    pub fn empty() -> LegacyBuckConfig {
        LegacyBuckConfig::default()
    }

    /// Parse config text. `path` is only used in error messages.
    pub fn parse(text: &str, path: &str) -> anyhow::Result<LegacyBuckConfig> {
        let mut values: BTreeMap<String, BTreeMap<String, ConfigValue>> = BTreeMap::new();
        let mut current_section: Option<String> = None;

        for (i, line) in text.lines().enumerate() {
            let line_number = i + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            let res: anyhow::Result<()> = (|| {
                if let Some(rest) = line.strip_prefix('[') {
                    let section = rest
                        .strip_suffix(']')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .ok_or_else(|| ConfigError::BadSectionMarker(line.to_owned()))?;
                    values.entry(section.to_owned()).or_default();
                    current_section = Some(section.to_owned());
                } else if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    if key.is_empty() {
                        return Err(ConfigError::InvalidLine(line.to_owned()).into());
                    }
                    let section = current_section
                        .as_ref()
                        .ok_or_else(|| ConfigError::KeyOutsideSection(line.to_owned()))?;
                    values.entry(section.clone()).or_default().insert(
                        key.to_owned(),
                        ConfigValue {
                            raw: value.trim().to_owned(),
                            line: line_number,
                        },
                    );
                } else {
                    return Err(ConfigError::InvalidLine(line.to_owned()).into());
                }
                Ok(())
            })();
            res.with_context(|| format!("Error parsing `{}` at line {}", path, line_number))?;
        }

        Ok(LegacyBuckConfig {
            path: path.to_owned(),
            values,
        })
    }

    pub fn get(&self, key: BuckconfigKeyRef) -> Option<&str> {
        self.values
            .get(key.section)?
            .get(key.property)
            .map(|v| v.raw.as_str())
    }

    fn location(&self, key: BuckconfigKeyRef) -> Option<String> {
        let value = self.values.get(key.section)?.get(key.property)?;
        Some(format!("{}:{}", self.path, value.line))
    }

    /// Parse a value with `FromStr`. Booleans also accept `yes`/`no`/`1`/`0`
    /// in any case, like buckconfig does.
    pub fn parse_value<T: FromStr>(&self, key: BuckconfigKeyRef) -> anyhow::Result<Option<T>>
    where
        T::Err: Display,
    {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        T::from_str(raw)
            .or_else(|e| match normalize_bool(raw) {
                Some(normalized) => T::from_str(normalized).map_err(|_| e),
                None => Err(e),
            })
            .map(Some)
            .map_err(|e| {
                anyhow::Error::from(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: raw.to_owned(),
                    reason: e.to_string(),
                })
            })
            .with_context(|| {
                format!(
                    "Reading buckconfig at {}",
                    self.location(key).unwrap_or_else(|| self.path.clone())
                )
            })
    }

    /// Comma-separated list; empty items are dropped.
    pub fn parse_list(&self, key: BuckconfigKeyRef) -> Option<Vec<String>> {
        self.get(key).map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        })
    }
}

fn normalize_bool(raw: &str) -> Option<&'static str> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some("true"),
        "false" | "no" | "0" => Some("false"),
        _ => None,
    }
}
