/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use anyhow::Context;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the `tracing` filter, e.g. `depcheck_validation=debug`.
pub const LOG_ENV_VAR: &str = "DEPCHECK_LOG";

/// Warnings and errors unless the user asks for more.
const DEFAULT_FILTER: &str = "warn";

pub(crate) fn log_filter(raw: Option<&str>) -> anyhow::Result<EnvFilter> {
    match raw {
        Some(v) => EnvFilter::try_new(v)
            .with_context(|| format!("Failed to parse ${} as a filter", LOG_ENV_VAR)),
        None => Ok(EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Install a global `tracing` subscriber writing to `writer`.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing_for_writer<W>(writer: W) -> anyhow::Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let raw = std::env::var(LOG_ENV_VAR).ok();
    let filter = log_filter(raw.as_deref())?;

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .context("Installing the global tracing subscriber")?;
    Ok(())
}
