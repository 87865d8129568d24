// Copyright 2025 The Pigweed Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License. You may obtain a copy of
// the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
// License for the specific language governing permissions and limitations under
// the License.

use core::any::Any;

use crate::config::PlatformConfig;
use crate::handle::Handle;
use crate::platform::SystPlatform;
use crate::status::{Error, Result};

/// Installs a platform's writers into the encoder state.
///
/// The second argument is opaque user data forwarded from [`init_state()`].
pub type PlatformInit<P> = fn(&mut SystHeader<P>, Option<&mut dyn Any>);

/// Encoder global state.
///
/// Holds the platform configuration and, once [`init_state()`] has run, the
/// installed platform writers that every handle copies.
pub struct SystHeader<P: SystPlatform> {
    config: PlatformConfig,
    platform: Option<P>,
}

impl<P: SystPlatform> SystHeader<P> {
    #[must_use]
    pub const fn new(config: PlatformConfig) -> Self {
        Self {
            config,
            platform: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> PlatformConfig {
        self.config
    }

    /// Installed writers, if any.
    #[must_use]
    pub fn platform(&self) -> Option<&P> {
        self.platform.as_ref()
    }

    /// Replaces the installed writers.  Called by a [`PlatformInit`].
    pub fn install(&mut self, platform: P) {
        self.platform = Some(platform);
    }
}

/// Builds the encoder state by running `platform_init` against `header`.
pub fn init_state<P: SystPlatform>(
    header: &mut SystHeader<P>,
    platform_init: PlatformInit<P>,
    user_data: Option<&mut dyn Any>,
) {
    platform_init(header, user_data);
    log::debug!(
        "SyS-T state initialized, platform installed: {}",
        header.platform.is_some()
    );
}

/// Creates a handle from the encoder state.
///
/// Returns [`Error::FailedPrecondition`] if no platform has been installed.
pub fn init_handle_state<P: SystPlatform>(header: &SystHeader<P>) -> Result<Handle<P>> {
    let platform = header.platform.ok_or(Error::FailedPrecondition)?;
    Ok(Handle::new(platform))
}
