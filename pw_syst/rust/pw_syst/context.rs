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

use crate::clock::{Clock, get_epoch};
use crate::config::PlatformConfig;
use crate::handle::{Emission, Handle, OutputFlags};
use crate::header::{SystHeader, init_handle_state, init_state};
use crate::output::LogOutput;
use crate::platform::{HexPlatform, platform_init};
use crate::status::{Error, Result};
use crate::sys_init::{InitEntry, InitLevel};

/// Priority of [`syst_init()`] within [`InitLevel::PostKernel`].
pub const SYST_INIT_PRIORITY: u8 = 0;

/// Everything the backend needs, owned in one place.
///
/// Construct one at startup and hand it to the init registry; it holds the
/// encoder state, the default handle and the uptime clock.  The handle only
/// exists once [`syst_init()`] has run.
pub struct SystContext<C: Clock> {
    header: SystHeader<HexPlatform>,
    handle: Option<Handle<HexPlatform>>,
    clock: C,
}

impl<C: Clock> SystContext<C> {
    #[must_use]
    pub const fn new(config: PlatformConfig, clock: C) -> Self {
        Self {
            header: SystHeader::new(config),
            handle: None,
            clock,
        }
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.handle.is_some()
    }

    #[must_use]
    pub fn header(&self) -> &SystHeader<HexPlatform> {
        &self.header
    }

    /// The default handle.
    ///
    /// Returns [`Error::FailedPrecondition`] before [`syst_init()`].
    pub fn handle(&mut self) -> Result<&mut Handle<HexPlatform>> {
        self.handle.as_mut().ok_or(Error::FailedPrecondition)
    }

    /// Binds the default handle to `output` for one message.
    ///
    /// See [`Handle::update_data()`].  Returns [`Error::FailedPrecondition`]
    /// before [`syst_init()`].
    pub fn update_handle_data<'a>(
        &'a mut self,
        output: &'a mut dyn LogOutput,
        flags: OutputFlags,
    ) -> Result<Emission<'a, HexPlatform>> {
        Ok(self.handle()?.update_data(output, flags))
    }

    /// Emits one message: binds the handle, runs `body`, then writes the
    /// line terminator.
    pub fn emit<F>(&mut self, output: &mut dyn LogOutput, flags: OutputFlags, body: F) -> Result<()>
    where
        F: FnOnce(&mut Emission<'_, HexPlatform>),
    {
        let mut emission = self.update_handle_data(output, flags)?;
        body(&mut emission);
        emission.write_flag();
        Ok(())
    }

    /// Current uptime, as stamped onto events.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        get_epoch(&self.clock)
    }
}

/// Boot initializer.
///
/// Builds the encoder state with [`platform_init()`] and no user data, then
/// the default handle.  Runs once; a second call returns
/// [`Error::AlreadyExists`] and changes nothing.
pub fn syst_init<C: Clock>(ctx: &mut SystContext<C>) -> Result<()> {
    if ctx.is_initialized() {
        log::warn!("SyS-T backend already initialized");
        return Err(Error::AlreadyExists);
    }

    init_state(&mut ctx.header, platform_init, None);
    ctx.handle = Some(init_handle_state(&ctx.header)?);

    let config = ctx.header.config();
    log::info!(
        "SyS-T backend ready ({:?}, capabilities {:#x})",
        config.byte_order,
        config.capabilities.bits()
    );
    Ok(())
}

/// [`syst_init()`] as a post-kernel init entry.
#[must_use]
pub const fn init_entry<C: Clock>() -> InitEntry<SystContext<C>> {
    InitEntry::new(
        "syst",
        InitLevel::PostKernel,
        SYST_INIT_PRIORITY,
        syst_init::<C>,
    )
}
