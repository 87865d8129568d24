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

//! # pw_syst
//!
//! Platform backend that connects a MIPI SyS-T style trace encoder to a
//! kernel's boot sequence and log output pipeline.
//!
//! The encoder calls back into a small set of writer primitives to emit its
//! encoded stream.  This crate provides those primitives as the
//! [`SystPlatform`] trait and its hex implementation, [`HexPlatform`], which
//! renders every value as uppercase hexadecimal pairs into a host
//! [`LogOutput`] buffer.  [`syst_init`] is the one-shot boot initializer,
//! normally run from an [`InitRegistry`] at [`InitLevel::PostKernel`].
//!
//! # Example
//!
//! ```
//! use pw_syst::{
//!     Clock, InitLevel, InitRegistry, LogOutput, OutputFlags, PlatformConfig, SystContext,
//!     ByteOrder,
//! };
//!
//! struct FixedClock;
//!
//! impl Clock for FixedClock {
//!     const TICKS_PER_SEC: u64 = 1000;
//!
//!     fn uptime_ticks(&self) -> u64 {
//!         0x0102_0304
//!     }
//! }
//!
//! struct LineBuffer {
//!     buf: [u8; 64],
//!     offset: usize,
//! }
//!
//! impl LogOutput for LineBuffer {
//!     fn buffer(&mut self) -> &mut [u8] {
//!         &mut self.buf
//!     }
//!
//!     fn capacity(&self) -> usize {
//!         self.buf.len()
//!     }
//!
//!     fn offset(&self) -> usize {
//!         self.offset
//!     }
//!
//!     fn set_offset(&mut self, offset: usize) {
//!         self.offset = offset;
//!     }
//!
//!     fn flush(&mut self) {
//!         self.offset = 0;
//!     }
//! }
//!
//! let config = PlatformConfig::DEFAULT.with_byte_order(ByteOrder::BigEndian);
//! let mut ctx = SystContext::new(config, FixedClock);
//!
//! let mut registry = InitRegistry::<SystContext<FixedClock>, 4>::new();
//! registry.register(pw_syst::init_entry::<FixedClock>()).unwrap();
//! registry.run_level(InitLevel::PostKernel, &mut ctx).unwrap();
//!
//! let mut output = LineBuffer { buf: [0; 64], offset: 0 };
//! let epoch = ctx.epoch() as u32;
//! ctx.emit(&mut output, OutputFlags::CRLF_LFONLY, |emission| {
//!     emission.write_d32ts(epoch);
//! })
//! .unwrap();
//!
//! assert_eq!(&output.buf[..output.offset], b"SYS-T RAW DATA: 01020304\n");
//! ```
#![cfg_attr(not(any(test, feature = "std")), no_std)]

/// Fatal invariant check.
///
/// Logs the failure at error level and panics.  Used for contract violations
/// that must halt the system rather than be reported to a caller.
macro_rules! fatal_assert {
    ($condition:expr, $($args:tt)+) => {{
        if !$condition {
            log::error!($($args)+);
            ::core::panic!($($args)+);
        }
    }};
}

mod clock;
mod config;
mod context;
mod handle;
mod header;
mod hex;
mod output;
mod platform;
pub mod status;
mod sys_init;

#[cfg(test)]
mod tests;

pub use clock::{Clock, get_epoch};
#[cfg(feature = "std")]
pub use clock::HostUptimeClock;
pub use config::{ByteOrder, Capabilities, PlatformConfig};
pub use context::{SYST_INIT_PRIORITY, SystContext, init_entry, syst_init};
pub use handle::{Emission, Handle, HandlePlatformData, OutputFlags};
pub use header::{PlatformInit, SystHeader, init_handle_state, init_state};
pub use hex::{byte_to_hex, nibble_to_hex};
pub use output::{BufferedOutput, LogOutput, out_byte, out_bytes};
pub use platform::{HexPlatform, RAW_DATA_MARKER, SystPlatform, platform_init};
pub use status::{Error, Result, StatusCode};
pub use sys_init::{InitEntry, InitFn, InitLevel, InitRegistry};
