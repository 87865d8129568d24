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

/// The host kernel's monotonic uptime counter.
pub trait Clock {
    /// Rate of the uptime counter.
    const TICKS_PER_SEC: u64;

    /// Ticks since boot.
    fn uptime_ticks(&self) -> u64;
}

/// Epoch source consulted by the encoder when it stamps an event.
#[must_use]
#[inline]
pub fn get_epoch<C: Clock>(clock: &C) -> u64 {
    clock.uptime_ticks()
}

/// Millisecond uptime clock for host builds, counted from construction.
#[cfg(feature = "std")]
pub struct HostUptimeClock {
    boot: std::time::Instant,
}

#[cfg(feature = "std")]
impl HostUptimeClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            boot: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for HostUptimeClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for HostUptimeClock {
    const TICKS_PER_SEC: u64 = 1000;

    fn uptime_ticks(&self) -> u64 {
        u64::try_from(self.boot.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
