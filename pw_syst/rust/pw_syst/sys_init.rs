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

//! A model of the kernel's leveled init hooks.
//!
//! Entries are registered with a level and a priority and run once, level by
//! level, lowest priority value first.  Entries sharing a priority run in
//! registration order.

use crate::status::{Error, Result};

/// Boot phases, in the order they run.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum InitLevel {
    PreKernel1,
    PreKernel2,
    /// Kernel services are up; application code has not started.
    PostKernel,
    Application,
}

impl InitLevel {
    pub const ALL: [InitLevel; 4] = [
        InitLevel::PreKernel1,
        InitLevel::PreKernel2,
        InitLevel::PostKernel,
        InitLevel::Application,
    ];
}

pub type InitFn<C> = fn(&mut C) -> Result<()>;

/// One init hook.
pub struct InitEntry<C> {
    pub name: &'static str,
    pub level: InitLevel,
    pub priority: u8,
    pub init: InitFn<C>,
}

impl<C> InitEntry<C> {
    #[must_use]
    pub const fn new(name: &'static str, level: InitLevel, priority: u8, init: InitFn<C>) -> Self {
        Self {
            name,
            level,
            priority,
            init,
        }
    }
}

// Manually implement Copy so that we don't require `C` to be Copy
impl<C> Copy for InitEntry<C> {}

// Manually implement Clone so that we don't require `C` to be Clone
impl<C> Clone for InitEntry<C> {
    fn clone(&self) -> Self {
        *self
    }
}

struct Slot<C> {
    entry: InitEntry<C>,
    done: bool,
}

/// Fixed capacity table of up to `N` init entries run against a `C`.
pub struct InitRegistry<C, const N: usize> {
    slots: [Option<Slot<C>>; N],
    len: usize,
}

impl<C, const N: usize> InitRegistry<C, N> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; N],
            len: 0,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds an entry.  Returns [`Error::ResourceExhausted`] when full.
    pub fn register(&mut self, entry: InitEntry<C>) -> Result<()> {
        let Some(slot) = self.slots.get_mut(self.len) else {
            log::error!("Init registry full, dropping {}", entry.name);
            return Err(Error::ResourceExhausted);
        };
        *slot = Some(Slot { entry, done: false });
        self.len += 1;
        Ok(())
    }

    // Index of the pending entry at `level` that should run next.
    fn next_pending(&self, level: InitLevel) -> Option<usize> {
        let mut next: Option<(u8, usize)> = None;
        for (index, slot) in self.slots[..self.len].iter().enumerate() {
            let Some(slot) = slot else {
                continue;
            };
            if slot.done || slot.entry.level != level {
                continue;
            }
            if next.is_none_or(|(priority, _)| slot.entry.priority < priority) {
                next = Some((slot.entry.priority, index));
            }
        }
        next.map(|(_, index)| index)
    }

    /// Runs every entry of `level` that has not run yet.
    ///
    /// A failing entry is logged and does not stop the rest of the level.
    /// Returns the first error seen.
    pub fn run_level(&mut self, level: InitLevel, ctx: &mut C) -> Result<()> {
        let mut result = Ok(());
        while let Some(index) = self.next_pending(level) {
            let Some(slot) = self.slots[index].as_mut() else {
                break;
            };
            slot.done = true;
            let entry = slot.entry;

            log::debug!(
                "Running init {} ({:?}, priority {})",
                entry.name,
                level,
                entry.priority
            );
            if let Err(e) = (entry.init)(ctx) {
                log::error!("Init {} failed: {}", entry.name, e);
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        result
    }

    /// Runs all levels in boot order.  Returns the first error seen.
    pub fn run_all(&mut self, ctx: &mut C) -> Result<()> {
        let mut result = Ok(());
        for level in InitLevel::ALL {
            let level_result = self.run_level(level, ctx);
            if result.is_ok() {
                result = level_result;
            }
        }
        result
    }
}

impl<C, const N: usize> Default for InitRegistry<C, N> {
    fn default() -> Self {
        Self::new()
    }
}
