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

use bitflags::bitflags;

use crate::config::{ByteOrder, Capabilities};
use crate::output::LogOutput;
use crate::platform::SystPlatform;

bitflags! {
    /// Host log output flag word.
    ///
    /// Only the line termination bits are interpreted here; other host bits
    /// are carried through untouched.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct OutputFlags: u32 {
        /// Terminate messages with nothing.  Takes precedence over
        /// `CRLF_LFONLY`.
        const CRLF_NONE = 1 << 4;
        /// Terminate messages with a bare `\n`.
        const CRLF_LFONLY = 1 << 5;
    }
}

/// Platform specific per-handle fields.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HandlePlatformData {
    pub flag: OutputFlags,
}

/// An encoder session context.
///
/// Built from the encoder state by [`crate::init_handle_state()`], it keeps
/// its own copy of the installed platform writers.
pub struct Handle<P: SystPlatform> {
    platform: P,
    data: HandlePlatformData,
}

impl<P: SystPlatform> Handle<P> {
    pub(crate) fn new(platform: P) -> Self {
        let mut handle = Self {
            platform,
            data: HandlePlatformData::default(),
        };
        if platform.capabilities().contains(Capabilities::HANDLE_HOOKS) {
            platform.handle_init(&mut handle.data);
        }
        handle
    }

    #[must_use]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    #[must_use]
    pub fn data(&self) -> &HandlePlatformData {
        &self.data
    }

    /// Points the handle at `output` for the next message.
    ///
    /// Stores `flags` in the handle and returns the binding the writers run
    /// through.  Call once per message: the output is only borrowed for the
    /// lifetime of the returned [`Emission`].
    pub fn update_data<'a>(
        &'a mut self,
        output: &'a mut dyn LogOutput,
        flags: OutputFlags,
    ) -> Emission<'a, P> {
        self.data.flag = flags;
        Emission {
            handle: self,
            output,
        }
    }
}

impl<P: SystPlatform> Drop for Handle<P> {
    fn drop(&mut self) {
        if self
            .platform
            .capabilities()
            .contains(Capabilities::HANDLE_HOOKS)
        {
            self.platform.handle_release(&mut self.data);
        }
    }
}

/// A handle bound to one host output for the duration of one message.
pub struct Emission<'a, P: SystPlatform> {
    handle: &'a mut Handle<P>,
    output: &'a mut dyn LogOutput,
}

impl<P: SystPlatform> Emission<'_, P> {
    fn has(&self, capability: Capabilities) -> bool {
        self.handle.platform.capabilities().contains(capability)
    }

    /// Flag word stored by the last [`Handle::update_data()`].
    #[must_use]
    pub fn flags(&self) -> OutputFlags {
        self.handle.data.flag
    }

    pub fn write_d8(&mut self, value: u8) {
        self.handle.platform.write_d8(self.output, value);
    }

    pub fn write_d16(&mut self, value: u16) {
        self.handle.platform.write_d16(self.output, value);
    }

    pub fn write_d32(&mut self, value: u32) {
        self.handle.platform.write_d32(self.output, value);
    }

    /// Writes a 64-bit value.
    ///
    /// Platforms without [`Capabilities::IO_64BIT`] get two 32-bit writes,
    /// ordered so the emitted bytes match a native 64-bit write.
    pub fn write_d64(&mut self, value: u64) {
        if self.has(Capabilities::IO_64BIT) {
            self.handle.platform.write_d64(self.output, value);
            return;
        }

        let low = value as u32;
        let high = (value >> 32) as u32;
        let (first, second) = match self.handle.platform.byte_order() {
            ByteOrder::BigEndian => (high, low),
            ByteOrder::LittleEndian => (low, high),
        };
        self.write_d32(first);
        self.write_d32(second);
    }

    /// Writes a timestamp payload, or a plain 32-bit value when the platform
    /// lacks [`Capabilities::TIMESTAMP_D32`].
    pub fn write_d32ts(&mut self, value: u32) {
        if self.has(Capabilities::TIMESTAMP_D32) {
            self.handle.platform.write_d32ts(self.output, value);
        } else {
            self.write_d32(value);
        }
    }

    /// Terminates the message per the handle's flag word.  Emits nothing when
    /// the platform lacks [`Capabilities::LINE_FLAGS`].
    pub fn write_flag(&mut self) {
        if self.has(Capabilities::LINE_FLAGS) {
            let flags = self.handle.data.flag;
            self.handle.platform.write_flag(self.output, flags);
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::config::PlatformConfig;
    use crate::output::test_utils::RecordingOutput;
    use crate::platform::HexPlatform;

    fn handle(byte_order: ByteOrder, capabilities: Capabilities) -> Handle<HexPlatform> {
        Handle::new(HexPlatform::new(PlatformConfig::new(
            byte_order,
            capabilities,
        )))
    }

    fn emit<F>(handle: &mut Handle<HexPlatform>, flags: OutputFlags, body: F) -> String
    where
        F: FnOnce(&mut Emission<'_, HexPlatform>),
    {
        let mut output = RecordingOutput::<64>::new();
        let mut emission = handle.update_data(&mut output, flags);
        body(&mut emission);
        String::from_utf8(output.contents()).unwrap()
    }

    #[test]
    fn update_data_overwrites_flag_word() {
        let mut handle = handle(ByteOrder::LittleEndian, Capabilities::all());
        let mut output = RecordingOutput::<8>::new();
        let emission = handle.update_data(&mut output, OutputFlags::CRLF_LFONLY);
        assert_eq!(emission.flags(), OutputFlags::CRLF_LFONLY);

        let mut output = RecordingOutput::<8>::new();
        handle.update_data(&mut output, OutputFlags::CRLF_NONE);
        assert_eq!(handle.data().flag, OutputFlags::CRLF_NONE);
    }

    #[test]
    fn each_emission_targets_its_own_output() {
        let mut handle = handle(ByteOrder::BigEndian, Capabilities::all());

        let mut first = RecordingOutput::<8>::new();
        handle.update_data(&mut first, OutputFlags::empty()).write_d8(0x11);
        let mut second = RecordingOutput::<8>::new();
        handle.update_data(&mut second, OutputFlags::empty()).write_d8(0x22);

        assert_eq!(first.contents(), b"11");
        assert_eq!(second.contents(), b"22");
    }

    #[test]
    fn d64_without_native_writer_matches_native_output() {
        let value = 0x0102_0304_0506_0708;
        for byte_order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
            let mut native = handle(byte_order, Capabilities::all());
            let mut split = handle(byte_order, Capabilities::empty());
            assert_eq!(
                emit(&mut native, OutputFlags::empty(), |e| e.write_d64(value)),
                emit(&mut split, OutputFlags::empty(), |e| e.write_d64(value)),
            );
        }
    }

    #[test]
    fn d32ts_without_capability_omits_marker() {
        let mut handle = handle(ByteOrder::BigEndian, Capabilities::empty());
        assert_eq!(
            emit(&mut handle, OutputFlags::empty(), |e| e.write_d32ts(0x0102_0304)),
            "01020304"
        );
    }

    #[test]
    fn write_flag_uses_stored_flag_word() {
        let mut handle = handle(ByteOrder::LittleEndian, Capabilities::LINE_FLAGS);
        assert_eq!(emit(&mut handle, OutputFlags::empty(), |e| e.write_flag()), "\r\n");
        assert_eq!(
            emit(&mut handle, OutputFlags::CRLF_LFONLY, |e| e.write_flag()),
            "\n"
        );
        assert_eq!(emit(&mut handle, OutputFlags::CRLF_NONE, |e| e.write_flag()), "");
    }

    #[test]
    fn write_flag_without_capability_emits_nothing() {
        let mut handle = handle(ByteOrder::LittleEndian, Capabilities::empty());
        assert_eq!(emit(&mut handle, OutputFlags::empty(), |e| e.write_flag()), "");
    }

    thread_local! {
        static HOOK_CALLS: Cell<(u32, u32)> = const { Cell::new((0, 0)) };
    }

    #[derive(Clone, Copy)]
    struct HookedPlatform {
        capabilities: Capabilities,
    }

    impl SystPlatform for HookedPlatform {
        fn capabilities(&self) -> Capabilities {
            self.capabilities
        }

        fn byte_order(&self) -> ByteOrder {
            ByteOrder::LittleEndian
        }

        fn write_d8(&self, _output: &mut dyn LogOutput, _value: u8) {}
        fn write_d16(&self, _output: &mut dyn LogOutput, _value: u16) {}
        fn write_d32(&self, _output: &mut dyn LogOutput, _value: u32) {}
        fn write_d64(&self, _output: &mut dyn LogOutput, _value: u64) {}
        fn write_d32ts(&self, _output: &mut dyn LogOutput, _value: u32) {}
        fn write_flag(&self, _output: &mut dyn LogOutput, _flags: OutputFlags) {}

        fn handle_init(&self, _data: &mut HandlePlatformData) {
            HOOK_CALLS.with(|c| c.set((c.get().0 + 1, c.get().1)));
        }

        fn handle_release(&self, _data: &mut HandlePlatformData) {
            HOOK_CALLS.with(|c| c.set((c.get().0, c.get().1 + 1)));
        }
    }

    #[test]
    fn lifecycle_hooks_run_only_when_advertised() {
        HOOK_CALLS.with(|c| c.set((0, 0)));

        let handle = Handle::new(HookedPlatform {
            capabilities: Capabilities::HANDLE_HOOKS,
        });
        assert_eq!(HOOK_CALLS.with(Cell::get), (1, 0));
        drop(handle);
        assert_eq!(HOOK_CALLS.with(Cell::get), (1, 1));

        drop(Handle::new(HookedPlatform {
            capabilities: Capabilities::empty(),
        }));
        assert_eq!(HOOK_CALLS.with(Cell::get), (1, 1));
    }
}
