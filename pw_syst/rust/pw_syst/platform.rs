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

use crate::config::{ByteOrder, Capabilities, PlatformConfig};
use crate::handle::{HandlePlatformData, OutputFlags};
use crate::header::SystHeader;
use crate::hex::byte_to_hex;
use crate::output::{LogOutput, out_byte, out_bytes};

/// Prefix written ahead of raw timestamp payloads.
pub const RAW_DATA_MARKER: &[u8] = b"SYS-T RAW DATA: ";

/// Writer primitives the encoder calls to emit its stream.
///
/// Writers for capabilities the platform does not advertise are never called
/// by [`crate::Emission`]; implementations may leave them unreachable.
pub trait SystPlatform: Copy {
    /// Optional primitives this platform provides.
    fn capabilities(&self) -> Capabilities;

    /// Order multi-byte values are emitted in.
    fn byte_order(&self) -> ByteOrder;

    fn write_d8(&self, output: &mut dyn LogOutput, value: u8);
    fn write_d16(&self, output: &mut dyn LogOutput, value: u16);
    fn write_d32(&self, output: &mut dyn LogOutput, value: u32);
    fn write_d64(&self, output: &mut dyn LogOutput, value: u64);

    /// Writes a 32-bit timestamp payload.
    fn write_d32ts(&self, output: &mut dyn LogOutput, value: u32);

    /// Terminates a message according to the handle's flag word.
    fn write_flag(&self, output: &mut dyn LogOutput, flags: OutputFlags);

    /// Called when a handle is created, if [`Capabilities::HANDLE_HOOKS`] is
    /// advertised.
    fn handle_init(&self, _data: &mut HandlePlatformData) {}

    /// Called when a handle is released, if [`Capabilities::HANDLE_HOOKS`] is
    /// advertised.
    fn handle_release(&self, _data: &mut HandlePlatformData) {}
}

/// Platform that renders every byte as two uppercase hex digits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HexPlatform {
    byte_order: ByteOrder,
    capabilities: Capabilities,
}

impl HexPlatform {
    #[must_use]
    pub const fn new(config: PlatformConfig) -> Self {
        Self {
            byte_order: config.byte_order,
            capabilities: config.capabilities,
        }
    }

    fn write_hex(output: &mut dyn LogOutput, bytes: &[u8]) {
        for &byte in bytes {
            out_bytes(output, &byte_to_hex(byte));
        }
    }
}

macro_rules! hex_writers {
    ($($bits:literal => $ty:ty),* $(,)?) => {
        paste::paste! {
            $(
                fn [<write_d $bits>](&self, output: &mut dyn LogOutput, value: $ty) {
                    let bytes = match self.byte_order {
                        ByteOrder::BigEndian => value.to_be_bytes(),
                        ByteOrder::LittleEndian => value.to_le_bytes(),
                    };
                    Self::write_hex(output, &bytes);
                }
            )*
        }
    };
}

impl SystPlatform for HexPlatform {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    hex_writers!(8 => u8, 16 => u16, 32 => u32, 64 => u64);

    fn write_d32ts(&self, output: &mut dyn LogOutput, value: u32) {
        out_bytes(output, RAW_DATA_MARKER);
        self.write_d32(output, value);
    }

    fn write_flag(&self, output: &mut dyn LogOutput, flags: OutputFlags) {
        if flags.contains(OutputFlags::CRLF_NONE) {
            return;
        }

        if flags.contains(OutputFlags::CRLF_LFONLY) {
            out_byte(output, b'\n');
        } else {
            out_bytes(output, b"\r\n");
        }
    }
}

/// Installs the hex writers into `header`.
///
/// Passed to [`crate::init_state()`] by the boot initializer.  The writers
/// take their byte order and capabilities from the header's configuration.
/// `user_data` is not used.
pub fn platform_init(header: &mut SystHeader<HexPlatform>, _user_data: Option<&mut dyn Any>) {
    let platform = HexPlatform::new(header.config());
    header.install(platform);
}
