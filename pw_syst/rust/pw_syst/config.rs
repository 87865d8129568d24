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

/// Order in which the bytes of a multi-byte value are emitted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ByteOrder {
    /// Least significant byte first.
    LittleEndian,
    /// Most significant byte first.
    BigEndian,
}

impl ByteOrder {
    /// Byte order selected by the `big_endian` feature.
    pub const DEFAULT: Self = if cfg!(feature = "big_endian") {
        ByteOrder::BigEndian
    } else {
        ByteOrder::LittleEndian
    };
}

impl Default for ByteOrder {
    fn default() -> Self {
        Self::DEFAULT
    }
}

bitflags! {
    /// Optional writer primitives a platform advertises to the encoder.
    ///
    /// The 8, 16 and 32-bit writers are always present.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Capabilities: u32 {
        /// Native 64-bit writer.  Without it 64-bit values are split into two
        /// 32-bit writes.
        const IO_64BIT = 1 << 0;
        /// Timestamped 32-bit writer.
        const TIMESTAMP_D32 = 1 << 1;
        /// Message line terminator writer.
        const LINE_FLAGS = 1 << 2;
        /// Per-handle init/release hooks.
        const HANDLE_HOOKS = 1 << 3;
    }
}

/// Platform configuration, fixed when the encoder state is built.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlatformConfig {
    pub byte_order: ByteOrder,
    pub capabilities: Capabilities,
}

impl PlatformConfig {
    /// Build-time byte order with every capability enabled.
    pub const DEFAULT: Self = Self::new(ByteOrder::DEFAULT, Capabilities::all());

    #[must_use]
    pub const fn new(byte_order: ByteOrder, capabilities: Capabilities) -> Self {
        Self {
            byte_order,
            capabilities,
        }
    }

    #[must_use]
    pub const fn with_byte_order(self, byte_order: ByteOrder) -> Self {
        Self { byte_order, ..self }
    }

    #[must_use]
    pub const fn with_capabilities(self, capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            ..self
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
