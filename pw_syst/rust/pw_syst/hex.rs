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

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Returns the uppercase ASCII hex digit for the low four bits of `nibble`.
#[must_use]
#[inline]
pub const fn nibble_to_hex(nibble: u8) -> u8 {
    HEX_DIGITS[(nibble & 0xf) as usize]
}

/// Returns the two uppercase ASCII hex digits for `byte`, high nibble first.
#[must_use]
#[inline]
pub const fn byte_to_hex(byte: u8) -> [u8; 2] {
    [nibble_to_hex(byte >> 4), nibble_to_hex(byte)]
}
