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

use embedded_io::Error as _;

/// A host log output buffer.
///
/// Mirrors the kernel's log output object: a byte buffer, a write offset
/// into it, a capacity, and a flush operation.  What flush does with the
/// bytes (console, network, storage) is up to the host.
pub trait LogOutput {
    /// Backing storage.  Must be at least [`LogOutput::capacity()`] bytes.
    fn buffer(&mut self) -> &mut [u8];

    /// Number of bytes that fit before a flush is required.
    fn capacity(&self) -> usize;

    /// Current write offset.
    fn offset(&self) -> usize;

    /// Moves the write offset.
    fn set_offset(&mut self, offset: usize);

    /// Drains `buffer()[..offset()]` and resets the offset to zero.
    fn flush(&mut self);
}

/// Appends one byte to `output`.
///
/// Every byte the backend emits goes through here.  Panics if the output is
/// already at capacity, before anything is written.  Flushes `output` when
/// the write fills it.
pub fn out_byte(output: &mut dyn LogOutput, byte: u8) {
    let offset = output.offset();
    let capacity = output.capacity();
    fatal_assert!(
        offset < capacity,
        "log output overflow: offset {} capacity {}",
        offset,
        capacity
    );

    output.buffer()[offset] = byte;
    output.set_offset(offset + 1);

    if offset + 1 == capacity {
        output.flush();
    }
}

/// Appends `bytes` to `output` one at a time through [`out_byte()`].
pub fn out_bytes(output: &mut dyn LogOutput, bytes: &[u8]) {
    for &byte in bytes {
        out_byte(output, byte);
    }
}

/// A [`LogOutput`] backed by an `N` byte array that drains into an
/// [`embedded_io::Write`] on flush.
///
/// The capacity may be set below `N` at construction to flush more often.
pub struct BufferedOutput<W: embedded_io::Write, const N: usize> {
    writer: W,
    buf: [u8; N],
    capacity: usize,
    offset: usize,
}

impl<W: embedded_io::Write, const N: usize> BufferedOutput<W, N> {
    /// Create an output using the full `N` bytes of buffer.
    pub const fn new(writer: W) -> Self {
        Self::with_capacity(writer, N)
    }

    /// Create an output that flushes every `capacity` bytes.
    ///
    /// `capacity` is clamped to `1..=N`.
    pub const fn with_capacity(writer: W, capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            1
        } else if capacity > N {
            N
        } else {
            capacity
        };
        Self {
            writer,
            buf: [0u8; N],
            capacity,
            offset: 0,
        }
    }

    /// Bytes written since the last flush.
    pub fn pending(&self) -> &[u8] {
        &self.buf[..self.offset]
    }

    /// Access the underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Flushes any pending bytes and returns the underlying writer.
    pub fn into_inner(mut self) -> W {
        LogOutput::flush(&mut self);
        self.writer
    }
}

impl<W: embedded_io::Write, const N: usize> LogOutput for BufferedOutput<W, N> {
    fn buffer(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    fn flush(&mut self) {
        if self.offset == 0 {
            return;
        }

        let result = self
            .writer
            .write_all(&self.buf[..self.offset])
            .and_then(|()| self.writer.flush());
        if let Err(e) = result {
            // The bytes are gone either way; a failing log sink cannot be
            // reported through the log it is serving.
            log::warn!("Dropped {} buffered log bytes: {:?}", self.offset, e.kind());
        }
        self.offset = 0;
    }
}
