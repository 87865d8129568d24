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

//! Status codes reported by the SyS-T backend.
//!
//! Values match the canonical Pigweed status codes so a `Result` can be
//! handed back to C init hooks as a plain integer via [`StatusCode`].
//! Buffer overflow in the byte sink is not represented here: it is a fatal
//! assertion, not a status.

/// Status code for no error.
pub const OK: u32 = 0;

/// Errors returned by the backend's recoverable operations.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    /// An entry or state that may only exist once was created again.
    AlreadyExists = 6,
    /// A fixed-size table has no room left.
    ResourceExhausted = 8,
    /// The backend was used before its boot initializer ran.
    FailedPrecondition = 9,
    /// The host output refused the write.
    Unavailable = 14,
}

pub type Result<T> = core::result::Result<T, Error>;

/// Convert a Result into an status code.
pub trait StatusCode {
    /// Return a pigweed compatible status code.
    fn status_code(self) -> u32;
}

impl<T> StatusCode for Result<T> {
    fn status_code(self) -> u32 {
        match self {
            Ok(_) => OK,
            Err(e) => e as u32,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::AlreadyExists => "already exists",
            Error::ResourceExhausted => "resource exhausted",
            Error::FailedPrecondition => "failed precondition",
            Error::Unavailable => "unavailable",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for Error {}

impl embedded_io::Error for Error {
    fn kind(&self) -> embedded_io::ErrorKind {
        use embedded_io::ErrorKind;
        match self {
            Error::AlreadyExists => ErrorKind::AlreadyExists,
            Error::ResourceExhausted => ErrorKind::OutOfMemory,
            Error::FailedPrecondition => ErrorKind::InvalidInput,
            Error::Unavailable => ErrorKind::Other,
        }
    }
}
