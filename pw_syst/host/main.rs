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

//! Boots the SyS-T backend on the development host and writes a few sample
//! records to `stdout`.

use std::io;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use pw_syst::{
    BufferedOutput, ByteOrder, Capabilities, HostUptimeClock, InitLevel, InitRegistry,
    OutputFlags, PlatformConfig, SystContext,
};

mod logger;

/// Largest output buffer the host target offers.
const MAX_OUTPUT_CAPACITY: usize = 256;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum LineEnding {
    Crlf,
    Lf,
    None,
}

impl LineEnding {
    fn flags(self) -> OutputFlags {
        match self {
            LineEnding::Crlf => OutputFlags::empty(),
            LineEnding::Lf => OutputFlags::CRLF_LFONLY,
            LineEnding::None => OutputFlags::CRLF_NONE,
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Run the SyS-T platform backend against stdout")]
struct Args {
    /// Emit multi-byte values most significant byte first.
    #[arg(long)]
    big_endian: bool,

    /// Message terminator.
    #[arg(long, value_enum, default_value_t = LineEnding::Crlf)]
    line_ending: LineEnding,

    /// Bytes buffered before each flush to stdout.
    #[arg(long, default_value_t = 64, value_parser = clap::value_parser!(u16).range(1..=256))]
    capacity: u16,

    /// Split 64-bit values into two 32-bit writes.
    #[arg(long)]
    no_64bit: bool,

    /// Write timestamps without the raw data marker.
    #[arg(long)]
    no_timestamp: bool,

    /// Increase diagnostic output on stderr.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Additional 32-bit values to emit, decimal or 0x-prefixed hex.
    #[arg(value_parser = parse_u32)]
    values: Vec<u32>,
}

impl Args {
    fn platform_config(&self) -> PlatformConfig {
        let byte_order = if self.big_endian {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        };

        let mut capabilities = Capabilities::all();
        if self.no_64bit {
            capabilities.remove(Capabilities::IO_64BIT);
        }
        if self.no_timestamp {
            capabilities.remove(Capabilities::TIMESTAMP_D32);
        }

        PlatformConfig::new(byte_order, capabilities)
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn parse_u32(arg: &str) -> std::result::Result<u32, String> {
    let parsed = match arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => arg.parse(),
    };
    parsed.map_err(|e| format!("invalid value {arg:?}: {e}"))
}

/// Host console for the backend's output buffer.
struct Stdout(io::Stdout);

impl embedded_io::ErrorType for Stdout {
    type Error = pw_syst::Error;
}

impl embedded_io::Write for Stdout {
    fn write(&mut self, buf: &[u8]) -> std::result::Result<usize, pw_syst::Error> {
        io::Write::write(&mut self.0, buf).map_err(|_| pw_syst::Error::Unavailable)
    }

    fn flush(&mut self) -> std::result::Result<(), pw_syst::Error> {
        io::Write::flush(&mut self.0).map_err(|_| pw_syst::Error::Unavailable)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.log_level())?;

    let mut ctx = SystContext::new(args.platform_config(), HostUptimeClock::new());
    let mut registry = InitRegistry::<SystContext<HostUptimeClock>, 4>::new();
    registry
        .register(pw_syst::init_entry())
        .context("registering SyS-T init")?;
    for level in InitLevel::ALL {
        registry
            .run_level(level, &mut ctx)
            .with_context(|| format!("running {level:?} init"))?;
    }

    let mut output = BufferedOutput::<_, MAX_OUTPUT_CAPACITY>::with_capacity(
        Stdout(io::stdout()),
        usize::from(args.capacity),
    );
    let flags = args.line_ending.flags();

    let epoch = ctx.epoch();
    ctx.emit(&mut output, flags, |e| e.write_d32ts(epoch as u32))?;
    ctx.emit(&mut output, flags, |e| {
        e.write_d8(0xa5);
        e.write_d16(0x1234);
        e.write_d32(0xdead_beef);
        e.write_d64(0x0123_4567_89ab_cdef);
    })?;
    for &value in &args.values {
        ctx.emit(&mut output, flags, |e| e.write_d32(value))?;
    }

    // Drain whatever is left in the buffer.
    output.into_inner();
    log::info!("Done after {} ms", ctx.epoch());
    Ok(())
}
