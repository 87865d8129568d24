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

// End to end boot and emission through the public API.

use super::*;
use crate::output::test_utils::RecordingOutput;

struct TestClock;

impl Clock for TestClock {
    const TICKS_PER_SEC: u64 = 1000;

    fn uptime_ticks(&self) -> u64 {
        0x0102_0304
    }
}

// Stands in for the kernel: owns the backend context and records what ran.
struct Kernel {
    syst: SystContext<TestClock>,
    init_calls: u32,
    events: Vec<&'static str>,
    console: RecordingOutput<64>,
}

impl Kernel {
    fn new(config: PlatformConfig) -> Self {
        Self {
            syst: SystContext::new(config, TestClock),
            init_calls: 0,
            events: Vec::new(),
            console: RecordingOutput::new(),
        }
    }
}

fn counted_syst_init(kernel: &mut Kernel) -> Result<()> {
    kernel.init_calls += 1;
    kernel.events.push("syst_init");
    syst_init(&mut kernel.syst)
}

fn app_main(kernel: &mut Kernel) -> Result<()> {
    kernel.events.push("app_main");
    let epoch = kernel.syst.epoch() as u32;
    kernel
        .syst
        .emit(&mut kernel.console, OutputFlags::CRLF_LFONLY, |e| {
            e.write_d32ts(epoch);
        })
}

fn boot_registry() -> InitRegistry<Kernel, 4> {
    let mut registry = InitRegistry::new();
    registry
        .register(InitEntry::new(
            "app",
            InitLevel::Application,
            0,
            app_main,
        ))
        .unwrap();
    registry
        .register(InitEntry::new(
            "syst",
            InitLevel::PostKernel,
            SYST_INIT_PRIORITY,
            counted_syst_init,
        ))
        .unwrap();
    registry
}

#[test]
fn boot_runs_init_once_before_first_write() {
    let mut kernel = Kernel::new(PlatformConfig::DEFAULT.with_byte_order(ByteOrder::BigEndian));
    let mut registry = boot_registry();

    registry.run_all(&mut kernel).unwrap();
    registry.run_all(&mut kernel).unwrap();

    assert_eq!(kernel.init_calls, 1);
    assert_eq!(kernel.events, ["syst_init", "app_main"]);
    assert_eq!(kernel.console.contents(), b"SYS-T RAW DATA: 01020304\n");
}

#[test]
fn writes_before_boot_are_refused() {
    let mut kernel = Kernel::new(PlatformConfig::DEFAULT);
    assert_eq!(app_main(&mut kernel), Err(Error::FailedPrecondition));
    assert_eq!(kernel.console.contents(), b"");
}

#[test]
fn registering_the_backend_entry_initializes_context() {
    let mut ctx = SystContext::new(PlatformConfig::DEFAULT, TestClock);
    let mut registry = InitRegistry::<SystContext<TestClock>, 1>::new();
    registry.register(init_entry()).unwrap();

    registry.run_level(InitLevel::PreKernel2, &mut ctx).unwrap();
    assert!(!ctx.is_initialized());
    registry.run_level(InitLevel::PostKernel, &mut ctx).unwrap();
    assert!(ctx.is_initialized());
}

#[test]
fn little_endian_message_with_default_terminator() {
    let config = PlatformConfig::new(ByteOrder::LittleEndian, Capabilities::all());
    let mut ctx = SystContext::new(config, TestClock);
    syst_init(&mut ctx).unwrap();

    let mut console = RecordingOutput::<64>::new();
    ctx.emit(&mut console, OutputFlags::empty(), |e| {
        e.write_d8(0xa5);
        e.write_d16(0x1234);
        e.write_d32(0x0102_0304);
        e.write_d64(0x1122_3344_5566_7788);
    })
    .unwrap();
    assert_eq!(console.contents(), b"A53412040302018877665544332211\r\n");
}

#[test]
fn small_output_flushes_once_per_fill() {
    let mut ctx = SystContext::new(
        PlatformConfig::new(ByteOrder::BigEndian, Capabilities::LINE_FLAGS),
        TestClock,
    );
    syst_init(&mut ctx).unwrap();

    let mut console = RecordingOutput::<4>::new();
    ctx.emit(&mut console, OutputFlags::CRLF_NONE, |e| e.write_d16(0xcafe))
        .unwrap();
    assert_eq!(console.flush_count, 1);
    assert_eq!(console.flushed, b"CAFE");
    assert_eq!(console.offset, 0);
}
