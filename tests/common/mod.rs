//! A vendor HAL stand-in that records every call and simulates the pin levels of each port.
#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard, PoisonError};

use typed_periph::{
    gpio::PortName,
    hal::{GpioHal, GpioInit, PinMask, PinState, SpiHal, SpiHandle, Status},
    spi::SpiName,
};

/// What `receive` fills buffers with.
pub const RX_BYTE: u8 = 0xA5;

pub struct Mock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GpioClock(PortName, bool),
    GpioInit(PortName, GpioInit),
    GpioDeinit(PortName, PinMask),
    GpioLock(PortName, PinMask),
    SpiClock(SpiName, bool),
    SpiInit(SpiHandle),
    SpiTransmit {
        handle: SpiHandle,
        data: Vec<u8>,
        timeout: u32,
    },
    SpiReceive {
        handle: SpiHandle,
        len: usize,
        timeout: u32,
    },
    SpiTransfer {
        handle: SpiHandle,
        tx: Vec<u8>,
        rx_len: usize,
        timeout: u32,
    },
}

pub struct State {
    pub calls: Vec<Call>,
    /// Output data register of every port.
    pub levels: [u16; 7],
    pub lock_status: Status,
    pub spi_status: Status,
}

impl State {
    const fn new() -> Self {
        State {
            calls: Vec::new(),
            levels: [0; 7],
            lock_status: Status::Ok,
            spi_status: Status::Ok,
        }
    }
}

static STATE: Mutex<State> = Mutex::new(State::new());
static SESSION: Mutex<()> = Mutex::new(());

/// Serializes the tests of one binary, since the mock and the SPI handles are global. The mock
/// starts from a clean state.
pub fn session() -> MutexGuard<'static, ()> {
    let guard = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    *state() = State::new();
    guard
}

pub fn state() -> MutexGuard<'static, State> {
    STATE.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn calls() -> Vec<Call> {
    state().calls.clone()
}

fn record(call: Call) {
    state().calls.push(call);
}

impl GpioHal for Mock {
    type Block = PortName;

    fn port(port: PortName) -> PortName {
        port
    }

    fn enable_clock(port: PortName) {
        record(Call::GpioClock(port, true));
    }

    fn disable_clock(port: PortName) {
        record(Call::GpioClock(port, false));
    }

    fn init(port: PortName, init: &GpioInit) {
        record(Call::GpioInit(port, *init));
    }

    fn deinit(port: PortName, pins: PinMask) {
        record(Call::GpioDeinit(port, pins));
    }

    fn read(port: PortName, pins: PinMask) -> PinState {
        PinState::from(state().levels[port.index()] & pins.bits() != 0)
    }

    fn write(port: PortName, pins: PinMask, pin_state: PinState) {
        let mut state = state();
        match pin_state {
            PinState::High => state.levels[port.index()] |= pins.bits(),
            PinState::Low => state.levels[port.index()] &= !pins.bits(),
        }
    }

    fn toggle(port: PortName, pins: PinMask) {
        state().levels[port.index()] ^= pins.bits();
    }

    fn lock(port: PortName, pins: PinMask) -> Status {
        let mut state = state();
        state.calls.push(Call::GpioLock(port, pins));
        state.lock_status
    }
}

impl SpiHal for Mock {
    type Block = SpiName;

    fn instance(spi: SpiName) -> SpiName {
        spi
    }

    fn enable_clock(spi: SpiName) {
        record(Call::SpiClock(spi, true));
    }

    fn disable_clock(spi: SpiName) {
        record(Call::SpiClock(spi, false));
    }

    fn init(spi: SpiName, handle: &mut SpiHandle) -> Status {
        check_block(spi, handle);
        let mut state = state();
        state.calls.push(Call::SpiInit(*handle));
        state.spi_status
    }

    fn transmit(spi: SpiName, handle: &mut SpiHandle, data: &[u8], timeout: u32) -> Status {
        check_block(spi, handle);
        let mut state = state();
        state.calls.push(Call::SpiTransmit {
            handle: *handle,
            data: data.to_vec(),
            timeout,
        });
        state.spi_status
    }

    fn receive(spi: SpiName, handle: &mut SpiHandle, data: &mut [u8], timeout: u32) -> Status {
        check_block(spi, handle);
        data.fill(RX_BYTE);
        let mut state = state();
        state.calls.push(Call::SpiReceive {
            handle: *handle,
            len: data.len(),
            timeout,
        });
        state.spi_status
    }

    // Loopback: MISO sees exactly what went out on MOSI.
    fn transfer(
        spi: SpiName,
        handle: &mut SpiHandle,
        tx: &[u8],
        rx: &mut [u8],
        timeout: u32,
    ) -> Status {
        check_block(spi, handle);
        assert_eq!(tx.len(), rx.len(), "transfer buffers differ in length");
        rx.copy_from_slice(tx);
        let mut state = state();
        state.calls.push(Call::SpiTransfer {
            handle: *handle,
            tx: tx.to_vec(),
            rx_len: rx.len(),
            timeout,
        });
        state.spi_status
    }
}

// Every call must reach the register block of the instance its handle belongs to.
fn check_block(spi: SpiName, handle: &SpiHandle) {
    assert_eq!(spi, handle.instance, "register block of the wrong instance");
}
