//! The vendor HAL this crate drives.
//!
//! The traits here are the whole surface the descriptors in [`gpio`](crate::gpio) and
//! [`spi`](crate::spi) depend on. Firmware implements them once, forwarding to the vendor's
//! `HAL_GPIO_*` / `HAL_SPI_*` routines and clock-gate macros; every function is associated (no
//! `self`) since the vendor layer is a set of free functions over global hardware.

use core::fmt;

use bitflags::bitflags;
pub use embedded_hal::digital::PinState;

use crate::{gpio::PortName, spi::SpiName};

/// The vendor `HAL_MAX_DELAY`, "wait forever".
pub const MAX_DELAY: u32 = 0xFFFF_FFFF;

/// Most frames one vendor SPI call moves; its `Size` argument is 16 bits wide.
pub const MAX_FRAMES: usize = u16::MAX as usize;

/// Status code returned by a vendor routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum Status {
    Ok = 0,
    Error = 1,
    Busy = 2,
    Timeout = 3,
}

impl Status {
    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }

    /// Maps the status one to one onto a `Result`.
    pub fn into_result(self) -> Result<(), Error> {
        match self {
            Status::Ok => Ok(()),
            Status::Error => Err(Error::Fault),
            Status::Busy => Err(Error::Busy),
            Status::Timeout => Err(Error::Timeout),
        }
    }
}

impl From<Result<(), Error>> for Status {
    fn from(result: Result<(), Error>) -> Self {
        match result {
            Ok(()) => Status::Ok,
            Err(err) => err.into(),
        }
    }
}

/// A failed call: every non-`Ok` [`Status`], plus buffers the vendor routines cannot take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The vendor routine reported `HAL_ERROR`.
    Fault,
    /// The peripheral, or its handle, is in use.
    Busy,
    /// The timeout expired before the operation completed.
    Timeout,
    /// Transfer buffers of different lengths, or more than [`MAX_FRAMES`] frames. Rejected
    /// before the vendor routine is called.
    Length,
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::Fault | Error::Length => Status::Error,
            Error::Busy => Status::Busy,
            Error::Timeout => Status::Timeout,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Fault => f.write_str("peripheral reported an error"),
            Error::Busy => f.write_str("peripheral is busy"),
            Error::Timeout => f.write_str("peripheral operation timed out"),
            Error::Length => f.write_str("buffer length not accepted by the peripheral"),
        }
    }
}

impl core::error::Error for Error {}

impl embedded_hal::spi::Error for Error {
    fn kind(&self) -> embedded_hal::spi::ErrorKind {
        embedded_hal::spi::ErrorKind::Other
    }
}

/// How long a blocking bus call may wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Timeout {
    /// Block until the transfer completes or fails.
    #[default]
    Forever,
    /// Give up after this many HAL ticks.
    Ticks(u32),
}

impl Timeout {
    /// The value handed to the vendor routine.
    pub const fn ticks(self) -> u32 {
        match self {
            Timeout::Forever => MAX_DELAY,
            Timeout::Ticks(ticks) => ticks,
        }
    }
}

impl From<u32> for Timeout {
    fn from(ticks: u32) -> Self {
        match ticks {
            MAX_DELAY => Timeout::Forever,
            ticks => Timeout::Ticks(ticks),
        }
    }
}

bitflags! {
    /// A set of pins on one port, the vendor `GPIO_PIN_x` masks.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct PinMask: u16 {
        const PIN_0 = 1;
        const PIN_1 = 1 << 1;
        const PIN_2 = 1 << 2;
        const PIN_3 = 1 << 3;
        const PIN_4 = 1 << 4;
        const PIN_5 = 1 << 5;
        const PIN_6 = 1 << 6;
        const PIN_7 = 1 << 7;
        const PIN_8 = 1 << 8;
        const PIN_9 = 1 << 9;
        const PIN_10 = 1 << 10;
        const PIN_11 = 1 << 11;
        const PIN_12 = 1 << 12;
        const PIN_13 = 1 << 13;
        const PIN_14 = 1 << 14;
        const PIN_15 = 1 << 15;
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PinMask {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PinMask({=u16:#06x})", self.bits())
    }
}

/// The vendor `GPIO_InitTypeDef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioInit {
    pub pin: PinMask,
    pub mode: u32,
    pub pull: u32,
    pub speed: u32,
}

/// The vendor `SPI_InitTypeDef`.
///
/// Every field holds the vendor register encoding, except `baud_rate_prescaler` which is the
/// clock divisor itself (a power of two up to 256).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiInit {
    pub mode: u32,
    pub direction: u32,
    pub data_size: u32,
    pub clk_polarity: u32,
    pub clk_phase: u32,
    pub nss: u32,
    pub baud_rate_prescaler: u32,
    pub first_bit: u32,
    pub ti_mode: u32,
    pub crc_calculation: u32,
    pub crc_polynomial: u32,
}

impl SpiInit {
    /// All fields zeroed, the state of a handle nobody initialized yet.
    pub const RESET: SpiInit = SpiInit {
        mode: 0,
        direction: 0,
        data_size: 0,
        clk_polarity: 0,
        clk_phase: 0,
        nss: 0,
        baud_rate_prescaler: 0,
        first_bit: 0,
        ti_mode: 0,
        crc_calculation: 0,
        crc_polynomial: 0,
    };
}

/// The runtime handle of one SPI instance, the vendor `SPI_HandleTypeDef`.
///
/// There is one per instance, owned by [`spi`](crate::spi). The vendor binding is free to keep
/// its own per-instance state keyed by `instance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiHandle {
    pub instance: SpiName,
    pub init: SpiInit,
}

impl SpiHandle {
    pub const fn new(instance: SpiName) -> Self {
        SpiHandle {
            instance,
            init: SpiInit::RESET,
        }
    }
}

/// Vendor GPIO routines.
pub trait GpioHal {
    /// Register block handle of a port, `GPIO_TypeDef *` for the vendor C HAL.
    type Block: Copy;

    fn port(port: PortName) -> Self::Block;
    fn enable_clock(port: PortName);
    fn disable_clock(port: PortName);

    fn init(block: Self::Block, init: &GpioInit);
    fn deinit(block: Self::Block, pins: PinMask);
    fn read(block: Self::Block, pins: PinMask) -> PinState;
    fn write(block: Self::Block, pins: PinMask, state: PinState);
    fn toggle(block: Self::Block, pins: PinMask);
    fn lock(block: Self::Block, pins: PinMask) -> Status;
}

/// Vendor SPI routines.
///
/// Buffers are handed over as bytes; for 16-bit frames they hold native-endian `u16` words and
/// the frame count is half the byte length. The binding reads the frame size from
/// `handle.init.data_size`. A buffer never holds more than [`MAX_FRAMES`] frames, so the frame
/// count always fits the vendor `Size` argument.
pub trait SpiHal {
    /// Register block handle of an instance, `SPI_TypeDef *` for the vendor C HAL.
    type Block: Copy;

    fn instance(spi: SpiName) -> Self::Block;
    fn enable_clock(spi: SpiName);
    fn disable_clock(spi: SpiName);

    /// `HAL_SPI_Init`, with `spi` as the handle's `Instance`.
    fn init(spi: Self::Block, handle: &mut SpiHandle) -> Status;
    fn transmit(spi: Self::Block, handle: &mut SpiHandle, data: &[u8], timeout: u32) -> Status;
    fn receive(
        spi: Self::Block,
        handle: &mut SpiHandle,
        data: &mut [u8],
        timeout: u32,
    ) -> Status;
    /// `tx` and `rx` always have the same length, so either gives the frame count.
    fn transfer(
        spi: Self::Block,
        handle: &mut SpiHandle,
        tx: &[u8],
        rx: &mut [u8],
        timeout: u32,
    ) -> Status;
}
