//! SPI configuration facets.
//!
//! Each axis is a sealed trait and each legal value a marker type carrying the vendor
//! `SPI_*` encoding.

use embedded_hal::spi::{Phase, Polarity};

use super::registers::*;
use crate::{impl_sealed, Sealed};

#[allow(private_bounds)]
pub trait Role: Sealed {
    const BITS: u32;
    const MASTER: bool;
}

pub struct Master;
pub struct Slave;

impl Role for Master {
    const BITS: u32 = CR1_MSTR | CR1_SSI;
    const MASTER: bool = true;
}
impl Role for Slave {
    const BITS: u32 = 0;
    const MASTER: bool = false;
}

/// Frame width. Also fixes the word type of the transfer buffers.
#[allow(private_bounds)]
pub trait DataSize: Sealed {
    const BITS: u32;
    type Word: Word;
}

pub struct EightBit;
pub struct SixteenBit;

impl DataSize for EightBit {
    const BITS: u32 = 0;
    type Word = u8;
}
impl DataSize for SixteenBit {
    const BITS: u32 = CR1_DFF;
    type Word = u16;
}

/// A frame in memory, handed to the vendor HAL as raw bytes.
#[allow(private_bounds)]
pub trait Word: Sealed + Copy + Default + 'static {
    fn as_bytes(words: &[Self]) -> &[u8];
    fn as_bytes_mut(words: &mut [Self]) -> &mut [u8];
}

impl Word for u8 {
    fn as_bytes(words: &[u8]) -> &[u8] {
        words
    }

    fn as_bytes_mut(words: &mut [u8]) -> &mut [u8] {
        words
    }
}

impl Word for u16 {
    fn as_bytes(words: &[u16]) -> &[u8] {
        // Safety: `u8` has no alignment requirement and every byte of a `u16` is initialized, so
        // the same memory read as bytes is valid for the borrow's lifetime.
        unsafe { core::slice::from_raw_parts(words.as_ptr().cast(), core::mem::size_of_val(words)) }
    }

    fn as_bytes_mut(words: &mut [u16]) -> &mut [u8] {
        let len = core::mem::size_of_val(words);
        // Safety: As above, and any byte pattern written through the slice is a valid `u16`.
        unsafe { core::slice::from_raw_parts_mut(words.as_mut_ptr().cast(), len) }
    }
}

/// Which lines the bus uses, and therefore which transfers it can do.
#[allow(private_bounds)]
pub trait WireMode: Sealed {
    const BITS: u32;
}

/// Wire modes that can send data.
pub trait Transmit: WireMode {}

/// Wire modes that send and receive at the same time.
pub trait FullDuplex: Transmit {}

/// MOSI and MISO, full duplex.
pub struct TwoLines;
/// MOSI and MISO wired, but only receiving.
pub struct TwoLinesRxOnly;
/// A single bidirectional data line, half duplex.
pub struct OneLine;

impl WireMode for TwoLines {
    const BITS: u32 = 0;
}
impl WireMode for TwoLinesRxOnly {
    const BITS: u32 = CR1_RXONLY;
}
impl WireMode for OneLine {
    const BITS: u32 = CR1_BIDIMODE;
}

impl Transmit for TwoLines {}
impl Transmit for OneLine {}
impl FullDuplex for TwoLines {}

#[allow(private_bounds)]
pub trait BitOrder: Sealed {
    const BITS: u32;
}

pub struct MsbFirst;
pub struct LsbFirst;

impl BitOrder for MsbFirst {
    const BITS: u32 = 0;
}
impl BitOrder for LsbFirst {
    const BITS: u32 = CR1_LSBFIRST;
}

/// How the NSS line is managed.
#[allow(private_bounds)]
pub trait SlaveSelect: Sealed {
    const BITS: u32;
    /// The peripheral drives NSS itself.
    const DRIVES_NSS: bool;
}

pub struct HardInput;
pub struct HardOutput;
pub struct SoftNss;

impl SlaveSelect for HardInput {
    const BITS: u32 = 0;
    const DRIVES_NSS: bool = false;
}
impl SlaveSelect for HardOutput {
    // The vendor HAL carries CR2 bits in the upper half of the NSS value.
    const BITS: u32 = CR2_SSOE << 16;
    const DRIVES_NSS: bool = true;
}
impl SlaveSelect for SoftNss {
    const BITS: u32 = CR1_SSM;
    const DRIVES_NSS: bool = false;
}

#[allow(private_bounds)]
pub trait FrameFormat: Sealed {
    const BITS: u32;
}

pub struct Motorola;
pub struct Ti;

impl FrameFormat for Motorola {
    const BITS: u32 = 0;
}
impl FrameFormat for Ti {
    const BITS: u32 = CR2_FRF;
}

#[allow(private_bounds)]
pub trait ClockPhase: Sealed {
    const BITS: u32;
    const PHASE: Phase;
}

/// Data captured on the first clock edge.
pub struct FirstEdge;
/// Data captured on the second clock edge.
pub struct SecondEdge;

impl ClockPhase for FirstEdge {
    const BITS: u32 = 0;
    const PHASE: Phase = Phase::CaptureOnFirstTransition;
}
impl ClockPhase for SecondEdge {
    const BITS: u32 = CR1_CPHA;
    const PHASE: Phase = Phase::CaptureOnSecondTransition;
}

#[allow(private_bounds)]
pub trait ClockPolarity: Sealed {
    const BITS: u32;
    const POLARITY: Polarity;
}

pub struct IdleLow;
pub struct IdleHigh;

impl ClockPolarity for IdleLow {
    const BITS: u32 = 0;
    const POLARITY: Polarity = Polarity::IdleLow;
}
impl ClockPolarity for IdleHigh {
    const BITS: u32 = CR1_CPOL;
    const POLARITY: Polarity = Polarity::IdleHigh;
}

/// Hardware CRC calculation.
#[allow(private_bounds)]
pub trait CrcConfig: Sealed {
    /// Vendor `SPI_CRCCALCULATION_*`.
    const CALCULATION: u32;
    const POLYNOMIAL: u32;
}

pub struct NoCrc;
/// CRC enabled with generator polynomial `POLY`.
pub struct Crc<const POLY: u16>;

impl CrcConfig for NoCrc {
    const CALCULATION: u32 = 0;
    const POLYNOMIAL: u32 = 0;
}

impl<const POLY: u16> Sealed for Crc<POLY> {}

impl<const POLY: u16> CrcConfig for Crc<POLY> {
    const CALCULATION: u32 = CR1_CRCEN;
    const POLYNOMIAL: u32 = {
        assert!(POLY & 1 == 1, "CRC polynomial must be odd");
        POLY as u32
    };
}

impl_sealed!(
    Master,
    Slave,
    EightBit,
    SixteenBit,
    u8,
    u16,
    TwoLines,
    TwoLinesRxOnly,
    OneLine,
    MsbFirst,
    LsbFirst,
    HardInput,
    HardOutput,
    SoftNss,
    Motorola,
    Ti,
    FirstEdge,
    SecondEdge,
    IdleLow,
    IdleHigh,
    NoCrc
);
