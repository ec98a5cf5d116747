//! SPI instances and bus device descriptors.
//!
//! A [`Device`] names an instance and its whole configuration; the defaults give an 8-bit,
//! full-duplex master with software NSS, SPI mode 0 and the clock divided by 16.
//!
//! ```
//! # use typed_periph::hal::{SpiHal, SpiHandle, Status};
//! # use typed_periph::spi::SpiName;
//! # struct Vendor;
//! # impl SpiHal for Vendor {
//! #     type Block = usize;
//! #     fn instance(spi: SpiName) -> usize { spi.index() }
//! #     fn enable_clock(_: SpiName) {}
//! #     fn disable_clock(_: SpiName) {}
//! #     fn init(_: usize, _: &mut SpiHandle) -> Status { Status::Ok }
//! #     fn transmit(_: usize, _: &mut SpiHandle, _: &[u8], _: u32) -> Status { Status::Ok }
//! #     fn receive(_: usize, _: &mut SpiHandle, _: &mut [u8], _: u32) -> Status { Status::Ok }
//! #     fn transfer(_: usize, _: &mut SpiHandle, _: &[u8], _: &mut [u8], _: u32) -> Status {
//! #         Status::Ok
//! #     }
//! # }
//! use typed_periph::hal::Timeout;
//! use typed_periph::spi::{Device, IdleHigh, Master, SecondEdge, Spi1, SpiConfig};
//! use typed_periph::spi::{EightBit, FirstEdge, Motorola, MsbFirst, SoftNss, TwoLines, NoCrc};
//!
//! type Flash = Device<Spi1<Vendor>>;
//! type Display = Device<
//!     Spi1<Vendor>, Master, 4, Motorola, MsbFirst, EightBit, TwoLines, SoftNss,
//!     SecondEdge, IdleHigh, NoCrc,
//! >;
//!
//! Flash::init()?;
//! Flash::transmit(&[0x9F], Timeout::default())?;
//! Display::reinit()?;
//! # Ok::<(), typed_periph::hal::Error>(())
//! ```
//!
//! The prescaler is checked when the program is built:
//!
//! ```compile_fail,E0080
//! # use typed_periph::hal::{SpiHal, SpiHandle, Status};
//! # use typed_periph::spi::SpiName;
//! # struct Vendor;
//! # impl SpiHal for Vendor {
//! #     type Block = usize;
//! #     fn instance(spi: SpiName) -> usize { spi.index() }
//! #     fn enable_clock(_: SpiName) {}
//! #     fn disable_clock(_: SpiName) {}
//! #     fn init(_: usize, _: &mut SpiHandle) -> Status { Status::Ok }
//! #     fn transmit(_: usize, _: &mut SpiHandle, _: &[u8], _: u32) -> Status { Status::Ok }
//! #     fn receive(_: usize, _: &mut SpiHandle, _: &mut [u8], _: u32) -> Status { Status::Ok }
//! #     fn transfer(_: usize, _: &mut SpiHandle, _: &[u8], _: &mut [u8], _: u32) -> Status {
//! #         Status::Ok
//! #     }
//! # }
//! use typed_periph::spi::{Device, Master, Spi1};
//!
//! const BUS: Device<Spi1<Vendor>, Master, 17> = Device::new();
//! ```
//!
//! ```compile_fail,E0080
//! # use typed_periph::hal::{SpiHal, SpiHandle, Status};
//! # use typed_periph::spi::SpiName;
//! # struct Vendor;
//! # impl SpiHal for Vendor {
//! #     type Block = usize;
//! #     fn instance(spi: SpiName) -> usize { spi.index() }
//! #     fn enable_clock(_: SpiName) {}
//! #     fn disable_clock(_: SpiName) {}
//! #     fn init(_: usize, _: &mut SpiHandle) -> Status { Status::Ok }
//! #     fn transmit(_: usize, _: &mut SpiHandle, _: &[u8], _: u32) -> Status { Status::Ok }
//! #     fn receive(_: usize, _: &mut SpiHandle, _: &mut [u8], _: u32) -> Status { Status::Ok }
//! #     fn transfer(_: usize, _: &mut SpiHandle, _: &[u8], _: &mut [u8], _: u32) -> Status {
//! #         Status::Ok
//! #     }
//! # }
//! use typed_periph::spi::{Device, Master, Spi1};
//!
//! const BUS: Device<Spi1<Vendor>, Master, 512> = Device::new();
//! ```
//!
//! A receive-only bus has no transmit:
//!
//! ```compile_fail,E0277
//! # use typed_periph::hal::{SpiHal, SpiHandle, Status};
//! # use typed_periph::spi::SpiName;
//! # struct Vendor;
//! # impl SpiHal for Vendor {
//! #     type Block = usize;
//! #     fn instance(spi: SpiName) -> usize { spi.index() }
//! #     fn enable_clock(_: SpiName) {}
//! #     fn disable_clock(_: SpiName) {}
//! #     fn init(_: usize, _: &mut SpiHandle) -> Status { Status::Ok }
//! #     fn transmit(_: usize, _: &mut SpiHandle, _: &[u8], _: u32) -> Status { Status::Ok }
//! #     fn receive(_: usize, _: &mut SpiHandle, _: &mut [u8], _: u32) -> Status { Status::Ok }
//! #     fn transfer(_: usize, _: &mut SpiHandle, _: &[u8], _: &mut [u8], _: u32) -> Status {
//! #         Status::Ok
//! #     }
//! # }
//! use typed_periph::hal::Timeout;
//! use typed_periph::spi::{Device, EightBit, Master, Motorola, MsbFirst, Spi2, SpiConfig};
//! use typed_periph::spi::TwoLinesRxOnly;
//!
//! type Adc = Device<Spi2<Vendor>, Master, 8, Motorola, MsbFirst, EightBit, TwoLinesRxOnly>;
//!
//! let _ = Adc::transmit(&[0x00], Timeout::default());
//! ```
//!
//! Only [`Device`] describes a bus, so a configuration cannot be written by hand:
//!
//! ```compile_fail
//! use typed_periph::hal::{SpiHal, SpiInit};
//! use typed_periph::spi::{EightBit, Spi1, SpiConfig, TwoLines};
//!
//! struct Handmade<H>(H);
//!
//! impl<H: SpiHal> SpiConfig for Handmade<H> {
//!     type Instance = Spi1<H>;
//!     type Word = u8;
//!     type Wire = TwoLines;
//!     const INIT: SpiInit = SpiInit { baud_rate_prescaler: 17, ..SpiInit::RESET };
//!     const MODE: embedded_hal::spi::Mode = embedded_hal::spi::MODE_0;
//! }
//! ```

use core::marker::PhantomData;

use crate::{
    bits,
    hal::{Error, SpiHal, SpiHandle, SpiInit, Status, Timeout, MAX_FRAMES},
    Sealed,
};

mod handle;
mod implementation;
pub mod mode;
mod registers;

pub use mode::*;

/// The physical SPI instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiName {
    Spi1,
    Spi2,
    Spi3,
    Spi4,
}

impl SpiName {
    pub const COUNT: usize = 4;

    pub const fn from_number(number: u8) -> Self {
        match number {
            1 => SpiName::Spi1,
            2 => SpiName::Spi2,
            3 => SpiName::Spi3,
            4 => SpiName::Spi4,
            _ => panic!("no such SPI peripheral, only SPI1-SPI4 are valid"),
        }
    }

    /// Zero-based index, `Spi1` is 0.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// An SPI instance, resolved at compile time.
#[allow(private_bounds)]
pub trait Instance: Sealed {
    type Hal: SpiHal;
    const NAME: SpiName;

    /// Register block of the instance.
    fn base() -> <Self::Hal as SpiHal>::Block {
        <Self::Hal as SpiHal>::instance(Self::NAME)
    }

    fn enable_clock() {
        <Self::Hal as SpiHal>::enable_clock(Self::NAME)
    }

    fn disable_clock() {
        <Self::Hal as SpiHal>::disable_clock(Self::NAME)
    }
}

/// Instance `SPI<N>` as driven by the HAL `H`.
pub struct Spi<H, const N: u8> {
    _hal: PhantomData<H>,
}

impl<H, const N: u8> Sealed for Spi<H, N> {}

impl<H: SpiHal, const N: u8> Instance for Spi<H, N> {
    type Hal = H;
    const NAME: SpiName = SpiName::from_number(N);
}

pub type Spi1<H> = Spi<H, 1>;
pub type Spi2<H> = Spi<H, 2>;
pub type Spi3<H> = Spi<H, 3>;
pub type Spi4<H> = Spi<H, 4>;

type InstanceHal<C> = <<C as SpiConfig>::Instance as Instance>::Hal;
type InstanceBlock<C> = <InstanceHal<C> as SpiHal>::Block;

/// The full configuration of a bus device.
///
/// Implemented by [`Device`]. All devices on one instance share its single vendor handle; the
/// handle holds the configuration of whichever device last ran `init` or `reinit`.
///
/// Buffers hold at most [`MAX_FRAMES`] words, and the two buffers of a `transfer` have the same
/// length. Anything else fails with [`Error::Length`] without reaching the vendor HAL.
#[allow(private_bounds)]
pub trait SpiConfig: Sealed + Sized {
    type Instance: Instance;
    type Word: Word;
    type Wire: WireMode;

    /// What `init` stores in the handle. Evaluating it validates the configuration.
    const INIT: SpiInit;
    /// Clock polarity and phase.
    const MODE: embedded_hal::spi::Mode;

    /// Enable the instance clock and program the peripheral.
    fn init() -> Result<(), Error> {
        trace!("spi {}: init {}", <Self::Instance as Instance>::NAME, Self::INIT);
        configure::<Self>(true)
    }

    /// Program the peripheral with this configuration again, leaving the clock alone.
    fn reinit() -> Result<(), Error> {
        trace!("spi {}: reinit {}", <Self::Instance as Instance>::NAME, Self::INIT);
        configure::<Self>(false)
    }

    fn transmit(data: &[Self::Word], timeout: Timeout) -> Result<(), Error>
    where
        Self::Wire: Transmit,
    {
        check_frames(data.len())?;
        with_handle::<Self>(|spi, handle| {
            <InstanceHal<Self> as SpiHal>::transmit(
                spi,
                handle,
                Self::Word::as_bytes(data),
                timeout.ticks(),
            )
        })
    }

    fn receive(data: &mut [Self::Word], timeout: Timeout) -> Result<(), Error> {
        check_frames(data.len())?;
        with_handle::<Self>(|spi, handle| {
            <InstanceHal<Self> as SpiHal>::receive(
                spi,
                handle,
                Self::Word::as_bytes_mut(data),
                timeout.ticks(),
            )
        })
    }

    /// Full-duplex transfer: `tx` goes out while `rx` fills. Both must have the same length.
    fn transfer(tx: &[Self::Word], rx: &mut [Self::Word], timeout: Timeout) -> Result<(), Error>
    where
        Self::Wire: FullDuplex,
    {
        if tx.len() != rx.len() {
            warn!("spi: transfer of {} words into {}", tx.len(), rx.len());
            return Err(Error::Length);
        }
        check_frames(tx.len())?;
        with_handle::<Self>(|spi, handle| {
            <InstanceHal<Self> as SpiHal>::transfer(
                spi,
                handle,
                Self::Word::as_bytes(tx),
                Self::Word::as_bytes_mut(rx),
                timeout.ticks(),
            )
        })
    }
}

fn configure<C: SpiConfig>(enable_clock: bool) -> Result<(), Error> {
    let init = C::INIT;
    let instance = <C::Instance as Instance>::NAME;
    let mut claim = handle::handle(instance).claim()?;
    let handle = claim.handle();
    handle.init = init;
    if enable_clock {
        <C::Instance as Instance>::enable_clock();
    }

    let status = <InstanceHal<C> as SpiHal>::init(<C::Instance as Instance>::base(), handle);
    let result = status.into_result();
    if let Err(err) = result {
        warn!("spi {}: init failed: {}", instance, err);
    }
    result
}

fn with_handle<C: SpiConfig>(
    f: impl FnOnce(InstanceBlock<C>, &mut SpiHandle) -> Status,
) -> Result<(), Error> {
    let mut claim = handle::handle(<C::Instance as Instance>::NAME).claim()?;
    f(<C::Instance as Instance>::base(), claim.handle()).into_result()
}

fn check_frames(frames: usize) -> Result<(), Error> {
    if frames > MAX_FRAMES {
        warn!("spi: {} words do not fit one transfer", frames);
        return Err(Error::Length);
    }
    Ok(())
}

const fn check_prescaler(prescaler: u16) {
    assert!(
        bits::bit_weight(prescaler as u32) == 1,
        "baud rate prescaler value must be a power of 2"
    );
    assert!(prescaler <= 256, "baud rate prescaler value must be <= 256");
}

const fn check_slave_select(drives_nss: bool, master: bool) {
    assert!(!drives_nss || master, "only a master can drive the NSS output");
}

/// A device on instance `S`. Parameters follow the vendor `SPI_InitTypeDef`; `PRESCALER` is the
/// clock divisor, a power of two up to 256.
pub struct Device<
    S,
    R = Master,
    const PRESCALER: u16 = 16,
    F = Motorola,
    B = MsbFirst,
    D = EightBit,
    W = TwoLines,
    N = SoftNss,
    PH = FirstEdge,
    PO = IdleLow,
    C = NoCrc,
> {
    _config: PhantomData<(S, R, F, B, D, W, N, PH, PO, C)>,
}

impl<S, R, const PRESCALER: u16, F, B, D, W, N, PH, PO, C> Sealed
    for Device<S, R, PRESCALER, F, B, D, W, N, PH, PO, C>
{
}

impl<S, R, const PRESCALER: u16, F, B, D, W, N, PH, PO, C> SpiConfig
    for Device<S, R, PRESCALER, F, B, D, W, N, PH, PO, C>
where
    S: Instance,
    R: Role,
    F: FrameFormat,
    B: BitOrder,
    D: DataSize,
    W: WireMode,
    N: SlaveSelect,
    PH: ClockPhase,
    PO: ClockPolarity,
    C: CrcConfig,
{
    type Instance = S;
    type Word = D::Word;
    type Wire = W;

    const INIT: SpiInit = {
        check_prescaler(PRESCALER);
        check_slave_select(N::DRIVES_NSS, R::MASTER);

        SpiInit {
            mode: R::BITS,
            direction: W::BITS,
            data_size: D::BITS,
            clk_polarity: PO::BITS,
            clk_phase: PH::BITS,
            nss: N::BITS,
            baud_rate_prescaler: PRESCALER as u32,
            first_bit: B::BITS,
            ti_mode: F::BITS,
            crc_calculation: C::CALCULATION,
            crc_polynomial: C::POLYNOMIAL,
        }
    };

    const MODE: embedded_hal::spi::Mode = embedded_hal::spi::Mode {
        polarity: PO::POLARITY,
        phase: PH::PHASE,
    };
}

impl<S, R, const PRESCALER: u16, F, B, D, W, N, PH, PO, C>
    Device<S, R, PRESCALER, F, B, D, W, N, PH, PO, C>
{
    /// A bus value for APIs that take one, such as `embedded_hal::spi::SpiBus`.
    ///
    /// The device still has to be initialized with [`SpiConfig::init`].
    pub const fn new() -> Self
    where
        Self: SpiConfig,
    {
        let _init = <Self as SpiConfig>::INIT;
        Device {
            _config: PhantomData,
        }
    }
}
