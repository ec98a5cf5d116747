//! GPIO ports, pin descriptors and the input/output wrappers over them.
//!
//! A pin is configured entirely through its type:
//!
//! ```
//! # use typed_periph::hal::{GpioHal, GpioInit, PinMask, PinState, Status};
//! # use typed_periph::gpio::PortName;
//! # struct Vendor;
//! # impl GpioHal for Vendor {
//! #     type Block = usize;
//! #     fn port(port: PortName) -> usize { port.index() }
//! #     fn enable_clock(_: PortName) {}
//! #     fn disable_clock(_: PortName) {}
//! #     fn init(_: usize, _: &GpioInit) {}
//! #     fn deinit(_: usize, _: PinMask) {}
//! #     fn read(_: usize, _: PinMask) -> PinState { PinState::High }
//! #     fn write(_: usize, _: PinMask, _: PinState) {}
//! #     fn toggle(_: usize, _: PinMask) {}
//! #     fn lock(_: usize, _: PinMask) -> Status { Status::Ok }
//! # }
//! use typed_periph::gpio::{InputMode, InputPin, Pin, PortC, PullUp};
//! use typed_periph::pins;
//!
//! type Button = InputPin<Pin<PortC<Vendor>, pins![13], InputMode, PullUp>>;
//!
//! Button::init();
//! assert!(Button::read());
//! ```
//!
//! Claiming the wrong role for a pin fails the build:
//!
//! ```compile_fail,E0080
//! # use typed_periph::hal::{GpioHal, GpioInit, PinMask, PinState, Status};
//! # use typed_periph::gpio::PortName;
//! # struct Vendor;
//! # impl GpioHal for Vendor {
//! #     type Block = usize;
//! #     fn port(port: PortName) -> usize { port.index() }
//! #     fn enable_clock(_: PortName) {}
//! #     fn disable_clock(_: PortName) {}
//! #     fn init(_: usize, _: &GpioInit) {}
//! #     fn deinit(_: usize, _: PinMask) {}
//! #     fn read(_: usize, _: PinMask) -> PinState { PinState::High }
//! #     fn write(_: usize, _: PinMask, _: PinState) {}
//! #     fn toggle(_: usize, _: PinMask) {}
//! #     fn lock(_: usize, _: PinMask) -> Status { Status::Ok }
//! # }
//! use typed_periph::gpio::{InputMode, OutputPin, Pin, PortA};
//! use typed_periph::pins;
//!
//! const WRONG: OutputPin<Pin<PortA<Vendor>, pins![5], InputMode>> = OutputPin::new();
//! ```
//!
//! ```compile_fail,E0080
//! # use typed_periph::hal::{GpioHal, GpioInit, PinMask, PinState, Status};
//! # use typed_periph::gpio::PortName;
//! # struct Vendor;
//! # impl GpioHal for Vendor {
//! #     type Block = usize;
//! #     fn port(port: PortName) -> usize { port.index() }
//! #     fn enable_clock(_: PortName) {}
//! #     fn disable_clock(_: PortName) {}
//! #     fn init(_: usize, _: &GpioInit) {}
//! #     fn deinit(_: usize, _: PinMask) {}
//! #     fn read(_: usize, _: PinMask) -> PinState { PinState::High }
//! #     fn write(_: usize, _: PinMask, _: PinState) {}
//! #     fn toggle(_: usize, _: PinMask) {}
//! #     fn lock(_: usize, _: PinMask) -> Status { Status::Ok }
//! # }
//! use typed_periph::gpio::{InputPin, OutputPushPull, Pin, PortA};
//! use typed_periph::pins;
//!
//! const WRONG: InputPin<Pin<PortA<Vendor>, pins![5], OutputPushPull>> = InputPin::new();
//! ```
//!
//! So does a pin outside 0-15:
//!
//! ```compile_fail,E0080
//! # use typed_periph::hal::{GpioHal, GpioInit, PinMask, PinState, Status};
//! # use typed_periph::gpio::PortName;
//! # struct Vendor;
//! # impl GpioHal for Vendor {
//! #     type Block = usize;
//! #     fn port(port: PortName) -> usize { port.index() }
//! #     fn enable_clock(_: PortName) {}
//! #     fn disable_clock(_: PortName) {}
//! #     fn init(_: usize, _: &GpioInit) {}
//! #     fn deinit(_: usize, _: PinMask) {}
//! #     fn read(_: usize, _: PinMask) -> PinState { PinState::High }
//! #     fn write(_: usize, _: PinMask, _: PinState) {}
//! #     fn toggle(_: usize, _: PinMask) {}
//! #     fn lock(_: usize, _: PinMask) -> Status { Status::Ok }
//! # }
//! use typed_periph::gpio::{OutputPushPull, Pin, PinConfig, PortA};
//! use typed_periph::pins;
//!
//! const INIT: typed_periph::hal::GpioInit =
//!     <Pin<PortA<Vendor>, pins![16], OutputPushPull> as PinConfig>::INIT;
//! ```
//!
//! Pin configurations only come from [`Pin`]:
//!
//! ```compile_fail
//! use typed_periph::gpio::{PinConfig, PortA};
//! use typed_periph::hal::{GpioHal, PinMask};
//!
//! struct Handmade<H>(H);
//!
//! impl<H: GpioHal> PinConfig for Handmade<H> {
//!     type Port = PortA<H>;
//!     const PINS: PinMask = PinMask::empty();
//!     const MODE: u32 = 0xFF;
//!     const PULL: u32 = 0;
//!     const SPEED: u32 = 0;
//! }
//! ```

use core::{convert::Infallible, marker::PhantomData};

use crate::{
    hal::{Error, GpioHal, GpioInit, PinMask, PinState},
    Sealed,
};

pub mod mode;
pub mod state;

pub use mode::*;
pub use state::*;

/// The physical GPIO ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortName {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl PortName {
    pub const fn from_char(id: char) -> Self {
        match id {
            'A' => PortName::A,
            'B' => PortName::B,
            'C' => PortName::C,
            'D' => PortName::D,
            'E' => PortName::E,
            'F' => PortName::F,
            'G' => PortName::G,
            _ => panic!("no such GPIO port, only ports A-G are valid"),
        }
    }

    /// Zero-based port number, `A` is 0.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A GPIO port, resolved at compile time.
#[allow(private_bounds)]
pub trait PortId: Sealed {
    type Hal: GpioHal;
    const NAME: PortName;

    /// Register block of the port.
    fn get() -> <Self::Hal as GpioHal>::Block {
        <Self::Hal as GpioHal>::port(Self::NAME)
    }

    fn enable_clock() {
        <Self::Hal as GpioHal>::enable_clock(Self::NAME)
    }

    fn disable_clock() {
        <Self::Hal as GpioHal>::disable_clock(Self::NAME)
    }
}

/// Port `ID` as driven by the HAL `H`.
pub struct Port<H, const ID: char> {
    _hal: PhantomData<H>,
}

impl<H, const ID: char> Sealed for Port<H, ID> {}

impl<H: GpioHal, const ID: char> PortId for Port<H, ID> {
    type Hal = H;
    const NAME: PortName = PortName::from_char(ID);
}

pub type PortA<H> = Port<H, 'A'>;
pub type PortB<H> = Port<H, 'B'>;
pub type PortC<H> = Port<H, 'C'>;
pub type PortD<H> = Port<H, 'D'>;
pub type PortE<H> = Port<H, 'E'>;
pub type PortF<H> = Port<H, 'F'>;
pub type PortG<H> = Port<H, 'G'>;

/// The pins of a port a descriptor drives, as a bit mask.
///
/// Usually written with [`pins!`](crate::pins).
pub struct Pins<const MASK: u32>;

/// All 16 pins of a port.
pub type AllPins = Pins<0xFFFF>;

#[allow(private_bounds)]
pub trait PinSelect: Sealed {
    const MASK: PinMask;
}

impl<const MASK: u32> Sealed for Pins<MASK> {}

impl<const MASK: u32> PinSelect for Pins<MASK> {
    const MASK: PinMask = pin_mask(MASK);
}

const fn pin_mask(mask: u32) -> PinMask {
    assert!(mask != 0, "at least one pin must be selected");
    assert!(mask <= 0xFFFF, "pins must be chosen from 0-15");
    PinMask::from_bits_retain(mask as u16)
}

const fn check_input(mode: u32) {
    assert!(mode == InputMode::BITS, "pin must be configured as an input");
}

const fn check_output(mode: u32) {
    assert!(
        mode == OutputPushPull::BITS || mode == OutputOpenDrain::BITS,
        "pin must be configured as an output"
    );
}

/// A [`Pins`] selection from pin numbers.
///
/// ```
/// use typed_periph::gpio::PinSelect;
/// use typed_periph::hal::PinMask;
///
/// assert_eq!(<typed_periph::pins![0, 9]>::MASK, PinMask::PIN_0 | PinMask::PIN_9);
/// ```
#[macro_export]
macro_rules! pins {
    ($($index:expr),+ $(,)?) => {
        $crate::gpio::Pins<{ $crate::bits::index_disjunction(&[$($index),+]) }>
    };
}

type PortHal<P> = <<P as PinConfig>::Port as PortId>::Hal;

/// The full configuration of a set of pins on one port.
///
/// Implemented by [`Pin`]. Every method forwards straight to the vendor HAL; evaluating
/// [`PinConfig::INIT`] is what validates the configuration.
#[allow(private_bounds)]
pub trait PinConfig: Sealed + Sized {
    type Port: PortId;
    const PINS: PinMask;
    const MODE: u32;
    const PULL: u32;
    const SPEED: u32;

    /// What `init` hands to the vendor HAL.
    const INIT: GpioInit = GpioInit {
        pin: Self::PINS,
        mode: Self::MODE,
        pull: Self::PULL,
        speed: Self::SPEED,
    };

    /// Enable the port clock and program the pins.
    fn init() {
        let init = Self::INIT;
        let port = <Self::Port as PortId>::NAME;
        trace!("gpio {}: init {} mode {=u32:#x}", port, init.pin, init.mode);
        <Self::Port as PortId>::enable_clock();
        <PortHal<Self> as GpioHal>::init(<Self::Port as PortId>::get(), &init);
    }

    /// Return the pins to their reset configuration.
    fn deinit() {
        trace!("gpio {}: deinit {}", <Self::Port as PortId>::NAME, Self::PINS);
        <PortHal<Self> as GpioHal>::deinit(<Self::Port as PortId>::get(), Self::PINS);
    }

    /// Freeze the pin configuration until the next reset.
    fn lock() -> Result<(), Error> {
        let status = <PortHal<Self> as GpioHal>::lock(<Self::Port as PortId>::get(), Self::PINS);
        let result = status.into_result();
        if let Err(err) = result {
            warn!("gpio {}: lock {} failed: {}", <Self::Port as PortId>::NAME, Self::PINS, err);
        }
        result
    }

    fn read() -> PinState {
        <PortHal<Self> as GpioHal>::read(<Self::Port as PortId>::get(), Self::PINS)
    }

    fn write(state: PinState) {
        <PortHal<Self> as GpioHal>::write(<Self::Port as PortId>::get(), Self::PINS, state)
    }

    fn toggle() {
        <PortHal<Self> as GpioHal>::toggle(<Self::Port as PortId>::get(), Self::PINS)
    }
}

/// Pins `PINS` of `PORT` in mode `MODE`.
pub struct Pin<PORT, PINS, MODE, PULL = NoPull, SPEED = Low> {
    _config: PhantomData<(PORT, PINS, MODE, PULL, SPEED)>,
}

impl<PORT, PINS, MODE, PULL, SPEED> Sealed for Pin<PORT, PINS, MODE, PULL, SPEED> {}

impl<PORT, PINS, MODE, PULL, SPEED> PinConfig for Pin<PORT, PINS, MODE, PULL, SPEED>
where
    PORT: PortId,
    PINS: PinSelect,
    MODE: PinMode,
    PULL: Pull,
    SPEED: Speed,
{
    type Port = PORT;
    const PINS: PinMask = PINS::MASK;
    const MODE: u32 = MODE::BITS;
    const PULL: u32 = PULL::BITS;
    const SPEED: u32 = SPEED::BITS;
}

/// A pin that may only be read. `P` must be configured with [`InputMode`].
pub struct InputPin<P> {
    _pin: PhantomData<P>,
}

impl<P: PinConfig> InputPin<P> {
    const ROLE: () = check_input(P::MODE);

    pub const fn new() -> Self {
        let () = Self::ROLE;
        InputPin { _pin: PhantomData }
    }

    pub fn init() {
        let () = Self::ROLE;
        P::init();
    }

    /// Returns `true` if the pin is set (high).
    pub fn read() -> bool {
        let () = Self::ROLE;
        P::read() == PinState::High
    }
}

impl<P: PinConfig> Default for InputPin<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PinConfig> embedded_hal::digital::ErrorType for InputPin<P> {
    type Error = Infallible;
}

impl<P: PinConfig> embedded_hal::digital::InputPin for InputPin<P> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(Self::read())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!Self::read())
    }
}

/// A pin that may only be driven. `P` must be configured with [`OutputPushPull`] or
/// [`OutputOpenDrain`].
pub struct OutputPin<P> {
    _pin: PhantomData<P>,
}

impl<P: PinConfig> OutputPin<P> {
    const ROLE: () = check_output(P::MODE);

    pub const fn new() -> Self {
        let () = Self::ROLE;
        OutputPin { _pin: PhantomData }
    }

    pub fn init() {
        let () = Self::ROLE;
        P::init();
    }

    /// Set the pin high.
    pub fn set() {
        let () = Self::ROLE;
        P::write(PinState::High);
    }

    /// Set the pin low.
    pub fn reset() {
        let () = Self::ROLE;
        P::write(PinState::Low);
    }

    pub fn toggle() {
        let () = Self::ROLE;
        P::toggle();
    }
}

impl<P: PinConfig> Default for OutputPin<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PinConfig> embedded_hal::digital::ErrorType for OutputPin<P> {
    type Error = Infallible;
}

impl<P: PinConfig> embedded_hal::digital::OutputPin for OutputPin<P> {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Self::set();
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Self::reset();
        Ok(())
    }
}
