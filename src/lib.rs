//! Type-level configuration of GPIO pins and SPI buses on top of a vendor HAL.
//!
//! Every pin and bus is described by a type: which port or instance, which pins, which
//! electrical mode, which bus timing. The description is checked while the firmware is being
//! built, so an illegal configuration never makes it into a binary. At runtime the descriptors
//! do nothing but forward to the vendor routines bound through [`hal::GpioHal`] and
//! [`hal::SpiHal`].
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
//! #     fn read(_: usize, _: PinMask) -> PinState { PinState::Low }
//! #     fn write(_: usize, _: PinMask, _: PinState) {}
//! #     fn toggle(_: usize, _: PinMask) {}
//! #     fn lock(_: usize, _: PinMask) -> Status { Status::Ok }
//! # }
//! use typed_periph::gpio::{self, OutputPin, OutputPushPull, PortA};
//! use typed_periph::pins;
//!
//! type Led = OutputPin<gpio::Pin<PortA<Vendor>, pins![5], OutputPushPull>>;
//!
//! Led::init();
//! Led::set();
//! Led::toggle();
//! ```
#![cfg_attr(not(test), no_std)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![deny(unsafe_op_in_unsafe_fn)]

#[macro_use]
mod fmt;

pub mod bits;
pub mod gpio;
pub mod hal;
pub mod spi;

trait Sealed {}

macro_rules! impl_sealed {
    ($($t:ty),*) => {
        $(
            impl $crate::Sealed for $t {}
        )*
    };
}
pub(crate) use impl_sealed;
