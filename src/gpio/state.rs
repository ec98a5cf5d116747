use crate::{impl_sealed, Sealed};

/// The pull resistor of a pin.
#[allow(private_bounds)]
pub trait Pull: Sealed {
    /// Vendor `GPIO_NOPULL` / `GPIO_PULLUP` / `GPIO_PULLDOWN`.
    const BITS: u32;
}

/// Output slew rate, the vendor `GPIO_SPEED_FREQ_*` value.
#[allow(private_bounds)]
pub trait Speed: Sealed {
    const BITS: u32;
}

/// Pin is left floating.
pub struct NoPull;
/// Pin is pulled up.
pub struct PullUp;
/// Pin is pulled down.
pub struct PullDown;

/// 2 MHz.
pub struct Low;
/// 10 MHz.
pub struct Medium;
/// 50 MHz.
pub struct High;

impl_sealed!(NoPull, PullUp, PullDown, Low, Medium, High);

impl Pull for NoPull {
    const BITS: u32 = 0x0;
}
impl Pull for PullUp {
    const BITS: u32 = 0x1;
}
impl Pull for PullDown {
    const BITS: u32 = 0x2;
}

impl Speed for Low {
    const BITS: u32 = 0x2;
}
impl Speed for Medium {
    const BITS: u32 = 0x1;
}
impl Speed for High {
    const BITS: u32 = 0x3;
}
