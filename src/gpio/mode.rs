//! Pin mode facets and the composite modes built from them.
//!
//! A mode is a tuple of facets, at most one per axis, merged into the vendor `GPIO_MODE_*`
//! encoding:
//!
//! ```
//! use typed_periph::gpio::{Mode, OpenDrain, Output, OutputOpenDrain};
//!
//! assert_eq!(Mode::<(Output, OpenDrain)>::BITS, 0x11);
//! assert_eq!(Mode::<(OpenDrain, Output)>::BITS, OutputOpenDrain::BITS);
//! ```
//!
//! Illegal combinations fail the build:
//!
//! ```compile_fail,E0080
//! use typed_periph::gpio::{Input, Mode, PushPull};
//!
//! const BITS: u32 = Mode::<(Input, PushPull)>::BITS;
//! ```
//!
//! ```compile_fail,E0080
//! use typed_periph::gpio::{Input, Mode, Output};
//!
//! const BITS: u32 = Mode::<(Input, Output)>::BITS;
//! ```
//!
//! A mode with no facets at all does not exist:
//!
//! ```compile_fail
//! use typed_periph::gpio::Mode;
//!
//! const BITS: u32 = Mode::<()>::BITS;
//! ```

use core::marker::PhantomData;

use crate::{bits, impl_sealed, Sealed};

/// The configuration axis a facet belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Axis {
    Direction = 1,
    Drive = 1 << 1,
    Exti = 1 << 2,
    Trigger = 1 << 3,
}

/// One value on one axis.
#[allow(private_bounds)]
pub trait Facet: Sealed {
    const AXIS: Axis;
    const BITS: u32;
}

// Direction
pub struct Input;
pub struct Output;
pub struct Alternate;
pub struct Analog;

// Output drive
pub struct PushPull;
pub struct OpenDrain;

// External line selection
pub struct ExtInterrupt;
pub struct ExtEvent;

// Trigger edge
pub struct RisingEdge;
pub struct FallingEdge;
pub struct BothEdges;

impl_sealed!(
    Input,
    Output,
    Alternate,
    Analog,
    PushPull,
    OpenDrain,
    ExtInterrupt,
    ExtEvent,
    RisingEdge,
    FallingEdge,
    BothEdges
);

// Marks the vendor EXTI modes apart from plain pin modes.
const EXTI_MODE: u32 = 0x1000_0000;

macro_rules! facets {
    ($($axis:ident { $($facet:ty = $bits:expr),* $(,)? })*) => {
        $($(
            impl Facet for $facet {
                const AXIS: Axis = Axis::$axis;
                const BITS: u32 = $bits;
            }
        )*)*
    };
}

facets! {
    Direction {
        Input = 0x0,
        Output = 0x1,
        Alternate = 0x2,
        Analog = 0x3,
    }
    Drive {
        PushPull = 0x00,
        OpenDrain = 0x10,
    }
    Exti {
        ExtInterrupt = EXTI_MODE | 0x0001_0000,
        ExtEvent = EXTI_MODE | 0x0002_0000,
    }
    Trigger {
        RisingEdge = 0x0010_0000,
        FallingEdge = 0x0020_0000,
        BothEdges = 0x0030_0000,
    }
}

/// A non-empty tuple of facets.
#[allow(private_bounds)]
pub trait FacetSet: Sealed {
    /// Merged encodings.
    const BITS: u32;
    /// OR of the [`Axis`] bits. Repeating an axis fails the build.
    const AXES: u8;
    /// Encoding of the direction facet, if the set has one.
    const DIRECTION: Option<u32>;
}

const fn axes(list: &[Axis]) -> u8 {
    let mut axes = 0;
    let mut i = 0;
    while i < list.len() {
        let axis = list[i] as u8;
        assert!(axes & axis == 0, "a facet axis is given twice");
        axes |= axis;
        i += 1;
    }
    axes
}

const fn direction(list: &[(Axis, u32)]) -> Option<u32> {
    let mut i = 0;
    while i < list.len() {
        if let (Axis::Direction, bits) = list[i] {
            return Some(bits);
        }
        i += 1;
    }
    None
}

macro_rules! facet_set {
    ($($f:ident),+) => {
        impl<$($f: Facet),+> Sealed for ($($f,)+) {}

        impl<$($f: Facet),+> FacetSet for ($($f,)+) {
            const BITS: u32 = bits::merge(&[$($f::BITS),+]);
            const AXES: u8 = axes(&[$($f::AXIS),+]);
            const DIRECTION: Option<u32> = direction(&[$(($f::AXIS, $f::BITS)),+]);
        }
    };
}

facet_set!(A);
facet_set!(A, B);
facet_set!(A, B, C);
facet_set!(A, B, C, D);

/// A composite pin mode.
pub struct Mode<F> {
    _facets: PhantomData<F>,
}

impl<F: FacetSet> Mode<F> {
    /// The packed vendor encoding. Evaluating it checks the facet combination.
    pub const BITS: u32 = {
        check_combination(F::AXES, F::DIRECTION);
        F::BITS
    };
}

const fn check_combination(axes: u8, direction: Option<u32>) {
    let Some(direction) = direction else {
        panic!("a mode needs exactly one direction");
    };
    let drives = axes & Axis::Drive as u8 != 0;
    let exti = axes & Axis::Exti as u8 != 0;
    let trigger = axes & Axis::Trigger as u8 != 0;

    assert!(
        !drives || direction == Output::BITS || direction == Alternate::BITS,
        "only output and alternate function pins have a drive type"
    );
    assert!(
        !exti || direction == Input::BITS,
        "external interrupts and events need an input pin"
    );
    assert!(exti == trigger, "external interrupts and events need a trigger edge");
}

/// Something [`Pin`](super::Pin) accepts as its mode.
#[allow(private_bounds)]
pub trait PinMode: Sealed {
    const BITS: u32;
}

impl<F: FacetSet> Sealed for Mode<F> {}

impl<F: FacetSet> PinMode for Mode<F> {
    const BITS: u32 = Mode::<F>::BITS;
}

pub type InputMode = Mode<(Input,)>;
pub type OutputPushPull = Mode<(Output, PushPull)>;
pub type OutputOpenDrain = Mode<(Output, OpenDrain)>;
pub type AlternatePushPull = Mode<(Alternate, PushPull)>;
pub type AlternateOpenDrain = Mode<(Alternate, OpenDrain)>;
pub type AlternateInput = InputMode;
pub type AnalogMode = Mode<(Analog,)>;
pub type InterruptRising = Mode<(Input, ExtInterrupt, RisingEdge)>;
pub type InterruptFalling = Mode<(Input, ExtInterrupt, FallingEdge)>;
pub type InterruptBothEdges = Mode<(Input, ExtInterrupt, BothEdges)>;
pub type EventRising = Mode<(Input, ExtEvent, RisingEdge)>;
pub type EventFalling = Mode<(Input, ExtEvent, FallingEdge)>;
pub type EventBothEdges = Mode<(Input, ExtEvent, BothEdges)>;
