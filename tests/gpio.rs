mod common;

use common::{calls, session, state, Call, Mock};
use typed_periph::{
    gpio::{
        AllPins, AnalogMode, High, InputMode, InputPin, InterruptFalling, OutputOpenDrain,
        OutputPin, OutputPushPull, Pin, PinConfig, PortA, PortB, PortC, PortG, PortId, PortName,
        PullDown, PullUp,
    },
    hal::{Error, GpioInit, PinMask, PinState, Status},
    pins,
};

type Led = OutputPin<Pin<PortA<Mock>, pins![5], OutputPushPull>>;
type Button = InputPin<Pin<PortC<Mock>, pins![13], InputMode, PullUp>>;
type Bus = Pin<PortB<Mock>, pins![6, 7], OutputOpenDrain, PullUp, High>;

#[test]
fn port_clock_and_register_block() {
    let _session = session();

    assert_eq!(<PortA<Mock> as PortId>::get(), PortName::A);
    assert_eq!(<PortG<Mock> as PortId>::get(), PortName::G);
    <PortA<Mock> as PortId>::enable_clock();
    <PortA<Mock> as PortId>::disable_clock();
    <PortC<Mock> as PortId>::disable_clock();

    assert_eq!(
        calls(),
        [
            Call::GpioClock(PortName::A, true),
            Call::GpioClock(PortName::A, false),
            Call::GpioClock(PortName::C, false),
        ]
    );
}

#[test]
fn led_init_programs_the_vendor_struct() {
    let _session = session();

    Led::init();

    assert_eq!(
        calls(),
        [
            Call::GpioClock(PortName::A, true),
            Call::GpioInit(
                PortName::A,
                GpioInit {
                    pin: PinMask::PIN_5,
                    mode: 0x1,
                    pull: 0x0,
                    speed: 0x2,
                }
            ),
        ]
    );
}

#[test]
fn led_set_and_toggle() {
    let _session = session();
    type Raw = Pin<PortA<Mock>, pins![5], OutputPushPull>;

    Led::init();
    Led::set();
    assert_eq!(Raw::read(), PinState::High);
    Led::toggle();
    assert_eq!(Raw::read(), PinState::Low);
    Led::toggle();
    Led::reset();
    assert_eq!(Raw::read(), PinState::Low);

    // Only pin 5 of port A was ever touched.
    assert_eq!(state().levels, [0; 7]);
    Led::set();
    assert_eq!(state().levels[0], 1 << 5);
}

#[test]
fn multi_pin_descriptor_covers_every_pin() {
    let _session = session();

    Bus::init();
    assert_eq!(
        calls()[1],
        Call::GpioInit(
            PortName::B,
            GpioInit {
                pin: PinMask::PIN_6 | PinMask::PIN_7,
                mode: 0x11,
                pull: 0x1,
                speed: 0x3,
            }
        )
    );

    Bus::write(PinState::High);
    assert_eq!(state().levels[1], 0b1100_0000);
}

#[test]
fn deinit_and_lock_pass_through() {
    let _session = session();

    Bus::deinit();
    assert_eq!(Bus::lock(), Ok(()));
    assert_eq!(
        calls(),
        [
            Call::GpioDeinit(PortName::B, PinMask::PIN_6 | PinMask::PIN_7),
            Call::GpioLock(PortName::B, PinMask::PIN_6 | PinMask::PIN_7),
        ]
    );

    state().lock_status = Status::Error;
    assert_eq!(Bus::lock(), Err(Error::Fault));
}

#[test]
fn input_pin_reads_the_port() {
    let _session = session();

    Button::init();
    assert_eq!(
        calls()[1],
        Call::GpioInit(
            PortName::C,
            GpioInit {
                pin: PinMask::PIN_13,
                mode: 0x0,
                pull: 0x1,
                speed: 0x2,
            }
        )
    );

    assert!(!Button::read());
    state().levels[2] = 1 << 13;
    assert!(Button::read());
    state().levels[2] = !(1 << 13);
    assert!(!Button::read());
}

#[test]
fn other_modes_reach_the_vendor_unchanged() {
    assert_eq!(
        <Pin<PortA<Mock>, pins![0], InterruptFalling, PullDown> as PinConfig>::INIT,
        GpioInit {
            pin: PinMask::PIN_0,
            mode: 0x1021_0000,
            pull: 0x2,
            speed: 0x2,
        }
    );
    assert_eq!(<Pin<PortA<Mock>, AllPins, AnalogMode> as PinConfig>::INIT.mode, 0x3);
    assert_eq!(<Pin<PortA<Mock>, AllPins, AnalogMode> as PinConfig>::PINS, PinMask::all());
}

#[test]
fn embedded_hal_traits() {
    use embedded_hal::digital::{InputPin as _, OutputPin as _};

    let _session = session();

    let mut led = Led::new();
    led.set_high().unwrap();
    assert_eq!(state().levels[0], 1 << 5);
    led.set_state(PinState::Low).unwrap();
    assert_eq!(state().levels[0], 0);

    let mut button = Button::default();
    assert!(button.is_low().unwrap());
    state().levels[2] = 1 << 13;
    assert!(button.is_high().unwrap());
}
