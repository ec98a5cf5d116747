use typed_periph::gpio::{
    InputMode, InputPin, InterruptRising, Medium, OutputOpenDrain, OutputPin, OutputPushPull, Pin,
    PinConfig, PortA, PortB, PortC, PortName, PullDown, PullUp,
};
use typed_periph::hal::{GpioHal, GpioInit, PinMask, PinState, Status};
use typed_periph::pins;

struct Board;

impl GpioHal for Board {
    type Block = usize;

    fn port(port: PortName) -> usize {
        0x4001_0800 + port.index() * 0x400
    }
    fn enable_clock(_: PortName) {}
    fn disable_clock(_: PortName) {}
    fn init(_: usize, _: &GpioInit) {}
    fn deinit(_: usize, _: PinMask) {}
    fn read(_: usize, _: PinMask) -> PinState {
        PinState::Low
    }
    fn write(_: usize, _: PinMask, _: PinState) {}
    fn toggle(_: usize, _: PinMask) {}
    fn lock(_: usize, _: PinMask) -> Status {
        Status::Ok
    }
}

type Led = OutputPin<Pin<PortA<Board>, pins![5], OutputPushPull>>;
type Relays = OutputPin<Pin<PortB<Board>, pins![0, 1, 2], OutputOpenDrain, PullUp, Medium>>;
type Button = InputPin<Pin<PortC<Board>, pins![13], InputMode, PullUp>>;
type Wakeup = Pin<PortA<Board>, pins![0], InterruptRising, PullDown>;

const LED: Led = Led::new();

fn main() {
    let _ = LED;
    Led::init();
    Relays::init();
    Button::init();
    Wakeup::init();
    Wakeup::lock().unwrap();

    for _ in 0..3 {
        if !Button::read() {
            Led::toggle();
            Relays::set();
        } else {
            Relays::reset();
        }
    }
}
