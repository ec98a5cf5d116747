use typed_periph::hal::{SpiHal, SpiHandle, SpiInit, Status};
use typed_periph::spi::{
    Crc, Device, EightBit, FirstEdge, HardOutput, IdleHigh, LsbFirst, Master, Motorola, MsbFirst,
    OneLine, SecondEdge, SixteenBit, Slave, SoftNss, Spi1, Spi2, Spi3, SpiConfig, SpiName, Ti,
    TwoLines, TwoLinesRxOnly,
};

struct Board;

impl SpiHal for Board {
    type Block = usize;

    fn instance(spi: SpiName) -> usize {
        0x4001_3000 + spi.index() * 0x400
    }
    fn enable_clock(_: SpiName) {}
    fn disable_clock(_: SpiName) {}
    fn init(_: usize, _: &mut SpiHandle) -> Status {
        Status::Ok
    }
    fn transmit(_: usize, _: &mut SpiHandle, _: &[u8], _: u32) -> Status {
        Status::Ok
    }
    fn receive(_: usize, _: &mut SpiHandle, _: &mut [u8], _: u32) -> Status {
        Status::Ok
    }
    fn transfer(_: usize, _: &mut SpiHandle, _: &[u8], _: &mut [u8], _: u32) -> Status {
        Status::Ok
    }
}

type Flash = Device<Spi1<Board>, Master, 2>;
type Radio = Device<
    Spi2<Board>,
    Master,
    256,
    Motorola,
    LsbFirst,
    SixteenBit,
    TwoLines,
    HardOutput,
    SecondEdge,
    IdleHigh,
    Crc<0x1021>,
>;
type Sniffer = Device<Spi3<Board>, Slave, 1, Ti, MsbFirst, EightBit, TwoLinesRxOnly>;
type Display =
    Device<Spi1<Board>, Master, 32, Motorola, MsbFirst, EightBit, OneLine, SoftNss, FirstEdge>;

const CONFIGS: [SpiInit; 4] = [Flash::INIT, Radio::INIT, Sniffer::INIT, Display::INIT];
const FLASH: Flash = Flash::new();

fn main() {
    let _ = FLASH;
    assert_eq!(CONFIGS[0].baud_rate_prescaler, 2);
    assert_eq!(CONFIGS[1].crc_polynomial, 0x1021);
    assert_eq!(CONFIGS[2].mode, 0);
    assert_eq!(CONFIGS[3].direction, 0x8000);
}
