use embedded_hal::spi::{ErrorType, SpiBus};

use super::{
    BitOrder, ClockPhase, ClockPolarity, CrcConfig, DataSize, Device, FrameFormat, Instance, Role,
    SlaveSelect, SpiConfig, TwoLines,
};
use crate::hal::{Error, Timeout, MAX_FRAMES};

// Words per HAL call in `transfer_in_place`.
const CHUNK: usize = 32;

impl<S, R, const PRESCALER: u16, F, B, D, W, N, PH, PO, C> ErrorType
    for Device<S, R, PRESCALER, F, B, D, W, N, PH, PO, C>
{
    type Error = Error;
}

/// Full-duplex devices are `embedded-hal` buses. Every call blocks without a timeout.
impl<S, R, const PRESCALER: u16, F, B, D, N, PH, PO, C> SpiBus<D::Word>
    for Device<S, R, PRESCALER, F, B, D, TwoLines, N, PH, PO, C>
where
    S: Instance,
    R: Role,
    F: FrameFormat,
    B: BitOrder,
    D: DataSize,
    N: SlaveSelect,
    PH: ClockPhase,
    PO: ClockPolarity,
    C: CrcConfig,
{
    fn read(&mut self, words: &mut [D::Word]) -> Result<(), Self::Error> {
        for chunk in words.chunks_mut(MAX_FRAMES) {
            <Self as SpiConfig>::receive(chunk, Timeout::Forever)?;
        }
        Ok(())
    }

    fn write(&mut self, words: &[D::Word]) -> Result<(), Self::Error> {
        for chunk in words.chunks(MAX_FRAMES) {
            <Self as SpiConfig>::transmit(chunk, Timeout::Forever)?;
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [D::Word], write: &[D::Word]) -> Result<(), Self::Error> {
        let common = read.len().min(write.len());
        let (read, read_rest) = read.split_at_mut(common);
        let (write, write_rest) = write.split_at(common);

        for (read, write) in read.chunks_mut(MAX_FRAMES).zip(write.chunks(MAX_FRAMES)) {
            <Self as SpiConfig>::transfer(write, read, Timeout::Forever)?;
        }
        self.write(write_rest)?;
        self.read(read_rest)
    }

    fn transfer_in_place(&mut self, words: &mut [D::Word]) -> Result<(), Self::Error> {
        let mut buffer = [D::Word::default(); CHUNK];
        for chunk in words.chunks_mut(CHUNK) {
            let tx = &mut buffer[..chunk.len()];
            tx.copy_from_slice(chunk);
            <Self as SpiConfig>::transfer(tx, chunk, Timeout::Forever)?;
        }
        Ok(())
    }

    // The vendor routines return once the transfer is complete.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
