use core::cell::{Cell, UnsafeCell};

use critical_section::Mutex;

use super::SpiName;
use crate::hal::{Error, SpiHandle};

static HANDLES: [HandleCell; SpiName::COUNT] = [
    HandleCell::new(SpiName::Spi1),
    HandleCell::new(SpiName::Spi2),
    HandleCell::new(SpiName::Spi3),
    HandleCell::new(SpiName::Spi4),
];

/// The handle of `instance`, shared by every device on that instance.
pub(crate) fn handle(instance: SpiName) -> &'static HandleCell {
    &HANDLES[instance.index()]
}

/// Storage for one vendor handle.
///
/// The handle is only reachable through a [`Claim`], and at most one claim exists at a time.
pub(crate) struct HandleCell {
    claimed: Mutex<Cell<bool>>,
    handle: UnsafeCell<SpiHandle>,
}

// Safety: The `UnsafeCell` is only accessed through a `Claim`, and `claim` hands out at most one
// of those at a time; the flag guarding it is only touched inside a critical section.
unsafe impl Sync for HandleCell {}

impl HandleCell {
    const fn new(instance: SpiName) -> Self {
        HandleCell {
            claimed: Mutex::new(Cell::new(false)),
            handle: UnsafeCell::new(SpiHandle::new(instance)),
        }
    }

    /// Take exclusive access to the handle until the claim is dropped.
    ///
    /// Fails with [`Error::Busy`] while another claim is alive, e.g. when an interrupt handler
    /// uses a bus that the code it interrupted is in the middle of.
    pub(crate) fn claim(&self) -> Result<Claim<'_>, Error> {
        let taken = critical_section::with(|cs| self.claimed.borrow(cs).replace(true));
        if taken {
            return Err(Error::Busy);
        }
        Ok(Claim { cell: self })
    }
}

pub(crate) struct Claim<'a> {
    cell: &'a HandleCell,
}

impl Claim<'_> {
    pub(crate) fn handle(&mut self) -> &mut SpiHandle {
        // Safety: This claim is the only one alive (see `HandleCell::claim`), and the returned
        // borrow cannot outlive it.
        unsafe { &mut *self.cell.handle.get() }
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        critical_section::with(|cs| self.cell.claimed.borrow(cs).set(false));
    }
}
