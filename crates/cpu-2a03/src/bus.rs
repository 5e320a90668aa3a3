//! The CPU's window onto the rest of the system.

/// Memory bus and clock line, injected into every [`crate::Cpu`] call.
///
/// The capability set is deliberately minimal: byte reads, byte writes,
/// and the clock tick. The CPU core promises to call `tick` exactly once
/// per bus access (the core itself bundles the pairing); implementations
/// use `tick` to advance everything else that shares the clock — on the
/// NES, three PPU dots per CPU cycle.
pub trait Bus {
    /// Read a byte from the 16-bit CPU address space.
    fn read(&mut self, addr: u16) -> u8;

    /// Write a byte to the 16-bit CPU address space.
    fn write(&mut self, addr: u16, value: u8);

    /// Advance the shared clock by one CPU cycle.
    fn tick(&mut self);
}
