//! Cycle-accurate NES/Famicom emulator.
//!
//! The CPU ([`cpu_2a03`]) and PPU ([`ppu_2c02`]) are independently
//! clocked state machines; their relative phase is everything. The
//! [`SystemBus`] is the single clock path: every CPU bus access ticks it
//! once, and each tick advances the PPU exactly three dots. Nothing else
//! moves time forward — not the frame loop, not DMA, not the frontend —
//! so the interleaving of the two machines is deterministic.
//!
//! [`Famicom`] owns the aggregate and runs it a frame at a time.

mod bus;
pub mod cartridge;
pub mod controller;
mod famicom;
mod video;

pub use bus::{SystemBus, PPU_DOTS_PER_CPU_CYCLE};
pub use cartridge::{Cartridge, RomError};
pub use controller::{button, Controller, InputSource};
pub use famicom::Famicom;
pub use video::Framebuffer;
