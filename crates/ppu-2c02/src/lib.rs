//! Dot-accurate Ricoh 2C02 PPU.
//!
//! One [`Ppu::tick`] is one dot. A scanline is 341 dots; a frame is 262
//! scanlines: 0–239 visible, 240 post-render idle, 241 the start of
//! vertical blank, 261 pre-render. On odd frames with rendering enabled
//! the pre-render line drops one dot.
//!
//! The PPU owns its nametable RAM, palette RAM, and OAM. Pattern-table
//! data and the nametable mirroring mode come from an injected [`ChrBus`]
//! (the cartridge); composited pixels leave through an injected
//! [`PixelSink`]. The CPU talks to the eight register ports through
//! [`Ppu::read_port`] / [`Ppu::write_port`].

mod bus;
mod palette;
mod ppu;
mod scroll;
mod sprites;

pub use bus::{ChrBus, Mirroring, PixelSink, Rgb};
pub use palette::{ColorTable, PaletteRam};
pub use ppu::{Ppu, DOTS_PER_SCANLINE, SCANLINES_PER_FRAME, VISIBLE_HEIGHT, VISIBLE_WIDTH};
pub use scroll::ScrollRegisters;
pub use sprites::{SpritePixel, SpriteUnit, MAX_SPRITES_PER_LINE};
