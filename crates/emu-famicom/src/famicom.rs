//! The system aggregate and its run loop.

use cpu_2a03::{Bus, Cpu, IllegalOpcode, Step};
use log::{debug, error, info};
use ppu_2c02::{ColorTable, PixelSink, Ppu};

use crate::bus::SystemBus;
use crate::cartridge::{Cartridge, RomError};
use crate::controller::InputSource;

/// A complete Famicom: CPU, PPU, bus, cartridge, controllers.
///
/// The aggregate is one owned value with exactly one writer at a time;
/// there is no locking because there is no concurrent access. A frame is
/// the only externally visible suspension point.
pub struct Famicom<V: PixelSink> {
    cpu: Cpu,
    bus: SystemBus<V>,
}

impl<V: PixelSink> Famicom<V> {
    /// Build a machine from an iNES image and a display surface, and
    /// run the reset sequence.
    ///
    /// # Errors
    ///
    /// Fatal cartridge load errors; see [`RomError`].
    pub fn new(rom: &[u8], video: V) -> Result<Self, RomError> {
        let cart = Cartridge::parse(rom)?;
        let mut bus = SystemBus::new(cart, video);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        info!("reset vector -> ${:04X}", cpu.regs.pc);
        Ok(Self { cpu, bus })
    }

    /// Run until the PPU signals frame completion (vblank entry).
    ///
    /// # Errors
    ///
    /// An [`IllegalOpcode`] halts the run loop; the machine state up to
    /// the fatal fetch is intact.
    pub fn run_frame(&mut self) -> Result<(), IllegalOpcode> {
        loop {
            self.step()?;
            if self.bus.ppu.take_frame() {
                return Ok(());
            }
        }
    }

    /// One instruction boundary: pending DMA, then pending NMI delivery,
    /// then one CPU step.
    ///
    /// # Errors
    ///
    /// See [`run_frame`](Self::run_frame).
    pub fn step(&mut self) -> Result<Step, IllegalOpcode> {
        if let Some(page) = self.bus.dma_page.take() {
            self.oam_dma(page);
        }
        if self.bus.nmi_pending {
            self.bus.nmi_pending = false;
            self.cpu.nmi();
        }
        let step = self.cpu.step(&mut self.bus);
        if let Err(e) = step {
            error!("{e}");
        }
        step
    }

    /// OAM page copy: 256 read/write cycle pairs plus one setup cycle,
    /// and one more alignment cycle when triggered on an odd CPU cycle.
    /// Every cycle goes through the normal bus tick so PPU timing keeps
    /// its phase through the stall.
    fn oam_dma(&mut self, page: u8) {
        let start = self.bus.cpu_cycles();
        if start % 2 == 1 {
            self.bus.tick();
        }
        self.bus.tick();

        let base = u16::from(page) << 8;
        for offset in 0..=0xFF {
            let value = self.bus.read(base | offset);
            self.bus.tick();
            self.bus.write(0x2004, value);
            self.bus.tick();
        }
        debug!(
            "OAM DMA from ${base:04X}, {} cycles",
            self.bus.cpu_cycles() - start
        );
    }

    /// Latch a button bitmask into controller 1.
    pub fn set_buttons(&mut self, mask: u8) {
        self.bus.controller1.set_buttons(mask);
    }

    /// Refresh controller 1 from an input source (typically once per
    /// frame, before [`run_frame`](Self::run_frame)).
    pub fn poll_input(&mut self, source: &mut dyn InputSource) {
        let mask = source.buttons();
        self.set_buttons(mask);
    }

    /// Swap in a different colour table.
    pub fn set_color_table(&mut self, colors: ColorTable) {
        self.bus.ppu.set_color_table(colors);
    }

    #[must_use]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    #[must_use]
    pub fn ppu(&self) -> &Ppu {
        &self.bus.ppu
    }

    /// CPU cycles since power-on.
    #[must_use]
    pub fn cpu_cycles(&self) -> u64 {
        self.bus.cpu_cycles()
    }

    /// PPU dots since power-on.
    #[must_use]
    pub fn ppu_dots(&self) -> u64 {
        self.bus.ppu_dots()
    }

    /// Completed frames.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.bus.ppu.frames()
    }

    /// Work-RAM read without bus side effects.
    #[must_use]
    pub fn peek_wram(&self, addr: u16) -> u8 {
        self.bus.peek_wram(addr)
    }

    #[must_use]
    pub fn video(&self) -> &V {
        &self.bus.video
    }

    pub fn video_mut(&mut self) -> &mut V {
        &mut self.bus.video
    }
}
