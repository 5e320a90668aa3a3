//! CPU-side address decoding and the shared clock.

use cpu_2a03::Bus;
use ppu_2c02::{PixelSink, Ppu};

use crate::cartridge::Cartridge;
use crate::controller::Controller;

/// The fixed clock ratio: each CPU cycle advances the PPU three dots.
pub const PPU_DOTS_PER_CPU_CYCLE: u64 = 3;

/// The system bus: routes CPU reads/writes to work RAM, the PPU register
/// ports, the controller and DMA ports, the inert APU register file, or
/// the cartridge — and owns the clock. [`Bus::tick`] is the only place
/// PPU time advances; everything that accesses the bus (CPU and DMA
/// alike) goes through it, which is what keeps the two chips in phase.
pub struct SystemBus<V: PixelSink> {
    /// 2 KiB work RAM, mirrored through $1FFF.
    wram: [u8; 0x800],
    pub(crate) ppu: Ppu,
    pub(crate) cart: Cartridge,
    pub(crate) controller1: Controller,
    pub(crate) controller2: Controller,
    /// APU/I-O registers emulated as plain storage; audio is out of
    /// scope but games expect the bytes to hold.
    apu_io: [u8; 0x20],
    /// Page latched by a $4014 write, consumed by the DMA engine.
    pub(crate) dma_page: Option<u8>,
    /// NMI edge observed from the PPU during a tick, pending delivery to
    /// the CPU at the next instruction boundary.
    pub(crate) nmi_pending: bool,
    pub(crate) video: V,
    cpu_cycles: u64,
    ppu_dots: u64,
}

impl<V: PixelSink> SystemBus<V> {
    pub fn new(cart: Cartridge, video: V) -> Self {
        Self {
            wram: [0; 0x800],
            ppu: Ppu::new(),
            cart,
            controller1: Controller::new(),
            controller2: Controller::new(),
            apu_io: [0; 0x20],
            dma_page: None,
            nmi_pending: false,
            video,
            cpu_cycles: 0,
            ppu_dots: 0,
        }
    }

    /// CPU cycles ticked since power-on.
    #[must_use]
    pub fn cpu_cycles(&self) -> u64 {
        self.cpu_cycles
    }

    /// PPU dots ticked since power-on (always 3× the CPU count).
    #[must_use]
    pub fn ppu_dots(&self) -> u64 {
        self.ppu_dots
    }

    /// Work-RAM read without bus side effects, for diagnostics.
    #[must_use]
    pub fn peek_wram(&self, addr: u16) -> u8 {
        self.wram[(addr & 0x07FF) as usize]
    }
}

impl<V: PixelSink> Bus for SystemBus<V> {
    fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.wram[(addr & 0x07FF) as usize],
            // Eight PPU ports, mirrored every 8 bytes up to $3FFF.
            0x2000..=0x3FFF => self.ppu.read_port(addr & 0x07, &mut self.cart),
            0x4016 => self.controller1.read(),
            0x4017 => self.controller2.read(),
            0x4000..=0x401F => self.apu_io[(addr & 0x1F) as usize],
            0x4020..=0xFFFF => self.cart.prg_read(addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.wram[(addr & 0x07FF) as usize] = value,
            0x2000..=0x3FFF => self.ppu.write_port(addr & 0x07, value, &mut self.cart),
            // OAM DMA trigger: latched here, executed by the system loop
            // between instructions.
            0x4014 => self.dma_page = Some(value),
            0x4016 => {
                self.controller1.write(value);
                self.controller2.write(value);
            }
            0x4000..=0x401F => self.apu_io[(addr & 0x1F) as usize] = value,
            0x4020..=0xFFFF => self.cart.prg_write(addr, value),
        }
    }

    fn tick(&mut self) {
        self.cpu_cycles += 1;
        for _ in 0..PPU_DOTS_PER_CPU_CYCLE {
            self.ppu.tick(&mut self.cart, &mut self.video);
            self.ppu_dots += 1;
        }
        if self.ppu.take_nmi() {
            self.nmi_pending = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::Framebuffer;

    fn make_bus() -> SystemBus<Framebuffer> {
        let mut data = vec![0u8; 16 + 32 * 1024 + 8 * 1024];
        data[0..4].copy_from_slice(b"NES\x1a");
        data[4] = 2;
        data[5] = 1;
        let cart = Cartridge::parse(&data).unwrap();
        SystemBus::new(cart, Framebuffer::new())
    }

    #[test]
    fn wram_mirrors_every_2k() {
        let mut bus = make_bus();
        bus.write(0x0000, 0xAB);
        assert_eq!(bus.read(0x0800), 0xAB);
        assert_eq!(bus.read(0x1000), 0xAB);
        assert_eq!(bus.read(0x1800), 0xAB);
    }

    #[test]
    fn ppu_ports_mirror_every_8_bytes() {
        let mut bus = make_bus();
        // $2006/$2007 via the mirror at $3FF8.
        bus.write(0x3FFE, 0x20);
        bus.write(0x3FFE, 0x40);
        bus.write(0x3FFF, 0x5A);
        bus.write(0x2006, 0x20);
        bus.write(0x2006, 0x40);
        assert_eq!(bus.read(0x2007), 0x00); // buffered
        assert_eq!(bus.read(0x2007), 0x5A);
    }

    #[test]
    fn dma_port_latches_the_page() {
        let mut bus = make_bus();
        assert!(bus.dma_page.is_none());
        bus.write(0x4014, 0x07);
        assert_eq!(bus.dma_page, Some(0x07));
    }

    #[test]
    fn apu_registers_hold_their_bytes() {
        let mut bus = make_bus();
        bus.write(0x4000, 0x3F);
        bus.write(0x4015, 0x0F);
        assert_eq!(bus.read(0x4000), 0x3F);
        assert_eq!(bus.read(0x4015), 0x0F);
    }

    #[test]
    fn every_tick_moves_the_ppu_three_dots() {
        let mut bus = make_bus();
        for _ in 0..100 {
            bus.tick();
        }
        assert_eq!(bus.cpu_cycles(), 100);
        assert_eq!(bus.ppu_dots(), 300);
        assert_eq!(
            u64::from(bus.ppu.scanline()) * 341 + u64::from(bus.ppu.dot()),
            300
        );
    }
}
