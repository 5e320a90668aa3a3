//! Whole-machine tests over minimal in-memory mapper-0 images.

use emu_famicom::{button, Famicom, Framebuffer};

const PRG_SIZE: usize = 32 * 1024;
const CHR_SIZE: usize = 8 * 1024;

/// Build a 32K NROM image: `code` at $8000, optional NMI handler at
/// $9000, reset vector to $8000.
fn build_rom(code: &[u8], nmi_handler: Option<&[u8]>) -> Vec<u8> {
    let mut rom = vec![0u8; 16 + PRG_SIZE + CHR_SIZE];
    rom[0..4].copy_from_slice(b"NES\x1a");
    rom[4] = 2; // 2 x 16K PRG
    rom[5] = 1; // 1 x 8K CHR
    rom[16..16 + code.len()].copy_from_slice(code);

    let mut nmi_target: [u8; 2] = [0x00, 0x80];
    if let Some(handler) = nmi_handler {
        rom[16 + 0x1000..16 + 0x1000 + handler.len()].copy_from_slice(handler);
        nmi_target = [0x00, 0x90];
    }
    rom[16 + 0x7FFA..16 + 0x7FFC].copy_from_slice(&nmi_target);
    rom[16 + 0x7FFC] = 0x00; // reset -> $8000
    rom[16 + 0x7FFD] = 0x80;
    rom[16 + 0x7FFE] = 0x00; // IRQ/BRK -> $8000, unused here
    rom[16 + 0x7FFF] = 0x80;
    rom
}

fn famicom(code: &[u8]) -> Famicom<Framebuffer> {
    Famicom::new(&build_rom(code, None), Framebuffer::new()).expect("valid test image")
}

#[test]
fn store_loop_lands_in_work_ram_within_a_frame() {
    // LDA #$42 / STA $00 / JMP $8002
    let mut fam = famicom(&[0xA9, 0x42, 0x85, 0x00, 0x4C, 0x02, 0x80]);
    fam.run_frame().unwrap();
    assert_eq!(fam.peek_wram(0x0000), 0x42);
    assert_eq!(fam.frames(), 1);
}

#[test]
fn clock_ratio_is_exactly_three_dots_per_cpu_cycle() {
    let mut fam = famicom(&[0x4C, 0x00, 0x80]); // JMP $8000
    for _ in 0..3 {
        fam.run_frame().unwrap();
    }
    assert_eq!(fam.ppu_dots(), fam.cpu_cycles() * 3);
}

#[test]
fn oam_dma_takes_513_cycles_from_an_even_trigger() {
    // LDA #$02; STA $4014; NOP
    let mut fam = famicom(&[0xA9, 0x02, 0x8D, 0x14, 0x40, 0xEA, 0xEA]);
    fam.step().unwrap(); // LDA
    fam.step().unwrap(); // STA latches the DMA page
    let before = fam.cpu_cycles();
    assert_eq!(before % 2, 0, "trigger parity must be even for this case");
    fam.step().unwrap(); // DMA runs, then the NOP (2 cycles)
    assert_eq!(fam.cpu_cycles() - before, 513 + 2);
}

#[test]
fn oam_dma_takes_514_cycles_from_an_odd_trigger() {
    // LDA $00 (3 cycles) shifts the trigger onto an odd cycle.
    let mut fam = famicom(&[0xA5, 0x00, 0xA9, 0x02, 0x8D, 0x14, 0x40, 0xEA, 0xEA]);
    for _ in 0..3 {
        fam.step().unwrap();
    }
    let before = fam.cpu_cycles();
    assert_eq!(before % 2, 1, "trigger parity must be odd for this case");
    fam.step().unwrap();
    assert_eq!(fam.cpu_cycles() - before, 514 + 2);
}

#[test]
fn oam_dma_copies_a_full_page_into_oam() {
    // LDA #$77; STA $0250; LDA #$00; STA $2003; LDA #$02; STA $4014; NOP
    let mut fam = famicom(&[
        0xA9, 0x77, 0x8D, 0x50, 0x02, // marker into page $02
        0xA9, 0x00, 0x8D, 0x03, 0x20, // OAMADDR = 0
        0xA9, 0x02, 0x8D, 0x14, 0x40, // DMA from $0200
        0xEA,
    ]);
    for _ in 0..7 {
        fam.step().unwrap();
    }
    assert_eq!(fam.ppu().oam_byte(0x50), 0x77);
    assert_eq!(fam.ppu().oam_byte(0x51), 0x00);
}

#[test]
fn nmi_handler_runs_once_per_frame() {
    // Reset: enable NMI, then spin. Handler: INC $10; RTI.
    let rom = build_rom(
        &[0xA9, 0x80, 0x8D, 0x00, 0x20, 0x4C, 0x05, 0x80],
        Some(&[0xE6, 0x10, 0x40]),
    );
    let mut fam = Famicom::new(&rom, Framebuffer::new()).unwrap();

    // run_frame returns at vblank entry; each frame's NMI is delivered
    // at the first instruction boundary of the following call.
    for _ in 0..3 {
        fam.run_frame().unwrap();
    }
    assert_eq!(fam.peek_wram(0x10), 2);

    fam.run_frame().unwrap();
    assert_eq!(fam.peek_wram(0x10), 3);
}

#[test]
fn vblank_flag_is_visible_to_a_polling_loop() {
    // poll: LDA $2002; BPL poll; LDA #$01; STA $00; spin
    let mut fam = famicom(&[
        0xAD, 0x02, 0x20, // poll: LDA $2002
        0x10, 0xFB, //       BPL poll
        0xA9, 0x01, 0x85, 0x00, // $00 = 1
        0x4C, 0x09, 0x80, // spin
    ]);
    fam.run_frame().unwrap();
    fam.run_frame().unwrap();
    assert_eq!(fam.peek_wram(0x00), 0x01);
}

#[test]
fn illegal_opcode_is_fatal_to_the_run_loop() {
    let mut fam = famicom(&[0x02]);
    let err = fam.run_frame().unwrap_err();
    assert_eq!(err.opcode, 0x02);
    assert_eq!(err.pc, 0x8000);
}

#[test]
fn controller_bits_reach_the_program() {
    // Strobe, then read one bit of controller 1 into $00.
    let mut fam = famicom(&[
        0xA9, 0x01, 0x8D, 0x16, 0x40, // strobe on
        0xA9, 0x00, 0x8D, 0x16, 0x40, // strobe off: latch
        0xAD, 0x16, 0x40, // read bit 0 (button A)
        0x29, 0x01, // AND #$01
        0x85, 0x00, // store it
    ]);
    fam.set_buttons(button::A | button::START);
    for _ in 0..7 {
        fam.step().unwrap();
    }
    assert_eq!(fam.peek_wram(0x00), 0x01);
}

#[test]
fn bad_images_are_rejected_before_emulation() {
    assert!(Famicom::new(&[0u8; 8], Framebuffer::new()).is_err());

    let mut rom = build_rom(&[0xEA], None);
    rom[7] = 0x40; // mapper 64
    assert!(Famicom::new(&rom, Framebuffer::new()).is_err());
}
