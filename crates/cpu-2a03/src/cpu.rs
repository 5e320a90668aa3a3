//! Instruction execution engine.
//!
//! The layout mirrors the chip: small instruction bodies (pure register
//! and flag mutation) are threaded through addressing-mode templates that
//! own the bus traffic. Each template performs the canonical cycle
//! sequence for its mode — every bus access pairs with one `Bus::tick`,
//! and internal (no-bus) cycles tick without an access — so the cycle
//! counts fall out of the code shape rather than a side table.

use crate::bus::Bus;
use crate::flags;
use crate::registers::Registers;

/// NMI vector address.
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector address.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ/BRK vector address.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// What one call to [`Cpu::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A normal instruction was executed.
    Normal,
    /// A pending NMI was serviced instead of fetching an instruction.
    Nmi,
    /// A pending IRQ was serviced instead of fetching an instruction.
    Irq,
}

/// Fatal decode error: the opcode has no defined behavior.
///
/// `pc` is the address the opcode was fetched from. The run loop is
/// expected to stop; the CPU itself is left in a consistent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalOpcode {
    pub opcode: u8,
    pub pc: u16,
}

impl core::fmt::Display for IllegalOpcode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "illegal opcode ${:02X} at ${:04X}", self.opcode, self.pc)
    }
}

impl core::error::Error for IllegalOpcode {}

/// Instruction body that consumes an operand byte.
type ReadOp = fn(&mut Cpu, u8);
/// Read-modify-write instruction body.
type RmwOp = fn(&mut Cpu, u8) -> u8;
/// Store instruction body: produces the byte to write.
type StoreOp = fn(&Cpu) -> u8;
/// Single-cycle implied instruction body.
type ImpliedOp = fn(&mut Cpu);
/// Branch condition.
type BranchCond = fn(&Cpu) -> bool;

/// Ricoh 2A03 CPU.
#[derive(Debug, Clone)]
pub struct Cpu {
    pub regs: Registers,
    nmi_pending: bool,
    irq_line: bool,
}

impl Cpu {
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            nmi_pending: false,
            irq_line: false,
        }
    }

    /// Reset: registers to power-on state, PC from the reset vector.
    ///
    /// The vector reads do not tick the clock — reset happens before the
    /// system starts counting time.
    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.regs = Registers::new();
        self.nmi_pending = false;
        self.irq_line = false;
        let lo = bus.read(RESET_VECTOR);
        let hi = bus.read(RESET_VECTOR + 1);
        self.regs.pc = u16::from_le_bytes([lo, hi]);
    }

    /// Raise the non-maskable interrupt line. Serviced at the next
    /// instruction boundary, ahead of any pending IRQ.
    pub fn nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Drive the (level-sensitive) IRQ line.
    pub fn set_irq(&mut self, asserted: bool) {
        self.irq_line = asserted;
    }

    /// Execute one instruction, or service a pending interrupt.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalOpcode`] when the fetched opcode has no defined
    /// behavior; this is fatal to the run loop.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<Step, IllegalOpcode> {
        if self.nmi_pending {
            self.nmi_pending = false;
            self.interrupt(bus, NMI_VECTOR);
            return Ok(Step::Nmi);
        }
        if self.irq_line && !self.regs.p.is_set(flags::I) {
            self.interrupt(bus, IRQ_VECTOR);
            return Ok(Step::Irq);
        }

        let start_pc = self.regs.pc;
        let opcode = self.fetch(bus);
        self.execute(bus, opcode).ok_or(IllegalOpcode {
            opcode,
            pc: start_pc,
        })?;
        Ok(Step::Normal)
    }

    // === Cycle primitives ===

    /// One bus read plus its clock tick.
    fn read(&mut self, bus: &mut impl Bus, addr: u16) -> u8 {
        let value = bus.read(addr);
        bus.tick();
        value
    }

    /// One bus write plus its clock tick.
    fn write(&mut self, bus: &mut impl Bus, addr: u16, value: u8) {
        bus.write(addr, value);
        bus.tick();
    }

    /// Fetch the byte at PC and advance.
    fn fetch(&mut self, bus: &mut impl Bus) -> u8 {
        let value = self.read(bus, self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Push a byte onto the $0100 stack page.
    fn push(&mut self, bus: &mut impl Bus, value: u8) {
        self.write(bus, self.regs.stack_addr(), value);
        self.regs.s = self.regs.s.wrapping_sub(1);
    }

    /// Pull a byte off the stack (increment before read).
    fn pull(&mut self, bus: &mut impl Bus) -> u8 {
        self.regs.s = self.regs.s.wrapping_add(1);
        self.read(bus, self.regs.stack_addr())
    }

    // === Addressing-mode templates ===
    //
    // Naming: read/rmw/write × zpg (zero page), zpi (zero page indexed),
    // abs (absolute), abi (absolute indexed), izx = ($nn,X), izy = ($nn),Y.

    fn implied(&mut self, bus: &mut impl Bus, op: ImpliedOp) {
        bus.tick();
        op(self);
    }

    fn accumulator(&mut self, bus: &mut impl Bus, op: RmwOp) {
        bus.tick();
        self.regs.a = op(self, self.regs.a);
    }

    fn imm(&mut self, bus: &mut impl Bus, op: ReadOp) {
        let operand = self.fetch(bus);
        op(self, operand);
    }

    fn read_zpg(&mut self, bus: &mut impl Bus, op: ReadOp) {
        let addr = u16::from(self.fetch(bus));
        let operand = self.read(bus, addr);
        op(self, operand);
    }

    fn rmw_zpg(&mut self, bus: &mut impl Bus, op: RmwOp) {
        let addr = u16::from(self.fetch(bus));
        let operand = self.read(bus, addr);
        bus.tick(); // modify cycle
        let result = op(self, operand);
        self.write(bus, addr, result);
    }

    fn write_zpg(&mut self, bus: &mut impl Bus, op: StoreOp) {
        let addr = u16::from(self.fetch(bus));
        self.write(bus, addr, op(self));
    }

    fn read_zpi(&mut self, bus: &mut impl Bus, index: u8, op: ReadOp) {
        let base = self.fetch(bus);
        bus.tick(); // index add cycle
        let addr = u16::from(base.wrapping_add(index));
        let operand = self.read(bus, addr);
        op(self, operand);
    }

    fn rmw_zpi(&mut self, bus: &mut impl Bus, index: u8, op: RmwOp) {
        let base = self.fetch(bus);
        bus.tick();
        let addr = u16::from(base.wrapping_add(index));
        let operand = self.read(bus, addr);
        bus.tick();
        let result = op(self, operand);
        self.write(bus, addr, result);
    }

    fn write_zpi(&mut self, bus: &mut impl Bus, index: u8, op: StoreOp) {
        let base = self.fetch(bus);
        bus.tick();
        let addr = u16::from(base.wrapping_add(index));
        self.write(bus, addr, op(self));
    }

    fn fetch_abs_addr(&mut self, bus: &mut impl Bus) -> u16 {
        let lo = self.fetch(bus);
        let hi = self.fetch(bus);
        u16::from_le_bytes([lo, hi])
    }

    fn read_abs(&mut self, bus: &mut impl Bus, op: ReadOp) {
        let addr = self.fetch_abs_addr(bus);
        let operand = self.read(bus, addr);
        op(self, operand);
    }

    fn rmw_abs(&mut self, bus: &mut impl Bus, op: RmwOp) {
        let addr = self.fetch_abs_addr(bus);
        let operand = self.read(bus, addr);
        bus.tick();
        let result = op(self, operand);
        self.write(bus, addr, result);
    }

    fn write_abs(&mut self, bus: &mut impl Bus, op: StoreOp) {
        let addr = self.fetch_abs_addr(bus);
        self.write(bus, addr, op(self));
    }

    fn read_abi(&mut self, bus: &mut impl Bus, index: u8, op: ReadOp) {
        let base = self.fetch_abs_addr(bus);
        let addr = base.wrapping_add(u16::from(index));
        if page_crossed(base, addr) {
            bus.tick(); // high-byte fixup
        }
        let operand = self.read(bus, addr);
        op(self, operand);
    }

    fn rmw_abi(&mut self, bus: &mut impl Bus, index: u8, op: RmwOp) {
        let base = self.fetch_abs_addr(bus);
        let addr = base.wrapping_add(u16::from(index));
        bus.tick(); // fixup cycle, taken unconditionally for RMW
        let operand = self.read(bus, addr);
        bus.tick();
        let result = op(self, operand);
        self.write(bus, addr, result);
    }

    fn write_abi(&mut self, bus: &mut impl Bus, index: u8, op: StoreOp) {
        let base = self.fetch_abs_addr(bus);
        let addr = base.wrapping_add(u16::from(index));
        bus.tick(); // fixup cycle, taken unconditionally for writes
        self.write(bus, addr, op(self));
    }

    /// Read the 16-bit pointer at a zero-page address; the high byte
    /// wraps within the zero page.
    fn read_zp_pointer(&mut self, bus: &mut impl Bus, zp: u8) -> u16 {
        let lo = self.read(bus, u16::from(zp));
        let hi = self.read(bus, u16::from(zp.wrapping_add(1)));
        u16::from_le_bytes([lo, hi])
    }

    fn read_izx(&mut self, bus: &mut impl Bus, op: ReadOp) {
        let base = self.fetch(bus);
        bus.tick(); // X add cycle
        let addr = self.read_zp_pointer(bus, base.wrapping_add(self.regs.x));
        let operand = self.read(bus, addr);
        op(self, operand);
    }

    fn write_izx(&mut self, bus: &mut impl Bus, op: StoreOp) {
        let base = self.fetch(bus);
        bus.tick();
        let addr = self.read_zp_pointer(bus, base.wrapping_add(self.regs.x));
        self.write(bus, addr, op(self));
    }

    fn read_izy(&mut self, bus: &mut impl Bus, op: ReadOp) {
        let zp = self.fetch(bus);
        let base = self.read_zp_pointer(bus, zp);
        let addr = base.wrapping_add(u16::from(self.regs.y));
        if page_crossed(base, addr) {
            bus.tick();
        }
        let operand = self.read(bus, addr);
        op(self, operand);
    }

    fn write_izy(&mut self, bus: &mut impl Bus, op: StoreOp) {
        let zp = self.fetch(bus);
        let base = self.read_zp_pointer(bus, zp);
        let addr = base.wrapping_add(u16::from(self.regs.y));
        bus.tick(); // fixup cycle, unconditional for writes
        self.write(bus, addr, op(self));
    }

    fn branch(&mut self, bus: &mut impl Bus, cond: BranchCond) {
        let offset = self.fetch(bus) as i8;
        if !cond(self) {
            return;
        }
        bus.tick(); // taken
        let from = self.regs.pc;
        let target = from.wrapping_add_signed(i16::from(offset));
        if page_crossed(from, target) {
            bus.tick();
        }
        self.regs.pc = target;
    }

    // === Stack and control flow ===

    fn pha(&mut self, bus: &mut impl Bus) {
        bus.tick();
        self.push(bus, self.regs.a);
    }

    fn php(&mut self, bus: &mut impl Bus) {
        bus.tick();
        self.push(bus, self.regs.p.pushed_by_brk());
    }

    fn pla(&mut self, bus: &mut impl Bus) {
        bus.tick();
        bus.tick(); // S increment cycle
        let value = self.pull(bus);
        self.regs.a = value;
        self.regs.p.set_nz(value);
    }

    fn plp(&mut self, bus: &mut impl Bus) {
        bus.tick();
        bus.tick();
        let value = self.pull(bus);
        self.regs.p = flags::Status::from_pulled(value);
    }

    fn brk(&mut self, bus: &mut impl Bus) {
        // BRK skips the byte after itself; the fetch is a real bus read.
        self.fetch(bus);
        self.push(bus, (self.regs.pc >> 8) as u8);
        self.push(bus, self.regs.pc as u8);
        self.push(bus, self.regs.p.pushed_by_brk());
        self.regs.p.insert(flags::I);
        let lo = self.read(bus, IRQ_VECTOR);
        let hi = self.read(bus, IRQ_VECTOR + 1);
        self.regs.pc = u16::from_le_bytes([lo, hi]);
    }

    fn rti(&mut self, bus: &mut impl Bus) {
        bus.tick();
        bus.tick();
        let p = self.pull(bus);
        self.regs.p = flags::Status::from_pulled(p);
        let lo = self.pull(bus);
        let hi = self.pull(bus);
        self.regs.pc = u16::from_le_bytes([lo, hi]);
    }

    fn rts(&mut self, bus: &mut impl Bus) {
        bus.tick();
        bus.tick();
        let lo = self.pull(bus);
        let hi = self.pull(bus);
        bus.tick(); // PC increment cycle
        self.regs.pc = u16::from_le_bytes([lo, hi]).wrapping_add(1);
    }

    fn jsr(&mut self, bus: &mut impl Bus) {
        let lo = self.fetch(bus);
        bus.tick(); // internal stack setup
        // PC now points at the high operand byte; that address is the
        // return address RTS will increment past.
        self.push(bus, (self.regs.pc >> 8) as u8);
        self.push(bus, self.regs.pc as u8);
        let hi = self.fetch(bus);
        self.regs.pc = u16::from_le_bytes([lo, hi]);
    }

    fn jmp_abs(&mut self, bus: &mut impl Bus) {
        self.regs.pc = self.fetch_abs_addr(bus);
    }

    /// JMP ($nnnn), with the hardware bug: the pointer's high byte is
    /// read from within the same page, wrapping instead of carrying.
    fn jmp_ind(&mut self, bus: &mut impl Bus) {
        let ptr = self.fetch_abs_addr(bus);
        let lo = self.read(bus, ptr);
        let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
        let hi = self.read(bus, hi_addr);
        self.regs.pc = u16::from_le_bytes([lo, hi]);
    }

    /// The 7-cycle hardware interrupt sequence (NMI and IRQ). Same push
    /// protocol as BRK, but PC is not advanced and the pushed status has
    /// B clear.
    fn interrupt(&mut self, bus: &mut impl Bus, vector: u16) {
        bus.tick();
        bus.tick();
        self.push(bus, (self.regs.pc >> 8) as u8);
        self.push(bus, self.regs.pc as u8);
        self.push(bus, self.regs.p.pushed_by_interrupt());
        self.regs.p.insert(flags::I);
        let lo = self.read(bus, vector);
        let hi = self.read(bus, vector.wrapping_add(1));
        self.regs.pc = u16::from_le_bytes([lo, hi]);
    }

    // === Instruction bodies ===

    fn lda(&mut self, operand: u8) {
        self.regs.a = operand;
        self.regs.p.set_nz(operand);
    }

    fn ldx(&mut self, operand: u8) {
        self.regs.x = operand;
        self.regs.p.set_nz(operand);
    }

    fn ldy(&mut self, operand: u8) {
        self.regs.y = operand;
        self.regs.p.set_nz(operand);
    }

    fn ora(&mut self, operand: u8) {
        self.lda(self.regs.a | operand);
    }

    fn and(&mut self, operand: u8) {
        self.lda(self.regs.a & operand);
    }

    fn eor(&mut self, operand: u8) {
        self.lda(self.regs.a ^ operand);
    }

    fn adc(&mut self, operand: u8) {
        let a = self.regs.a;
        let carry = u16::from(self.regs.p.is_set(flags::C));
        let sum = u16::from(a) + u16::from(operand) + carry;
        let result = sum as u8;
        self.regs.p.assign(flags::C, sum > 0xFF);
        // Overflow: both inputs disagree with the result's sign.
        self.regs
            .p
            .assign(flags::V, (a ^ result) & (operand ^ result) & 0x80 != 0);
        self.regs.p.set_nz(result);
        self.regs.a = result;
    }

    /// SBC is ADC of the one's complement; borrow semantics follow from
    /// the inverted-carry identity.
    fn sbc(&mut self, operand: u8) {
        self.adc(!operand);
    }

    fn compare(&mut self, register: u8, operand: u8) {
        self.regs.p.set_nz(register.wrapping_sub(operand));
        self.regs.p.assign(flags::C, operand <= register);
    }

    fn cmp(&mut self, operand: u8) {
        self.compare(self.regs.a, operand);
    }

    fn cpx(&mut self, operand: u8) {
        self.compare(self.regs.x, operand);
    }

    fn cpy(&mut self, operand: u8) {
        self.compare(self.regs.y, operand);
    }

    /// BIT: N and V come straight from operand bits 7 and 6; Z from the
    /// AND with A. A itself is untouched.
    fn bit(&mut self, operand: u8) {
        self.regs.p.assign(flags::N, operand & 0x80 != 0);
        self.regs.p.assign(flags::V, operand & 0x40 != 0);
        self.regs.p.assign(flags::Z, operand & self.regs.a == 0);
    }

    fn asl(&mut self, operand: u8) -> u8 {
        let result = operand << 1;
        self.regs.p.assign(flags::C, operand & 0x80 != 0);
        self.regs.p.set_nz(result);
        result
    }

    fn lsr(&mut self, operand: u8) -> u8 {
        let result = operand >> 1;
        self.regs.p.assign(flags::C, operand & 0x01 != 0);
        self.regs.p.set_nz(result);
        result
    }

    fn rol(&mut self, operand: u8) -> u8 {
        let result = (operand << 1) | u8::from(self.regs.p.is_set(flags::C));
        self.regs.p.assign(flags::C, operand & 0x80 != 0);
        self.regs.p.set_nz(result);
        result
    }

    fn ror(&mut self, operand: u8) -> u8 {
        let result = (operand >> 1) | (u8::from(self.regs.p.is_set(flags::C)) << 7);
        self.regs.p.assign(flags::C, operand & 0x01 != 0);
        self.regs.p.set_nz(result);
        result
    }

    fn inc(&mut self, operand: u8) -> u8 {
        let result = operand.wrapping_add(1);
        self.regs.p.set_nz(result);
        result
    }

    fn dec(&mut self, operand: u8) -> u8 {
        let result = operand.wrapping_sub(1);
        self.regs.p.set_nz(result);
        result
    }

    fn sta(&self) -> u8 {
        self.regs.a
    }

    fn stx(&self) -> u8 {
        self.regs.x
    }

    fn sty(&self) -> u8 {
        self.regs.y
    }

    fn tax(&mut self) {
        self.ldx(self.regs.a);
    }

    fn tay(&mut self) {
        self.ldy(self.regs.a);
    }

    fn tsx(&mut self) {
        self.ldx(self.regs.s);
    }

    fn txa(&mut self) {
        self.lda(self.regs.x);
    }

    fn tya(&mut self) {
        self.lda(self.regs.y);
    }

    fn txs(&mut self) {
        // TXS is the one transfer that does not touch flags.
        self.regs.s = self.regs.x;
    }

    fn inx(&mut self) {
        self.ldx(self.regs.x.wrapping_add(1));
    }

    fn iny(&mut self) {
        self.ldy(self.regs.y.wrapping_add(1));
    }

    fn dex(&mut self) {
        self.ldx(self.regs.x.wrapping_sub(1));
    }

    fn dey(&mut self) {
        self.ldy(self.regs.y.wrapping_sub(1));
    }

    fn clc(&mut self) {
        self.regs.p.remove(flags::C);
    }

    fn cld(&mut self) {
        self.regs.p.remove(flags::D);
    }

    fn cli(&mut self) {
        self.regs.p.remove(flags::I);
    }

    fn clv(&mut self) {
        self.regs.p.remove(flags::V);
    }

    fn sec(&mut self) {
        self.regs.p.insert(flags::C);
    }

    fn sed(&mut self) {
        self.regs.p.insert(flags::D);
    }

    fn sei(&mut self) {
        self.regs.p.insert(flags::I);
    }

    fn nop(&mut self) {}

    fn branch_cs(&self) -> bool {
        self.regs.p.is_set(flags::C)
    }

    fn branch_cc(&self) -> bool {
        !self.regs.p.is_set(flags::C)
    }

    fn branch_eq(&self) -> bool {
        self.regs.p.is_set(flags::Z)
    }

    fn branch_ne(&self) -> bool {
        !self.regs.p.is_set(flags::Z)
    }

    fn branch_mi(&self) -> bool {
        self.regs.p.is_set(flags::N)
    }

    fn branch_pl(&self) -> bool {
        !self.regs.p.is_set(flags::N)
    }

    fn branch_vs(&self) -> bool {
        self.regs.p.is_set(flags::V)
    }

    fn branch_vc(&self) -> bool {
        !self.regs.p.is_set(flags::V)
    }

    // === Dispatch ===

    /// Decode and execute; `None` means the opcode slot is undefined.
    #[allow(clippy::too_many_lines)]
    fn execute<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Option<()> {
        let x = self.regs.x;
        let y = self.regs.y;
        match opcode {
            // Transfers, index arithmetic, flag ops
            0xAA => self.implied(bus, Self::tax),
            0xA8 => self.implied(bus, Self::tay),
            0xBA => self.implied(bus, Self::tsx),
            0x8A => self.implied(bus, Self::txa),
            0x9A => self.implied(bus, Self::txs),
            0x98 => self.implied(bus, Self::tya),
            0xCA => self.implied(bus, Self::dex),
            0x88 => self.implied(bus, Self::dey),
            0xE8 => self.implied(bus, Self::inx),
            0xC8 => self.implied(bus, Self::iny),
            0x18 => self.implied(bus, Self::clc),
            0xD8 => self.implied(bus, Self::cld),
            0x58 => self.implied(bus, Self::cli),
            0xB8 => self.implied(bus, Self::clv),
            0x38 => self.implied(bus, Self::sec),
            0xF8 => self.implied(bus, Self::sed),
            0x78 => self.implied(bus, Self::sei),
            0xEA => self.implied(bus, Self::nop),

            // Stack and interrupt control
            0x48 => self.pha(bus),
            0x08 => self.php(bus),
            0x68 => self.pla(bus),
            0x28 => self.plp(bus),
            0x00 => self.brk(bus),
            0x40 => self.rti(bus),
            0x60 => self.rts(bus),

            // Accumulator shifts
            0x0A => self.accumulator(bus, Self::asl),
            0x4A => self.accumulator(bus, Self::lsr),
            0x2A => self.accumulator(bus, Self::rol),
            0x6A => self.accumulator(bus, Self::ror),

            // Immediate
            0xA9 => self.imm(bus, Self::lda),
            0xA2 => self.imm(bus, Self::ldx),
            0xA0 => self.imm(bus, Self::ldy),
            0x09 => self.imm(bus, Self::ora),
            0x29 => self.imm(bus, Self::and),
            0x49 => self.imm(bus, Self::eor),
            0x69 => self.imm(bus, Self::adc),
            0xE9 => self.imm(bus, Self::sbc),
            0xC9 => self.imm(bus, Self::cmp),
            0xE0 => self.imm(bus, Self::cpx),
            0xC0 => self.imm(bus, Self::cpy),

            // Zero page
            0xA5 => self.read_zpg(bus, Self::lda),
            0xA6 => self.read_zpg(bus, Self::ldx),
            0xA4 => self.read_zpg(bus, Self::ldy),
            0x05 => self.read_zpg(bus, Self::ora),
            0x25 => self.read_zpg(bus, Self::and),
            0x45 => self.read_zpg(bus, Self::eor),
            0x65 => self.read_zpg(bus, Self::adc),
            0xE5 => self.read_zpg(bus, Self::sbc),
            0xC5 => self.read_zpg(bus, Self::cmp),
            0xE4 => self.read_zpg(bus, Self::cpx),
            0xC4 => self.read_zpg(bus, Self::cpy),
            0x24 => self.read_zpg(bus, Self::bit),
            0x06 => self.rmw_zpg(bus, Self::asl),
            0x46 => self.rmw_zpg(bus, Self::lsr),
            0x26 => self.rmw_zpg(bus, Self::rol),
            0x66 => self.rmw_zpg(bus, Self::ror),
            0xE6 => self.rmw_zpg(bus, Self::inc),
            0xC6 => self.rmw_zpg(bus, Self::dec),
            0x85 => self.write_zpg(bus, Self::sta),
            0x86 => self.write_zpg(bus, Self::stx),
            0x84 => self.write_zpg(bus, Self::sty),

            // Zero page indexed
            0xB5 => self.read_zpi(bus, x, Self::lda),
            0xB4 => self.read_zpi(bus, x, Self::ldy),
            0xB6 => self.read_zpi(bus, y, Self::ldx),
            0x15 => self.read_zpi(bus, x, Self::ora),
            0x35 => self.read_zpi(bus, x, Self::and),
            0x55 => self.read_zpi(bus, x, Self::eor),
            0x75 => self.read_zpi(bus, x, Self::adc),
            0xF5 => self.read_zpi(bus, x, Self::sbc),
            0xD5 => self.read_zpi(bus, x, Self::cmp),
            0x16 => self.rmw_zpi(bus, x, Self::asl),
            0x56 => self.rmw_zpi(bus, x, Self::lsr),
            0x36 => self.rmw_zpi(bus, x, Self::rol),
            0x76 => self.rmw_zpi(bus, x, Self::ror),
            0xF6 => self.rmw_zpi(bus, x, Self::inc),
            0xD6 => self.rmw_zpi(bus, x, Self::dec),
            0x95 => self.write_zpi(bus, x, Self::sta),
            0x94 => self.write_zpi(bus, x, Self::sty),
            0x96 => self.write_zpi(bus, y, Self::stx),

            // Absolute
            0xAD => self.read_abs(bus, Self::lda),
            0xAE => self.read_abs(bus, Self::ldx),
            0xAC => self.read_abs(bus, Self::ldy),
            0x0D => self.read_abs(bus, Self::ora),
            0x2D => self.read_abs(bus, Self::and),
            0x4D => self.read_abs(bus, Self::eor),
            0x6D => self.read_abs(bus, Self::adc),
            0xED => self.read_abs(bus, Self::sbc),
            0xCD => self.read_abs(bus, Self::cmp),
            0xEC => self.read_abs(bus, Self::cpx),
            0xCC => self.read_abs(bus, Self::cpy),
            0x2C => self.read_abs(bus, Self::bit),
            0x0E => self.rmw_abs(bus, Self::asl),
            0x4E => self.rmw_abs(bus, Self::lsr),
            0x2E => self.rmw_abs(bus, Self::rol),
            0x6E => self.rmw_abs(bus, Self::ror),
            0xEE => self.rmw_abs(bus, Self::inc),
            0xCE => self.rmw_abs(bus, Self::dec),
            0x8D => self.write_abs(bus, Self::sta),
            0x8E => self.write_abs(bus, Self::stx),
            0x8C => self.write_abs(bus, Self::sty),
            0x4C => self.jmp_abs(bus),
            0x20 => self.jsr(bus),
            0x6C => self.jmp_ind(bus),

            // Absolute indexed
            0xBD => self.read_abi(bus, x, Self::lda),
            0xB9 => self.read_abi(bus, y, Self::lda),
            0xBE => self.read_abi(bus, y, Self::ldx),
            0xBC => self.read_abi(bus, x, Self::ldy),
            0x1D => self.read_abi(bus, x, Self::ora),
            0x19 => self.read_abi(bus, y, Self::ora),
            0x3D => self.read_abi(bus, x, Self::and),
            0x39 => self.read_abi(bus, y, Self::and),
            0x5D => self.read_abi(bus, x, Self::eor),
            0x59 => self.read_abi(bus, y, Self::eor),
            0x7D => self.read_abi(bus, x, Self::adc),
            0x79 => self.read_abi(bus, y, Self::adc),
            0xFD => self.read_abi(bus, x, Self::sbc),
            0xF9 => self.read_abi(bus, y, Self::sbc),
            0xDD => self.read_abi(bus, x, Self::cmp),
            0xD9 => self.read_abi(bus, y, Self::cmp),
            0x1E => self.rmw_abi(bus, x, Self::asl),
            0x5E => self.rmw_abi(bus, x, Self::lsr),
            0x3E => self.rmw_abi(bus, x, Self::rol),
            0x7E => self.rmw_abi(bus, x, Self::ror),
            0xFE => self.rmw_abi(bus, x, Self::inc),
            0xDE => self.rmw_abi(bus, x, Self::dec),
            0x9D => self.write_abi(bus, x, Self::sta),
            0x99 => self.write_abi(bus, y, Self::sta),

            // Indexed indirect ($nn,X)
            0xA1 => self.read_izx(bus, Self::lda),
            0x01 => self.read_izx(bus, Self::ora),
            0x21 => self.read_izx(bus, Self::and),
            0x41 => self.read_izx(bus, Self::eor),
            0x61 => self.read_izx(bus, Self::adc),
            0xE1 => self.read_izx(bus, Self::sbc),
            0xC1 => self.read_izx(bus, Self::cmp),
            0x81 => self.write_izx(bus, Self::sta),

            // Indirect indexed ($nn),Y
            0xB1 => self.read_izy(bus, Self::lda),
            0x11 => self.read_izy(bus, Self::ora),
            0x31 => self.read_izy(bus, Self::and),
            0x51 => self.read_izy(bus, Self::eor),
            0x71 => self.read_izy(bus, Self::adc),
            0xF1 => self.read_izy(bus, Self::sbc),
            0xD1 => self.read_izy(bus, Self::cmp),
            0x91 => self.write_izy(bus, Self::sta),

            // Branches
            0x90 => self.branch(bus, Self::branch_cc),
            0xB0 => self.branch(bus, Self::branch_cs),
            0xF0 => self.branch(bus, Self::branch_eq),
            0xD0 => self.branch(bus, Self::branch_ne),
            0x30 => self.branch(bus, Self::branch_mi),
            0x10 => self.branch(bus, Self::branch_pl),
            0x50 => self.branch(bus, Self::branch_vc),
            0x70 => self.branch(bus, Self::branch_vs),

            _ => return None,
        }
        Some(())
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

/// True when two addresses fall on different 256-byte pages.
const fn page_crossed(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}
