use num_traits::FromPrimitive;

use crate::{constants, instructions, Machine, NonBasicOpcode, Opcode, Word};

/// Stepping hook supplied by the host.
///
/// [`Machine::run`](../machine/struct.Machine.html#method.run) polls
/// `start_instruction` before every fetch; returning `false` ends the
/// run. This is the interpreter's only suspension point — the host may
/// inspect registers, `PC`, `SP`, `O` and memory through the borrowed
/// machine on each call.
pub trait Context {
    fn start_instruction(&mut self, machine: &Machine) -> bool;
}

/// Storage location an operand writes back to.
///
/// Literal operands have no target; writes to them are discarded.
enum Target {
    Register(usize),
    Memory(Word),
    Sp,
    Pc,
    O,
}

/// A decoded operand: the value read at decode time and the location a
/// result would be committed to.
struct Operand {
    value: Word,
    target: Option<Target>,
}

impl Operand {
    fn read(value: Word) -> Operand {
        Operand {
            value,
            target: None,
        }
    }

    fn at(value: Word, target: Target) -> Operand {
        Operand {
            value,
            target: Some(target),
        }
    }
}

impl Machine {
    /// Decodes a 6-bit operand field.
    ///
    /// Decoding has side effects: operand forms with an in-stream extra
    /// word advance `PC`, and the stack forms move `SP`. These occur even
    /// when the instruction is being skipped, because a conditional skip
    /// consumes the next full instruction.
    fn operand(&mut self, code: Word) -> Operand {
        debug_assert!(code <= constants::OPERAND_MASK);
        match code {
            0x00..=0x07 => {
                let index = code as usize;
                Operand::at(self.registers[index], Target::Register(index))
            }
            0x08..=0x0F => {
                let address = self.registers[(code - constants::ARG_REGISTER_PTR) as usize];
                Operand::at(self.read(address), Target::Memory(address))
            }
            0x10..=0x17 => {
                let register = self.registers[(code - constants::ARG_REGISTER_WORD) as usize];
                let address = self.next_word().wrapping_add(register);
                Operand::at(self.read(address), Target::Memory(address))
            }
            constants::ARG_POP => {
                let address = self.sp;
                self.sp = self.sp.wrapping_add(1);
                Operand::at(self.read(address), Target::Memory(address))
            }
            constants::ARG_PEEK => Operand::at(self.read(self.sp), Target::Memory(self.sp)),
            constants::ARG_PUSH => {
                self.sp = self.sp.wrapping_sub(1);
                Operand::at(self.read(self.sp), Target::Memory(self.sp))
            }
            constants::ARG_SP => Operand::at(self.sp, Target::Sp),
            constants::ARG_PC => Operand::at(self.pc, Target::Pc),
            constants::ARG_O => Operand::at(self.o, Target::O),
            constants::ARG_WORD_PTR => {
                let address = self.next_word();
                Operand::at(self.read(address), Target::Memory(address))
            }
            constants::ARG_WORD => {
                let value = self.next_word();
                Operand::read(value)
            }
            _ => Operand::read(code - constants::ARG_SMALL_LITERAL),
        }
    }

    /// Commits `value` to the operand's target, if it has one.
    fn commit(&mut self, operand: &Operand, value: Word) {
        match operand.target {
            Some(Target::Register(index)) => self.registers[index] = value,
            Some(Target::Memory(address)) => self.write(address, value),
            Some(Target::Sp) => self.sp = value,
            Some(Target::Pc) => self.pc = value,
            Some(Target::O) => self.o = value,
            None => {}
        }
    }

    /// Executes a single instruction.
    ///
    /// Every 4-bit opcode and every operand code has defined behaviour;
    /// `step` cannot fail. A pending conditional skip is consumed by this
    /// instruction: its operands still decode (advancing `PC` and `SP`),
    /// but no effect is committed and the latch is cleared.
    pub fn step(&mut self) {
        let instruction = self.next_word();
        let op = instructions::operation(instruction);

        if op == constants::OP_NON_BASIC {
            let sub = instructions::field_a(instruction);
            let b = self.operand(instructions::field_b(instruction));

            if self.skip {
                self.skip = false;
                return;
            }

            // Unassigned sub-opcodes are reserved and execute as no-ops.
            if let Some(NonBasicOpcode::Jsr) = NonBasicOpcode::from_u16(sub) {
                self.sp = self.sp.wrapping_sub(1);
                let return_address = self.pc;
                self.write(self.sp, return_address);
                self.pc = b.value;
            }
            return;
        }

        // a decodes before b, so a PC-consuming a operand is read first.
        let a = self.operand(instructions::field_a(instruction));
        let b = self.operand(instructions::field_b(instruction));

        if self.skip {
            self.skip = false;
            return;
        }

        let va = a.value;
        let vb = b.value;

        // Arithmetic is staged in a wider width; O is written before the
        // result so `ADD A, A` sees the pre-write value.
        match Opcode::from_u16(op) {
            Some(Opcode::Set) => {
                self.commit(&a, vb);
            }
            Some(Opcode::Add) => {
                let sum = u32::from(va) + u32::from(vb);
                self.o = if sum > 0xFFFF { 1 } else { 0 };
                self.commit(&a, sum as Word);
            }
            Some(Opcode::Sub) => {
                let (difference, underflow) = va.overflowing_sub(vb);
                self.o = if underflow { 0xFFFF } else { 0 };
                self.commit(&a, difference);
            }
            Some(Opcode::Mul) => {
                let product = u32::from(va) * u32::from(vb);
                self.o = (product >> 16) as Word;
                self.commit(&a, product as Word);
            }
            Some(Opcode::Div) => {
                if vb == 0 {
                    self.o = 0;
                    self.commit(&a, 0);
                } else {
                    self.o = ((u32::from(va) << 16) / u32::from(vb)) as Word;
                    self.commit(&a, va / vb);
                }
            }
            Some(Opcode::Mod) => {
                self.commit(&a, if vb == 0 { 0 } else { va % vb });
            }
            Some(Opcode::Shl) => {
                let wide = u64::from(va).checked_shl(u32::from(vb)).unwrap_or(0);
                self.o = (wide >> 16) as Word;
                self.commit(&a, wide as Word);
            }
            Some(Opcode::Shr) => {
                let wide = (u64::from(va) << 16)
                    .checked_shr(u32::from(vb))
                    .unwrap_or(0);
                self.o = wide as Word;
                self.commit(&a, (wide >> 16) as Word);
            }
            Some(Opcode::And) => {
                self.commit(&a, va & vb);
            }
            Some(Opcode::Bor) => {
                self.commit(&a, va | vb);
            }
            Some(Opcode::Xor) => {
                self.commit(&a, va ^ vb);
            }
            Some(Opcode::Ife) => {
                self.skip = va != vb;
            }
            Some(Opcode::Ifn) => {
                self.skip = va == vb;
            }
            Some(Opcode::Ifg) => {
                self.skip = va <= vb;
            }
            Some(Opcode::Ifb) => {
                self.skip = (va & vb) == 0;
            }
            None => {}
        }
    }

    /// Runs instructions until `context` declines the next one.
    ///
    /// The machine is borrowed mutably for the duration of the run; the
    /// hook observes it through the shared borrow passed to each
    /// [`start_instruction`](trait.Context.html) call.
    pub fn run<C: Context + ?Sized>(&mut self, context: &mut C) {
        while context.start_instruction(self) {
            self.step();
        }
    }
}
