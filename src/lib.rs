//! Emulation library for the DCPU-16, a 16-bit processor with eight general
//! registers, a stack pointer, a program counter, an overflow register and
//! 65536 words of RAM.
//!
//! The [`Machine`](machine/struct.Machine.html) type owns the complete
//! processor state. Executing a program is driven by the host through the
//! [`Context`](processor/trait.Context.html) hook, which is polled before
//! every instruction fetch and may observe the machine state between
//! instructions:
//!
//! ```
//! use dcpu::{Context, Machine, RegisterId};
//!
//! struct StepLimit(usize);
//!
//! impl Context for StepLimit {
//!     fn start_instruction(&mut self, _machine: &Machine) -> bool {
//!         if self.0 == 0 {
//!             return false;
//!         }
//!         self.0 -= 1;
//!         true
//!     }
//! }
//!
//! // SET A, 0x30
//! let mut machine = Machine::with_program(&[0x7C01, 0x0030]);
//! machine.run(&mut StepLimit(1));
//!
//! assert_eq!(machine.register(RegisterId::A), 0x30);
//! assert_eq!(machine.pc(), 2);
//! ```
//!
//! Instruction words are built and taken apart by the helpers in
//! [`instructions`](instructions/index.html); the
//! [`image`](image/index.html) module converts between word vectors and
//! the little-endian byte dumps used as the on-disk program format.

pub mod constants;
pub mod image;
pub mod instructions;
pub mod machine;
pub mod processor;


pub use crate::image::ImageError;
pub use crate::instructions::*;
pub use crate::machine::Machine;
pub use crate::processor::Context;

/// The machine's native datum: an unsigned 16-bit word.
pub type Word = u16;

/// Byte order of the binary program image format.
pub type Endian = byteorder::LittleEndian;
