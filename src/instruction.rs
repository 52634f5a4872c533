//! # instruction
//!
//! CHIP-8 instructions are one big-endian 16bit word. The top nibble picks the
//! family; families 0x0, 0x8, 0xE and 0xF use the low nibble or low byte to
//! pick the instruction within the family. Operands are sliced out of the
//! other nibbles:
//!
//!  x   -- 0x0F00, register index
//!  y   -- 0x00F0, register index
//!  n   -- 0x000F, 4bit literal
//!  kk  -- 0x00FF, 8bit literal
//!  nnn -- 0x0FFF, 12bit address
//!
//! mnemonics follow Cowgod's technical reference

use crate::errors::EngineFault;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1nnn
    Jp { nnn: u16 },
    /// 2nnn
    Call { nnn: u16 },
    /// 3xkk
    SeByte { x: u8, kk: u8 },
    /// 4xkk
    SneByte { x: u8, kk: u8 },
    /// 5xy0
    SeReg { x: u8, y: u8 },
    /// 6xkk
    LdByte { x: u8, kk: u8 },
    /// 7xkk
    AddByte { x: u8, kk: u8 },
    /// 8xy0
    LdReg { x: u8, y: u8 },
    /// 8xy1
    Or { x: u8, y: u8 },
    /// 8xy2
    And { x: u8, y: u8 },
    /// 8xy3
    Xor { x: u8, y: u8 },
    /// 8xy4
    AddReg { x: u8, y: u8 },
    /// 8xy5
    Sub { x: u8, y: u8 },
    /// 8xy6
    Shr { x: u8, y: u8 },
    /// 8xy7
    Subn { x: u8, y: u8 },
    /// 8xyE
    Shl { x: u8, y: u8 },
    /// 9xy0
    SneReg { x: u8, y: u8 },
    /// Annn
    LdI { nnn: u16 },
    /// Bnnn
    JpV0 { nnn: u16 },
    /// Cxkk
    Rnd { x: u8, kk: u8 },
    /// Dxyn
    Drw { x: u8, y: u8, n: u8 },
    /// Ex9E
    Skp { x: u8 },
    /// ExA1
    Sknp { x: u8 },
    /// Fx07
    LdFromDelay { x: u8 },
    /// Fx0A
    LdKey { x: u8 },
    /// Fx15
    LdDelay { x: u8 },
    /// Fx18
    LdSound { x: u8 },
    /// Fx1E
    AddI { x: u8 },
    /// Fx29
    LdGlyph { x: u8 },
    /// Fx33
    Bcd { x: u8 },
    /// Fx55
    Store { x: u8 },
    /// Fx65
    Load { x: u8 },
}

impl Instruction {
    /// split the word into its operand fields and pick the instruction;
    /// anything that doesn't match is `UnknownInstruction`
    pub fn decode(opcode: u16) -> Result<Instruction, EngineFault> {
        use Instruction::*;

        let x = ((opcode & 0x0F00) >> 8) as u8;
        let y = ((opcode & 0x00F0) >> 4) as u8;
        let n = (opcode & 0x000F) as u8;
        let kk = (opcode & 0x00FF) as u8;
        let nnn = opcode & 0x0FFF;

        let instruction = match (opcode >> 12, x, y, n) {
            (0x0, 0x0, 0xE, 0x0) => Cls,
            (0x0, 0x0, 0xE, 0xE) => Ret,
            (0x1, ..) => Jp { nnn },
            (0x2, ..) => Call { nnn },
            (0x3, ..) => SeByte { x, kk },
            (0x4, ..) => SneByte { x, kk },
            (0x5, _, _, 0x0) => SeReg { x, y },
            (0x6, ..) => LdByte { x, kk },
            (0x7, ..) => AddByte { x, kk },
            (0x8, _, _, 0x0) => LdReg { x, y },
            (0x8, _, _, 0x1) => Or { x, y },
            (0x8, _, _, 0x2) => And { x, y },
            (0x8, _, _, 0x3) => Xor { x, y },
            (0x8, _, _, 0x4) => AddReg { x, y },
            (0x8, _, _, 0x5) => Sub { x, y },
            (0x8, _, _, 0x6) => Shr { x, y },
            (0x8, _, _, 0x7) => Subn { x, y },
            (0x8, _, _, 0xE) => Shl { x, y },
            (0x9, _, _, 0x0) => SneReg { x, y },
            (0xA, ..) => LdI { nnn },
            (0xB, ..) => JpV0 { nnn },
            (0xC, ..) => Rnd { x, kk },
            (0xD, ..) => Drw { x, y, n },
            (0xE, ..) if kk == 0x9E => Skp { x },
            (0xE, ..) if kk == 0xA1 => Sknp { x },
            (0xF, ..) => match kk {
                0x07 => LdFromDelay { x },
                0x0A => LdKey { x },
                0x15 => LdDelay { x },
                0x18 => LdSound { x },
                0x1E => AddI { x },
                0x29 => LdGlyph { x },
                0x33 => Bcd { x },
                0x55 => Store { x },
                0x65 => Load { x },
                _ => return Err(EngineFault::UnknownInstruction(opcode)),
            },
            _ => return Err(EngineFault::UnknownInstruction(opcode)),
        };
        Ok(instruction)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jp { nnn } => write!(f, "JP {:#05x}", nnn),
            Call { nnn } => write!(f, "CALL {:#05x}", nnn),
            SeByte { x, kk } => write!(f, "SE V{:X}, {:#04x}", x, kk),
            SneByte { x, kk } => write!(f, "SNE V{:X}, {:#04x}", x, kk),
            SeReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LdByte { x, kk } => write!(f, "LD V{:X}, {:#04x}", x, kk),
            AddByte { x, kk } => write!(f, "ADD V{:X}, {:#04x}", x, kk),
            LdReg { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Shr { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Shl { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            SneReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LdI { nnn } => write!(f, "LD I, {:#05x}", nnn),
            JpV0 { nnn } => write!(f, "JP V0, {:#05x}", nnn),
            Rnd { x, kk } => write!(f, "RND V{:X}, {:#04x}", x, kk),
            Drw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Skp { x } => write!(f, "SKP V{:X}", x),
            Sknp { x } => write!(f, "SKNP V{:X}", x),
            LdFromDelay { x } => write!(f, "LD V{:X}, DT", x),
            LdKey { x } => write!(f, "LD V{:X}, K", x),
            LdDelay { x } => write!(f, "LD DT, V{:X}", x),
            LdSound { x } => write!(f, "LD ST, V{:X}", x),
            AddI { x } => write!(f, "ADD I, V{:X}", x),
            LdGlyph { x } => write!(f, "LD F, V{:X}", x),
            Bcd { x } => write!(f, "LD B, V{:X}", x),
            Store { x } => write!(f, "LD [I], V{:X}", x),
            Load { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
