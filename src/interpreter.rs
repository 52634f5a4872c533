//! # interpreter
//!
//! The machine state the CHIP-8 program can see:
//!
//!  V0-VF   16 8bit registers; VF doubles as carry/borrow/collision flag
//!  I       16bit index register, used as a memory pointer
//!  PC      16bit program counter, starts at 0x200
//!  stack   16 return addresses plus a pointer (0 = empty)
//!  DT, ST  delay and sound timers, ticked once per instruction
//!  display 64x32 monochrome framebuffer, plus a "redraw needed" flag
//!  keypad  16 keys, 0x0-0xF, written by the host
//!
//! one call to `step()` is one fetch/decode/execute cycle followed by one
//! timer tick. The host calls it at a fixed rate.
use crate::config::{Config, Quirks};
use crate::errors::{EngineFault, ImageTooLarge};
use crate::framebuffer::Framebuffer;
use crate::instruction::Instruction;
use crate::memory::{self, MemoryMap, CHIP8_FONT_GLYPH_BYTES, CHIP8_PROGRAM_ADDR};
use crate::timers::Timers;
use log::{debug, trace, warn};
use std::io;

pub const REGISTER_COUNT: usize = 16;
pub const STACK_DEPTH: usize = 16;
pub const KEY_COUNT: usize = 16;

/// register used for carry, borrow and collision
const VF: usize = 0xF;

/// What a single cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// an instruction ran and the timers ticked
    Executed,
    /// Fx0A found no key down; nothing changed and the same instruction runs
    /// again next time
    AwaitingKey,
    /// the word at PC wasn't an instruction; it was logged and stepped over
    Skipped(u16),
}

pub struct Chip8Interpreter {
    memory: memory::Chip8MemoryMap,
    framebuffer: Framebuffer,
    v: [u8; REGISTER_COUNT],
    i: u16,
    program_counter: u16,
    stack: [u16; STACK_DEPTH],
    stack_pointer: usize,
    timers: Timers,
    keys: [bool; KEY_COUNT],
    redraw: bool,
    beep: bool,
    random: fastrand::Rng,
    quirks: Quirks,
}

impl Chip8Interpreter {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        let random = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let m = memory::Chip8MemoryMap::new();
        Chip8Interpreter {
            program_counter: CHIP8_PROGRAM_ADDR,
            memory: m,
            framebuffer: Framebuffer::new(),
            v: [0; REGISTER_COUNT],
            i: 0x0000,
            stack: [0; STACK_DEPTH],
            stack_pointer: 0,
            timers: Timers::default(),
            keys: [false; KEY_COUNT],
            redraw: false,
            beep: false,
            random,
            quirks: config.quirks,
        }
    }

    /// put the machine back to power-on state: RAM zeroed apart from the
    /// font, registers, stack, timers and keys cleared, screen blank
    pub fn initialize(&mut self) {
        self.memory.reset();
        self.framebuffer.clear();
        self.v = [0; REGISTER_COUNT];
        self.i = 0x0000;
        self.program_counter = CHIP8_PROGRAM_ADDR;
        self.stack = [0; STACK_DEPTH];
        self.stack_pointer = 0;
        self.timers = Timers::default();
        self.keys = [false; KEY_COUNT];
        self.redraw = false;
        self.beep = false;
    }

    /// load a chip8 program at 0x200
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), ImageTooLarge> {
        self.memory.load_program(program)
    }

    /// load a chip8 program from a file or whatever; returns its size
    pub fn load_program_from(&mut self, reader: &mut impl io::Read) -> Result<usize, io::Error> {
        self.memory.load_program_from(reader)
    }

    /// run one instruction and tick the timers
    pub fn step(&mut self) -> Result<Cycle, EngineFault> {
        let pc = self.program_counter;
        let opcode = self.memory.get_word(pc)?;
        let cycle = match Instruction::decode(opcode) {
            Ok(instruction) => {
                trace!("{:03x}  {:04x}  {}", pc, opcode, instruction);
                self.execute(instruction)?
            }
            Err(EngineFault::UnknownInstruction(op)) => {
                warn!("unknown instruction {:04x} at {:03x}, skipping", op, pc);
                self.program_counter = pc.wrapping_add(2);
                Cycle::Skipped(op)
            }
            Err(fault) => return Err(fault),
        };

        // a key wait is a retry, so the timers hold still too
        self.beep = match cycle {
            Cycle::AwaitingKey => false,
            _ => self.timers.tick(),
        };
        if self.beep {
            debug!("sound timer ran out");
        }
        Ok(cycle)
    }

    fn execute(&mut self, instruction: Instruction) -> Result<Cycle, EngineFault> {
        use Instruction::*;

        let pc = self.program_counter;
        let mut next = pc.wrapping_add(2);
        let skip = pc.wrapping_add(4);

        match instruction {
            Cls => {
                self.framebuffer.clear();
                self.redraw = true;
            }
            Ret => next = self.pop()?.wrapping_add(2),
            Jp { nnn } => next = nnn,
            Call { nnn } => {
                self.push(pc)?;
                next = nnn;
            }
            SeByte { x, kk } => {
                if self.reg(x) == kk {
                    next = skip;
                }
            }
            SneByte { x, kk } => {
                if self.reg(x) != kk {
                    next = skip;
                }
            }
            SeReg { x, y } => {
                if self.reg(x) == self.reg(y) {
                    next = skip;
                }
            }
            LdByte { x, kk } => self.set_reg(x, kk),
            AddByte { x, kk } => self.set_reg(x, self.reg(x).wrapping_add(kk)),
            LdReg { x, y } => self.set_reg(x, self.reg(y)),
            Or { x, y } => self.set_reg(x, self.reg(x) | self.reg(y)),
            And { x, y } => self.set_reg(x, self.reg(x) & self.reg(y)),
            Xor { x, y } => self.set_reg(x, self.reg(x) ^ self.reg(y)),
            // flag first, result second: when x is F the result is what stays
            AddReg { x, y } => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.v[VF] = carry as u8;
                self.set_reg(x, sum);
            }
            Sub { x, y } => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.v[VF] = (vx >= vy) as u8;
                self.set_reg(x, vx.wrapping_sub(vy));
            }
            Shr { x, y } => {
                let src = self.shift_source(x, y);
                self.v[VF] = src & 0x01;
                self.set_reg(x, src >> 1);
            }
            Subn { x, y } => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.v[VF] = (vy >= vx) as u8;
                self.set_reg(x, vy.wrapping_sub(vx));
            }
            Shl { x, y } => {
                let src = self.shift_source(x, y);
                self.v[VF] = src >> 7;
                self.set_reg(x, src << 1);
            }
            SneReg { x, y } => {
                if self.reg(x) != self.reg(y) {
                    next = skip;
                }
            }
            LdI { nnn } => self.i = nnn,
            JpV0 { nnn } => next = nnn + self.v[0] as u16,
            Rnd { x, kk } => {
                let r = self.random.u8(..);
                self.set_reg(x, r & kk);
            }
            Drw { x, y, n } => {
                let (px, py) = (self.reg(x) as usize, self.reg(y) as usize);
                let sprite = self.memory.get_ro_slice(self.i, n as usize)?;
                let collision = self.framebuffer.blit(px, py, sprite);
                self.v[VF] = collision as u8;
                self.redraw = true;
            }
            Skp { x } => {
                if self.key(x) {
                    next = skip;
                }
            }
            Sknp { x } => {
                if !self.key(x) {
                    next = skip;
                }
            }
            LdFromDelay { x } => self.set_reg(x, self.timers.delay as u8),
            LdKey { x } => match self.keys.iter().rposition(|&k| k) {
                Some(key) => self.set_reg(x, key as u8),
                None => return Ok(Cycle::AwaitingKey),
            },
            LdDelay { x } => self.timers.delay = self.reg(x) as u16,
            LdSound { x } => self.timers.sound = self.reg(x) as u16,
            AddI { x } => {
                self.v[VF] = (self.i.wrapping_add(self.reg(x) as u16) > 0x0FFF) as u8;
                self.i = self.i.wrapping_add(self.reg(x) as u16);
            }
            LdGlyph { x } => self.i = self.reg(x) as u16 * CHIP8_FONT_GLYPH_BYTES,
            Bcd { x } => {
                let v = self.reg(x);
                self.write_from_i(&[v / 100, v / 10 % 10, v % 10])?;
            }
            Store { x } => {
                let count = x as usize + 1;
                let regs = self.v;
                self.write_from_i(&regs[..count])?;
            }
            Load { x } => {
                let count = x as usize + 1;
                let data = self.memory.get_ro_slice(self.i, count)?;
                self.v[..count].copy_from_slice(data);
            }
        }

        self.program_counter = next;
        Ok(Cycle::Executed)
    }

    /// programs only get to write from 0x200 up; the font stays intact
    fn write_from_i(&mut self, data: &[u8]) -> Result<(), EngineFault> {
        if self.i < CHIP8_PROGRAM_ADDR {
            return Err(EngineFault::AddressOutOfRange(self.i));
        }
        self.memory.write(data, self.i)
    }

    fn reg(&self, x: u8) -> u8 {
        self.v[x as usize & 0xF]
    }

    fn set_reg(&mut self, x: u8, value: u8) {
        self.v[x as usize & 0xF] = value;
    }

    /// keys are looked up by the low nibble of Vx
    fn key(&self, x: u8) -> bool {
        self.keys[self.reg(x) as usize & 0xF]
    }

    fn shift_source(&self, x: u8, y: u8) -> u8 {
        if self.quirks.shift_vy {
            self.reg(y)
        } else {
            self.reg(x)
        }
    }

    fn push(&mut self, addr: u16) -> Result<(), EngineFault> {
        if self.stack_pointer >= STACK_DEPTH {
            return Err(EngineFault::StackOverflow);
        }
        self.stack[self.stack_pointer] = addr;
        self.stack_pointer += 1;
        Ok(())
    }

    fn pop(&mut self) -> Result<u16, EngineFault> {
        if self.stack_pointer == 0 {
            return Err(EngineFault::StackUnderflow);
        }
        self.stack_pointer -= 1;
        Ok(self.stack[self.stack_pointer])
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw
    }

    pub fn clear_redraw_pending(&mut self) {
        self.redraw = false;
    }

    /// press or release one of the 16 hex keys
    pub fn set_key(&mut self, index: u8, pressed: bool) {
        match self.keys.get_mut(index as usize) {
            Some(key) => *key = pressed,
            None => warn!("ignoring key {:#x}, the keypad only has 0x0-0xf", index),
        }
    }

    /// true once, straight after the cycle where the sound timer ran out
    pub fn sound_timer_fired(&mut self) -> bool {
        std::mem::take(&mut self.beep)
    }

    pub fn pc(&self) -> u16 {
        self.program_counter
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn register(&self, x: u8) -> u8 {
        self.reg(x)
    }

    pub fn stack_depth(&self) -> usize {
        self.stack_pointer
    }

    pub fn delay_timer(&self) -> u16 {
        self.timers.delay
    }

    pub fn sound_timer(&self) -> u16 {
        self.timers.sound
    }
}

impl Default for Chip8Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
