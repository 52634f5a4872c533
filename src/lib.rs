//! A CHIP-8 virtual machine and a terminal host to run it in.
//!
//! ## Design
//!
//! * the interpreter owns all machine state; no globals, so several machines
//!   can run side by side (and tests can poke at one directly)
//! * one `step()` is one instruction plus one timer tick; the host decides
//!   how often to call it
//! * instructions are decoded once into an enum and dispatched with a match;
//!   words that aren't instructions are logged and stepped over
//! * waiting for a key is a cycle outcome, not a loop inside the interpreter
//! * display, input and sound sit behind traits so the interpreter doesn't
//!   need to know how the screen works
//!
//! Model
//!
//! Environment
//!  |-- display, input, sound, config
//!  |-- interpreter(config)
//!  |    |-- memory map (font, program)
//!  |    |-- framebuffer
//!  |    `-- timers
//!  `-- main loop, paced by spin_sleep
//!       |-- keys = input.scan()
//!       |-- interpreter.step()
//!       |-- if redraw pending: display.draw(framebuffer)
//!       `-- beeper.frame(sound timer fired)
pub mod config;
pub mod display;
pub mod environment;
pub mod errors;
pub mod framebuffer;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod memory;
pub mod sound;
pub mod timers;
