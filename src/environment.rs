//! # environment
//!
//! Wires the interpreter to a display, an input device and a sound device,
//! and runs it at a fixed rate. Each frame:
//!
//!  scan input -> set keys -> step -> draw if the frame changed -> beep
//!
//! one instruction per frame; the rate defaults to 60Hz so the timers run at
//! their proper speed
use crate::config::Config;
use crate::display::Display;
use crate::errors::HostError;
use crate::input::Input;
use crate::interpreter::{Chip8Interpreter, Cycle};
use crate::sound::{Beeper, Sound};
use log::{debug, error, info};
use spin_sleep::LoopHelper;

pub struct Environment<'a> {
    interpreter: Chip8Interpreter,
    display: &'a mut dyn Display,
    input: &'a mut dyn Input,
    beeper: Beeper<&'a mut dyn Sound>,
    tick_rate_hz: f64,
}

impl<'a> Environment<'a> {
    pub fn new(
        interpreter: Chip8Interpreter,
        display: &'a mut dyn Display,
        input: &'a mut dyn Input,
        sound: &'a mut dyn Sound,
        config: &Config,
    ) -> Self {
        Environment {
            interpreter,
            display,
            input,
            beeper: Beeper::new(sound, config.beep_frames),
            tick_rate_hz: config.tick_rate_hz,
        }
    }

    pub fn interpreter(&self) -> &Chip8Interpreter {
        &self.interpreter
    }

    /// one tick of the machine, with the I/O either side of it
    pub fn frame(&mut self) -> Result<Cycle, HostError> {
        let keys = self.input.scan()?;
        for (key, &down) in keys.iter().enumerate() {
            self.interpreter.set_key(key as u8, down);
        }

        let cycle = self.interpreter.step().map_err(|fault| {
            error!(
                "halting at {:03x}: {}",
                self.interpreter.pc(),
                fault
            );
            fault
        })?;

        if self.interpreter.redraw_pending() {
            self.display.draw(self.interpreter.framebuffer())?;
            self.interpreter.clear_redraw_pending();
        }

        self.beeper
            .frame(self.interpreter.sound_timer_fired())
            .map_err(HostError::Sound)?;
        Ok(cycle)
    }

    /// run until the user quits, the frame limit is hit, or the machine
    /// faults. Returns how many frames ran
    pub fn main_loop(&mut self, max_frames: Option<u64>) -> Result<u64, HostError> {
        let mut helper = LoopHelper::builder()
            .report_interval_s(5.0)
            .build_with_target_rate(self.tick_rate_hz);
        let mut frames = 0u64;

        let outcome = loop {
            helper.loop_start();
            if self.input.quit_requested() {
                info!("quit after {} frames", frames);
                break Ok(frames);
            }
            if max_frames.map_or(false, |max| frames >= max) {
                info!("frame limit reached");
                break Ok(frames);
            }
            if let Err(e) = self.frame() {
                break Err(e);
            }
            frames += 1;
            if let Some(rate) = helper.report_rate() {
                debug!("running at {:.1} frames/s", rate);
            }
            helper.loop_sleep();
        };

        // don't leave the speaker on whatever happened
        self.beeper
            .stop()
            .map_err(HostError::Sound)?;
        outcome
    }
}
