/// The delay and sound countdowns. Each instruction cycle ticks them once.
///
/// Programs can only load 8bit values, but the counters are kept wider so
/// nothing wraps if a host pokes them directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u16,
    pub sound: u16,
}

impl Timers {
    /// count both timers down by one, stopping at zero. Returns true when the
    /// sound timer has just run out, i.e. it was 1 before this tick
    pub fn tick(&mut self) -> bool {
        self.delay = self.delay.saturating_sub(1);
        let fired = self.sound == 1;
        self.sound = self.sound.saturating_sub(1);
        fired
    }
}
