use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use crossterm::terminal;
use log::debug;
use std::collections::HashMap;
use std::io;
use std::time::Duration;

/// pressed/released for each of the 16 hex keys
pub type KeyState = [bool; 16];

/// left-hand side of a qwerty keyboard, laid out like the COSMAC VIP keypad
///   1 2 3 4      1 2 3 C
///   q w e r  ->  4 5 6 D
///   a s d f      7 8 9 E
///   z x c v      A 0 B F
const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00), // x
    ('1', 0x01), // 1
    ('2', 0x02), // 2
    ('3', 0x03), // 3
    ('q', 0x04), // q
    ('w', 0x05), // w
    ('e', 0x06), // e
    ('a', 0x07), // a
    ('s', 0x08), // s
    ('d', 0x09), // d
    ('z', 0x0a), // z
    ('c', 0x0b), // c
    ('4', 0x0c), // 4
    ('r', 0x0d), // r
    ('f', 0x0e), // f
    ('v', 0x0f), // v
];

/// reads keypresses
pub trait Input {
    /// pick up whatever happened since the last scan and report which keys
    /// are down right now
    fn scan(&mut self) -> Result<KeyState, io::Error>;

    /// the user wants out
    fn quit_requested(&self) -> bool;
}

/// Terminals tell us a key went down but never that it came back up, so
/// every press is held for a fixed number of frames.
struct KeyLatch {
    held: [u8; 16],
    hold_frames: u8,
}

impl KeyLatch {
    fn new(hold_frames: u8) -> Self {
        KeyLatch {
            held: [0; 16],
            hold_frames: hold_frames.max(1),
        }
    }

    fn press(&mut self, key: u8) {
        self.held[key as usize & 0xf] = self.hold_frames;
    }

    /// state for this frame, then age every held key by one frame
    fn frame(&mut self) -> KeyState {
        let mut state = [false; 16];
        for (down, held) in state.iter_mut().zip(self.held.iter_mut()) {
            *down = *held > 0;
            *held = held.saturating_sub(1);
        }
        state
    }
}

/// simple implementation of Input, using STDIN in raw mode
pub struct StdinInput {
    latch: KeyLatch,
    keymap: HashMap<char, u8>,
    quit: bool,
}

impl StdinInput {
    pub fn new(hold_frames: u8) -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(StdinInput {
            latch: KeyLatch::new(hold_frames),
            keymap: HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
            quit: false,
        })
    }

    fn read_stdin(&mut self) -> Result<(), io::Error> {
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match evt.code {
                    KeyCode::Char('c') if evt.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.quit = true
                    }
                    KeyCode::Char(key) => match self.keymap.get(&key.to_ascii_lowercase()) {
                        Some(mapped_key) => self.latch.press(*mapped_key),
                        None => debug!("can't map {:?} to a COSMAC key", key),
                    },
                    KeyCode::Esc => self.quit = true,
                    other => debug!("unmapped key event {:?}", other),
                },
                _ => debug!("ignoring non-key terminal event"),
            }
        }
        Ok(())
    }
}

impl Drop for StdinInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for StdinInput {
    fn scan(&mut self) -> Result<KeyState, io::Error> {
        self.read_stdin()?;
        Ok(self.latch.frame())
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// dummy Input implementation for testing: the given keys are always down
pub struct DummyInput {
    keys: KeyState,
    scans: usize,
    quit_after: Option<usize>,
}

impl DummyInput {
    pub fn new(keys: &[u8]) -> Self {
        let mut state = [false; 16];
        for &k in keys {
            state[k as usize & 0xf] = true;
        }
        DummyInput {
            keys: state,
            scans: 0,
            quit_after: None,
        }
    }

    /// ask to quit once this many scans have happened
    pub fn quit_after(mut self, scans: usize) -> Self {
        self.quit_after = Some(scans);
        self
    }
}

impl Input for DummyInput {
    fn scan(&mut self) -> Result<KeyState, io::Error> {
        self.scans += 1;
        Ok(self.keys)
    }

    fn quit_requested(&self) -> bool {
        matches!(self.quit_after, Some(n) if self.scans >= n)
    }
}
