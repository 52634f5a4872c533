use beep::beep;
use std::error::Error;

/// something that can make (and stop making) a noise
pub trait Sound {
    fn beep(&mut self) -> Result<(), Box<dyn Error>>;
    fn stop(&mut self) -> Result<(), Box<dyn Error>>;
}

const SIMPLEBEEP_PITCH: u16 = 2093; // C

/// the PC speaker, via the beep crate
pub struct SimpleBeep {
    is_beeping: bool,
}

impl SimpleBeep {
    pub fn new() -> Self {
        SimpleBeep { is_beeping: false }
    }
}

impl Default for SimpleBeep {
    fn default() -> Self {
        Self::new()
    }
}

impl Sound for SimpleBeep {
    fn beep(&mut self) -> Result<(), Box<dyn Error>> {
        beep(SIMPLEBEEP_PITCH)?;
        self.is_beeping = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        if self.is_beeping {
            beep(0)?;
            self.is_beeping = false;
        }
        Ok(())
    }
}

/// lets the host pick a sound device at runtime and lend it out
impl<S: Sound + ?Sized> Sound for &mut S {
    fn beep(&mut self) -> Result<(), Box<dyn Error>> {
        (**self).beep()
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        (**self).stop()
    }
}

#[derive(Default)]
pub struct Mute {}

impl Mute {
    pub fn new() -> Self {
        Mute {}
    }
}

impl Sound for Mute {
    fn beep(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

/// Turns the interpreter's one-shot "sound timer ran out" signal into a
/// beep of a fixed number of frames.
pub struct Beeper<S: Sound> {
    sound: S,
    length: u8,
    remaining: u8,
}

impl<S: Sound> Beeper<S> {
    pub fn new(sound: S, length: u8) -> Self {
        Beeper {
            sound,
            length: length.max(1),
            remaining: 0,
        }
    }

    /// call once per frame; `fired` is the interpreter's signal for this frame
    pub fn frame(&mut self, fired: bool) -> Result<(), Box<dyn Error>> {
        if fired {
            if self.remaining == 0 {
                self.sound.beep()?;
            }
            self.remaining = self.length;
            return Ok(());
        }
        if self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.sound.stop()?;
            }
        }
        Ok(())
    }

    pub fn is_beeping(&self) -> bool {
        self.remaining > 0
    }

    /// silence, whatever state we're in
    pub fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        self.remaining = 0;
        self.sound.stop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// counts calls rather than making noise
    #[derive(Default)]
    struct Counting {
        beeps: usize,
        stops: usize,
    }

    impl Sound for Counting {
        fn beep(&mut self) -> Result<(), Box<dyn Error>> {
            self.beeps += 1;
            Ok(())
        }

        fn stop(&mut self) -> Result<(), Box<dyn Error>> {
            self.stops += 1;
            Ok(())
        }
    }

    #[test]
    fn test_beep_lasts_length_frames() -> Result<(), Box<dyn Error>> {
        let mut b = Beeper::new(Counting::default(), 3);
        b.frame(true)?;
        assert!(b.is_beeping());
        b.frame(false)?;
        b.frame(false)?;
        assert!(b.is_beeping());
        assert_eq!(b.sound.stops, 0);
        b.frame(false)?;
        assert!(!b.is_beeping());
        assert_eq!((b.sound.beeps, b.sound.stops), (1, 1));
        // nothing more once quiet
        b.frame(false)?;
        assert_eq!(b.sound.stops, 1);
        Ok(())
    }

    #[test]
    fn test_refire_extends_without_restarting() -> Result<(), Box<dyn Error>> {
        let mut b = Beeper::new(Counting::default(), 2);
        b.frame(true)?;
        b.frame(false)?;
        b.frame(true)?;
        b.frame(false)?;
        assert!(b.is_beeping());
        assert_eq!(b.sound.beeps, 1);
        Ok(())
    }

    #[test]
    fn test_mute() -> Result<(), Box<dyn Error>> {
        let mut b = Beeper::new(Mute::new(), 1);
        b.frame(true)?;
        b.frame(false)?;
        b.stop()
    }
}
