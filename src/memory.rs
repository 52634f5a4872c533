use crate::errors::{EngineFault, ImageTooLarge};
use std::io;

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// Represents the addressable memory of the machine
pub trait MemoryMap {
    /// get a two-byte big-endian word (instruction fetch)
    fn get_word(&self, addr: u16) -> Result<u16, EngineFault> {
        let word = self.get_ro_slice(addr, 2)?;
        Ok(u16::from_be_bytes([word[0], word[1]]))
    }

    /// write a chunk of bytes into RAM
    fn write(&mut self, data: &[u8], addr: u16) -> Result<(), EngineFault> {
        self.get_rw_slice(addr, data.len())?.copy_from_slice(data);
        Ok(())
    }

    /// get a r/w slice of the underlying memory
    fn get_rw_slice(&mut self, addr: u16, len: usize) -> Result<&mut [u8], EngineFault>;

    /// get a r/o slice of the underlying memory
    fn get_ro_slice(&self, addr: u16, len: usize) -> Result<&[u8], EngineFault>;
}

/// Defines the CHIP-8 memory map
///
///   0x0000-0x004f  hex font, 5 bytes per glyph
///   0x0050-0x01ff  reserved for the interpreter
///   0x0200-0x0fff  program and work RAM
///
/// the call stack, timers and display live outside RAM, in the interpreter
pub struct Chip8MemoryMap {
    bytes: Box<[u8]>,
}

impl MemoryMap for Chip8MemoryMap {
    fn get_rw_slice(&mut self, addr: u16, len: usize) -> Result<&mut [u8], EngineFault> {
        let a = addr as usize;
        let end = self.check_range(addr, len)?;
        Ok(&mut self.bytes[a..end])
    }
    fn get_ro_slice(&self, addr: u16, len: usize) -> Result<&[u8], EngineFault> {
        let a = addr as usize;
        let end = self.check_range(addr, len)?;
        Ok(&self.bytes[a..end])
    }
}

/// how much RAM we have
pub const CHIP8_RAM_SIZE_BYTES: usize = 4096;

/// where the program is loaded
pub const CHIP8_PROGRAM_ADDR: u16 = 0x0200;

/// largest program image that fits
pub const CHIP8_MAX_PROGRAM_BYTES: usize = CHIP8_RAM_SIZE_BYTES - CHIP8_PROGRAM_ADDR as usize;

/// where the font is baked in, and how big each glyph is
pub const CHIP8_FONT_ADDR: u16 = 0x000;
pub const CHIP8_FONT_GLYPH_BYTES: u16 = 5;

impl Chip8MemoryMap {
    /// zeroed RAM with the font baked in
    pub fn new() -> Self {
        let mut mm = Chip8MemoryMap {
            bytes: vec![0u8; CHIP8_RAM_SIZE_BYTES].into_boxed_slice(),
        };
        mm.reset();
        mm
    }

    /// zero everything, then put the font back
    pub fn reset(&mut self) {
        self.bytes.fill(0);
        let font = CHIP8_FONT_ADDR as usize;
        self.bytes[font..font + CHIP8_FONT.len()].copy_from_slice(&CHIP8_FONT);
    }

    /// load a CHIP-8 program at 0x200
    pub fn load_program(&mut self, data: &[u8]) -> Result<(), ImageTooLarge> {
        if data.len() > CHIP8_MAX_PROGRAM_BYTES {
            return Err(ImageTooLarge {
                size: data.len(),
                max: CHIP8_MAX_PROGRAM_BYTES,
            });
        }
        let a = CHIP8_PROGRAM_ADDR as usize;
        self.bytes[a..a + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// read unknown len of data from a reader and load it as a program
    pub fn load_program_from(&mut self, reader: &mut impl io::Read) -> Result<usize, io::Error> {
        let mut buf = Vec::new();
        let len = reader.read_to_end(&mut buf)?;
        self.load_program(&buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(len)
    }

    fn check_range(&self, addr: u16, len: usize) -> Result<usize, EngineFault> {
        let end = addr as usize + len;
        if end > self.bytes.len() {
            // report the first byte that isn't there
            let bad = addr.max(self.bytes.len() as u16);
            return Err(EngineFault::AddressOutOfRange(bad));
        }
        Ok(end)
    }
}

impl Default for Chip8MemoryMap {
    fn default() -> Self {
        Self::new()
    }
}

#[rustfmt::skip]
const CHIP8_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed() {
        let m = Chip8MemoryMap::new();
        // NB. memory is zeroed from 0x50 because before that we bake in the font
        assert!(m.bytes[0x50..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_font_at_zero() {
        let m = Chip8MemoryMap::new();
        assert_eq!(m.bytes[..5], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
        // glyph N lives at N * 5
        let f = (0xF * CHIP8_FONT_GLYPH_BYTES) as usize;
        assert_eq!(m.bytes[f..f + 5], [0xF0, 0x80, 0xF0, 0x80, 0x80]);
    }

    #[test]
    fn test_write_slice_ok() -> Result<(), EngineFault> {
        let mut dst = Chip8MemoryMap::new();
        let src: &[u8] = &[0, 1, 2, 3, 4, 5, 6, 7];
        dst.write(src, 0x308)?;
        assert_eq!(
            dst.bytes[0x300..0x310],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7]
        );
        Ok(())
    }

    #[test]
    fn test_read_word() -> Result<(), EngineFault> {
        let mut m = Chip8MemoryMap::new();
        m.write(&[0, 1, 2, 3, 4, 5, 6, 7], 0x400)?;
        assert_eq!(m.get_word(0x404)?, 0x0405);
        Ok(())
    }

    #[test]
    fn test_read_word_at_top_of_ram() {
        let m = Chip8MemoryMap::new();
        assert!(m.get_word(0xffe).is_ok());
        assert_eq!(m.get_word(0xfff), Err(EngineFault::AddressOutOfRange(0x1000)));
    }

    #[test]
    fn test_write_too_much_errors() {
        let mut dst = Chip8MemoryMap::new();
        assert_eq!(
            dst.write(&[0; 8], 4089),
            Err(EngineFault::AddressOutOfRange(0x1000))
        );
    }

    #[test]
    fn test_program_load_ok() -> Result<(), EngineFault> {
        let mut dst = Chip8MemoryMap::new();
        dst.load_program(&[0x00, 0xe0]).unwrap(); // clear screen
        assert_eq!(dst.get_ro_slice(0x200, 2)?, &[0x00, 0xe0]);
        Ok(())
    }

    #[test]
    fn test_program_exactly_fills_ram() {
        let mut dst = Chip8MemoryMap::new();
        let prog = vec![0xaa; 4096 - 0x200];
        assert!(dst.load_program(&prog).is_ok());
        assert_eq!(dst.bytes[0xfff], 0xaa);
    }

    #[test]
    fn test_program_one_byte_too_big() {
        let mut dst = Chip8MemoryMap::new();
        let prog = vec![0xaa; 4096 - 0x200 + 1];
        assert_eq!(
            dst.load_program(&prog),
            Err(ImageTooLarge { size: 3585, max: 3584 })
        );
        // nothing was written
        assert_eq!(dst.bytes[0x200], 0);
    }

    #[test]
    fn test_program_load_from_reader() -> Result<(), io::Error> {
        let mut dst = Chip8MemoryMap::new();
        let mut prog: &[u8] = &[0x12, 0x00];
        assert_eq!(dst.load_program_from(&mut prog)?, 2);
        assert_eq!(dst.bytes[0x200..0x202], [0x12, 0x00]);
        Ok(())
    }

    #[test]
    fn test_reset_restores_font() -> Result<(), EngineFault> {
        let mut m = Chip8MemoryMap::new();
        m.write(&[0xff; 16], 0)?;
        m.write(&[0xff; 16], 0x200)?;
        m.reset();
        assert_eq!(m.bytes[..5], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(m.bytes[0x200], 0);
        Ok(())
    }
}
