/// pixel grid size
pub const FRAMEBUFFER_WIDTH: usize = 64;
pub const FRAMEBUFFER_HEIGHT: usize = 32;

/// sprites are always one byte wide
const SPRITE_WIDTH: usize = 8;

/// The monochrome pixel grid the draw instructions write into. Sprites are
/// XORed on; a pixel going from on to off is a collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: [[bool; FRAMEBUFFER_WIDTH]; FRAMEBUFFER_HEIGHT],
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            pixels: [[false; FRAMEBUFFER_WIDTH]; FRAMEBUFFER_HEIGHT],
        }
    }

    /// turn every pixel off
    pub fn clear(&mut self) {
        for row in self.pixels.iter_mut() {
            row.fill(false);
        }
    }

    /// XOR a sprite onto the grid with its top-left corner at (x, y). Each
    /// byte of `sprite` is one row, most significant bit leftmost. Both axes
    /// wrap. Returns true if any lit pixel was turned off.
    pub fn blit(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, bits) in sprite.iter().enumerate() {
            let py = (y + row) % FRAMEBUFFER_HEIGHT;
            for column in 0..SPRITE_WIDTH {
                if bits & (0x80 >> column) == 0 {
                    continue;
                }
                let px = (x + column) % FRAMEBUFFER_WIDTH;
                let pixel = &mut self.pixels[py][px];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }
        collision
    }

    /// is the pixel at column x, row y on
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[y % FRAMEBUFFER_HEIGHT][x % FRAMEBUFFER_WIDTH]
    }

    /// the grid, row-major
    pub fn rows(&self) -> &[[bool; FRAMEBUFFER_WIDTH]; FRAMEBUFFER_HEIGHT] {
        &self.pixels
    }

    /// (x, y) of every lit pixel
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pixels.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &on)| on)
                .map(move |(x, _)| (x, y))
        })
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}
