use crate::CellSize;
use crate::Pixel;
use crate::coords::cell_rect;
use crate::grid::Grid;
use crate::grid::Viewport;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Width of a terminal character, in braille dots.
pub const DOTS_PER_COL: Pixel = 2;

/// Height of a terminal character, in braille dots.
pub const DOTS_PER_ROW: Pixel = 4;

/// An off-screen drawing surface where every braille dot is a pixel.
pub struct BrailleCanvas {
    /// The dot buffer
    db: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width in dots
    w: usize,

    /// Height in dots
    h: usize,
}

impl BrailleCanvas {
    /// A canvas that fills `cols` by `rows` terminal characters.
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self::new(
            cols as usize * DOTS_PER_COL as usize,
            rows as usize * DOTS_PER_ROW as usize,
        )
    }

    pub fn new(w: usize, h: usize) -> Self {
        // Let `w` and `h` refer to width and height of the dot buffer. Then `bw = ceil(w / 2)`
        // and `bh = ceil(h / 4)` are the width and height of braille characters of our framebuffer.
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        // Each braille character is 3 bytes, and newlines one byte.
        let fb = String::with_capacity(3 * (bw * bh) + bh);

        let mut canvas = Self {
            db: vec![false; w * h],
            fb,
            cp: vec![BRAILLE_EMPTY; bw * bh],
            w,
            h,
        };
        canvas.encode();

        canvas
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.w as Pixel, self.h as Pixel)
    }

    /// Turns off every dot
    pub fn clear(&mut self) {
        self.db.fill(false);
    }

    /// Turns on a square of dots. The parts of the square past the canvas edge are dropped.
    pub fn fill_square(&mut self, x: usize, y: usize, s: usize) {
        let x_end = (x + s).min(self.w);
        let y_end = (y + s).min(self.h);

        for y in y..y_end {
            for x in x..x_end {
                let i = self.xy_from(x, y);
                self.db[i] = true;
            }
        }
    }

    /// Draw the living cells of `grid`, one `cell_size` square each.
    pub fn draw(&mut self, grid: &Grid, cell_size: CellSize) {
        self.clear();

        for (pos, alive) in grid.iter() {
            if !alive {
                continue;
            }

            let rect = cell_rect(pos, cell_size);
            self.fill_square(rect.x as usize, rect.y as usize, rect.side as usize);
        }
    }

    /// Builds the text of the canvas, one line per character row, each line ending in `\n`.
    pub fn render(&mut self) -> &str {
        self.encode();

        &self.fb
    }

    fn encode(&mut self) {
        let bw = self.w.div_ceil(2);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.db.iter().enumerate() {
            if !px {
                continue;
            }

            let (x, y) = self.xy_to(n);
            self.cp[(y / 4) * bw + (x / 2)] += Self::get_hex_value(x, y);
        }

        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // every codepoint lies in U+2800..=U+28FF
            self.fb.push(char::from_u32(c).unwrap_or(' '));
        }
        self.fb.push('\n');
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}
