//! Character framebuffer the view draws into

/// Small palette; the terminal backend maps it to real colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tint {
    #[default]
    Plain,
    Road,
    Lane,
    Coin,
    Obstacle,
    Car,
    Hud,
    Warning,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub tint: Tint,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            tint: Tint::Plain,
        }
    }
}

/// Fixed-size grid of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Write one cell; out-of-bounds writes are dropped
    pub fn put(&mut self, x: u16, y: u16, ch: char, tint: Tint) {
        if x < self.width && y < self.height {
            self.cells[y as usize * self.width as usize + x as usize] = Cell { ch, tint };
        }
    }

    /// Write text starting at `x`, clipped to the frame
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, tint: Tint) {
        for (i, ch) in text.chars().enumerate() {
            let Some(col) = x.checked_add(i as u16) else {
                break;
            };
            self.put(col, y, ch, tint);
        }
    }

    /// Write text centered horizontally on row `y`
    pub fn put_centered(&mut self, y: u16, text: &str, tint: Tint) {
        let len = text.chars().count() as u16;
        let x = self.width.saturating_sub(len) / 2;
        self.put_str(x, y, text, tint);
    }

    /// Row `y` as a plain string
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }

    pub fn row(&self, y: u16) -> &[Cell] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Whole frame as text, one line per row
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
