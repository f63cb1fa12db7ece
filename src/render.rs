use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

use crate::model::{Column, GLYPH_PX};
use crate::sim::Rain;

/* -----------------------------
   Styling, pure functions of column state
------------------------------ */

/// Brightness by position in the stream: the tail end is the bright head,
/// glyphs further up are progressively dimmer.
pub(crate) fn glyph_brightness(idx: usize, len: usize) -> f32 {
    (0.2 + idx as f32 / len as f32 * 0.8).min(1.0)
}

/// Whole-stream attenuation once the trailing edge crosses the fade window
/// near the bottom of the viewport. 1.0 above the window, 0.0 once fully
/// through it.
pub(crate) fn fade_factor(col: &Column, height: f32) -> f32 {
    if col.fade_len <= 0.0 {
        return 1.0;
    }
    let bottom = col.y + col.glyphs.len() as f32 * GLYPH_PX;
    let fade_start = height * (1.0 - col.fade_len);
    if bottom <= fade_start {
        return 1.0;
    }
    (1.0 - (bottom - fade_start) / (height * col.fade_len)).max(0.0)
}

pub(crate) fn glyph_color(idx: usize, len: usize, glow: f32, fade: f32, mono: bool) -> Color {
    let head = idx + 1 == len;
    let near_head = !head && idx + 3 >= len;
    let level = glyph_brightness(idx, len) * fade;

    if mono {
        return if head {
            Color::White
        } else if level > 0.45 {
            Color::Green
        } else {
            Color::DarkGreen
        };
    }

    let scaled = |c: f32, f: f32| (c * f).clamp(0.0, 255.0) as u8;
    if head {
        // Near-white head; stronger glow pushes it toward full brightness.
        let f = (0.7 + 0.3 * glow) * fade;
        Color::Rgb {
            r: scaled(200.0, f),
            g: scaled(255.0, f),
            b: scaled(200.0, f),
        }
    } else if near_head {
        let w = 80.0 * glow;
        Color::Rgb {
            r: scaled(w, level),
            g: scaled(255.0, level),
            b: scaled(w, level),
        }
    } else {
        Color::Rgb {
            r: 0,
            g: scaled(235.0, level),
            b: 0,
        }
    }
}

/* -----------------------------
   Cell projection
------------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }

    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub(crate) fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = cell;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}

/// Project the rain onto terminal cells. The buffer spans the simulated
/// viewport; glyphs falling outside the grid are culled.
pub(crate) fn draw_rain(rain: &Rain, buf: &mut CellBuffer, mono: bool) {
    if buf.w == 0 || buf.h == 0 {
        return;
    }
    let cell_w = rain.width / buf.w as f32;
    let cell_h = rain.height / buf.h as f32;

    for col in &rain.columns {
        let fade = fade_factor(col, rain.height);
        if fade <= 0.0 {
            continue;
        }

        let cx = (col.x / cell_w).round() as i32;
        if cx < 0 || cx >= buf.w as i32 {
            continue;
        }

        let len = col.glyphs.len();
        for (i, &ch) in col.glyphs.iter().enumerate() {
            let cy = ((col.y + i as f32 * GLYPH_PX) / cell_h).floor() as i32;
            if cy < 0 || cy >= buf.h as i32 {
                continue;
            }
            buf.set(
                cx as u16,
                cy as u16,
                Cell {
                    ch,
                    fg: glyph_color(i, len, col.glow, fade, mono),
                },
            );
        }
    }
}

/* -----------------------------
   Terminal presenter
------------------------------ */

pub(crate) struct Terminal {
    out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            SetBackgroundColor(Color::Black),
            Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize(&mut self, cols: u16, rows: u16) -> anyhow::Result<()> {
        self.cols = cols;
        self.rows = rows;
        self.prev = CellBuffer::new(cols, rows);
        self.cur = CellBuffer::new(cols, rows);
        execute!(self.out, SetBackgroundColor(Color::Black), Clear(ClearType::All))?;
        Ok(())
    }

    /// Flush changed cells only, batching color switches.
    pub(crate) fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate, SetBackgroundColor(Color::Black))?;

        let mut last_fg = None;
        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let cell = self.cur.cells[i];
                if cell == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;
                if last_fg != Some(cell.fg) {
                    queue!(self.out, SetForegroundColor(cell.fg))?;
                    last_fg = Some(cell.fg);
                }
                queue!(self.out, Print(cell.ch))?;
            }
        }

        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}
