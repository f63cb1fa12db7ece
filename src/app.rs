use std::time::{Duration, Instant};

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};

use crate::input::{self, Action};
use crate::model::{PresetKind, CELL_W_PX, GLYPH_PX};
use crate::render::{self, Terminal};
use crate::sim::Rain;
use crate::Cli;

pub(crate) fn run(cli: Cli) -> Result<()> {
    let mut term = Terminal::begin()?;
    let result = App::new(&cli, &term).run(&mut term);
    term.end()?;
    result
}

struct App {
    preset: PresetKind,
    rain: Rain,
    rng: StdRng,
    frame_ms: u64,
    paused: bool,
    mono: bool,
}

impl App {
    fn new(cli: &Cli, term: &Terminal) -> Self {
        let mut rng = make_rng(cli.seed);
        let rain = layout_for(term.cols, term.rows, cli.preset, &mut rng);
        let fps = cli.fps.clamp(5, 120) as u64;

        Self {
            preset: cli.preset,
            rain,
            rng,
            frame_ms: 1000 / fps,
            paused: false,
            mono: cli.mono,
        }
    }

    fn run(&mut self, term: &mut Terminal) -> Result<()> {
        let mut last_frame = Instant::now();

        loop {
            let frame_time = Duration::from_millis(self.frame_ms);

            for action in input::poll_actions(frame_time)? {
                match action {
                    Action::Quit => return Ok(()),
                    Action::CyclePreset => {
                        self.preset = self.preset.next();
                        self.relayout(term);
                    }
                    Action::Faster => self.frame_ms = self.frame_ms.saturating_sub(5).max(8),
                    Action::Slower => self.frame_ms = (self.frame_ms + 5).min(200),
                    Action::TogglePause => self.paused = !self.paused,
                    Action::Reseed => {
                        self.rng = StdRng::from_entropy();
                        self.relayout(term);
                    }
                    Action::Resize(w, h) => {
                        term.resize(w, h)?;
                        self.relayout(term);
                    }
                }
            }

            if !self.paused {
                self.rain.step(&mut self.rng);
            }

            term.cur.clear();
            render::draw_rain(&self.rain, &mut term.cur, self.mono);
            term.present()?;

            let elapsed = Instant::now().saturating_duration_since(last_frame);
            if elapsed < frame_time {
                std::thread::sleep(frame_time - elapsed);
            }
            last_frame = Instant::now();
        }
    }

    fn relayout(&mut self, term: &Terminal) {
        self.rain = layout_for(term.cols, term.rows, self.preset, &mut self.rng);
    }
}

fn make_rng(seed: u64) -> StdRng {
    if seed == 0 {
        StdRng::from_entropy()
    } else {
        StdRng::seed_from_u64(seed)
    }
}

/// Derive the simulation's pixel viewport from the terminal grid.
fn layout_for(cols: u16, rows: u16, preset: PresetKind, rng: &mut StdRng) -> Rain {
    let width = cols as f32 * CELL_W_PX;
    let height = rows as f32 * GLYPH_PX;
    Rain::layout(width, height, preset.params(), rng)
}
