mod app;
mod glyphs;
mod input;
mod model;
mod render;
mod sim;

use anyhow::Result;
use clap::Parser;

use crate::model::PresetKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "glyphrain")]
#[command(version)]
#[command(about = "Matrix-style falling glyph rain for the terminal")]
#[command(after_help = "KEYS (runtime):
  q / Esc           Quit
  p                 Cycle preset
  + / -             Faster / slower
  Space             Pause
  r                 Reseed randomness")]
pub(crate) struct Cli {
    /// Rain flavor
    #[arg(long, value_enum, default_value = "enhanced")]
    pub(crate) preset: PresetKind,

    /// Frame cap, frames per second
    #[arg(long, default_value_t = 30)]
    pub(crate) fps: u32,

    /// RNG seed; 0 seeds from OS entropy
    #[arg(long, default_value_t = 0)]
    pub(crate) seed: u64,

    /// 16-color output instead of RGB ramps
    #[arg(long, default_value_t = false)]
    pub(crate) mono: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    app::run(cli)
}
