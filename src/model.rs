use clap::ValueEnum;
use rand::{rngs::StdRng, Rng};

/// Rendered glyph height in simulation pixels.
pub(crate) const GLYPH_PX: f32 = 20.0;

/// Assumed terminal cell width in simulation pixels (cells are ~1:2).
pub(crate) const CELL_W_PX: f32 = 10.0;

/// Horizontal jitter applied to a column's anchor position.
pub(crate) const X_JITTER: f32 = 3.0;

/// Chance on recycle that speed, charset mix, or the glyph run is resampled.
pub(crate) const RECYCLE_RESAMPLE: f64 = 0.2;

/// One vertical stream of falling glyphs.
#[derive(Clone, Debug)]
pub(crate) struct Column {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) speed: f32,
    pub(crate) category: SpeedCategory,
    pub(crate) glyphs: Vec<char>,
    /// Per-glyph chance of re-rolling each frame.
    pub(crate) mutation: f64,
    pub(crate) glow: f32,
    /// Fade window near the bottom edge, as a fraction of viewport height.
    pub(crate) fade_len: f32,
    /// Share of katakana vs Latin glyphs in this stream.
    pub(crate) katakana: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SpeedCategory {
    Slow,
    Medium,
    Fast,
}

pub(crate) const SPEED_CATEGORIES: [SpeedCategory; 3] = [
    SpeedCategory::Slow,
    SpeedCategory::Medium,
    SpeedCategory::Fast,
];

impl SpeedCategory {
    /// Pixels-per-frame bounds for this tier.
    pub(crate) fn range(self) -> (f32, f32) {
        match self {
            SpeedCategory::Slow => (0.5, 1.0),
            SpeedCategory::Medium => (1.2, 1.8),
            SpeedCategory::Fast => (2.0, 2.5),
        }
    }

    pub(crate) fn sample(rng: &mut StdRng) -> Self {
        SPEED_CATEGORIES[rng.gen_range(0..SPEED_CATEGORIES.len())]
    }

    pub(crate) fn sample_speed(self, rng: &mut StdRng) -> f32 {
        let (min, max) = self.range();
        rng.gen_range(min..max)
    }
}

/// Tuning knobs for one rain flavor.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Params {
    /// Distance between column anchors, in px.
    pub(crate) spacing: f32,
    pub(crate) len_min: usize,
    pub(crate) len_max: usize,
    /// Upper bound for a column's per-glyph mutation chance.
    pub(crate) mutation_max: f64,
    pub(crate) glow_min: f32,
    pub(crate) glow_max: f32,
    pub(crate) fade_min: f32,
    pub(crate) fade_max: f32,
    pub(crate) katakana_min: f64,
    pub(crate) katakana_max: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum PresetKind {
    /// Latin-only streams, wider spacing, no fade window.
    Classic,
    /// Katakana-heavy streams, denser columns, glow and fade.
    Enhanced,
}

impl PresetKind {
    pub(crate) fn next(self) -> Self {
        match self {
            PresetKind::Classic => PresetKind::Enhanced,
            PresetKind::Enhanced => PresetKind::Classic,
        }
    }

    pub(crate) fn params(self) -> Params {
        match self {
            PresetKind::Classic => Params {
                spacing: 20.0,
                len_min: 10,
                len_max: 39,
                mutation_max: 0.10,
                glow_min: 0.5,
                glow_max: 0.5,
                fade_min: 0.0,
                fade_max: 0.0,
                katakana_min: 0.0,
                katakana_max: 0.0,
            },
            PresetKind::Enhanced => Params {
                spacing: 14.0,
                len_min: 5,
                len_max: 29,
                mutation_max: 0.15,
                glow_min: 0.5,
                glow_max: 1.0,
                fade_min: 0.2,
                fade_max: 0.5,
                katakana_min: 0.6,
                katakana_max: 0.9,
            },
        }
    }
}
