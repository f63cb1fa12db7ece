use rand::{rngs::StdRng, Rng};

use crate::glyphs;
use crate::model::{Column, Params, SpeedCategory, GLYPH_PX, RECYCLE_RESAMPLE, X_JITTER};

/// Full rain state for one viewport. Owned by the app loop and advanced by a
/// plain transform each frame, so the update logic is testable without a
/// terminal attached.
#[derive(Clone, Debug)]
pub(crate) struct Rain {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) params: Params,
    pub(crate) columns: Vec<Column>,
}

impl Rain {
    /// Lay out a fresh column set for a viewport, replacing any prior state.
    /// A zero-sized viewport yields no columns.
    pub(crate) fn layout(width: f32, height: f32, params: Params, rng: &mut StdRng) -> Self {
        let mut columns = Vec::new();
        if width > 0.0 && height > 0.0 {
            let n = (width / params.spacing).floor() as usize;
            columns.reserve(n);
            for i in 0..n {
                columns.push(new_column(i, n, width, height, &params, rng));
            }
        }
        Self {
            width,
            height,
            params,
            columns,
        }
    }

    /// Advance every column by one frame: fall, recycle streams that have
    /// scrolled fully past the bottom edge, shimmer the rest.
    pub(crate) fn step(&mut self, rng: &mut StdRng) {
        for col in &mut self.columns {
            col.y += col.speed;

            if col.y > self.height + col.glyphs.len() as f32 * GLYPH_PX {
                recycle(col, &self.params, rng);
                continue;
            }

            if col.mutation > 0.0 {
                for glyph in &mut col.glyphs {
                    if rng.gen_bool(col.mutation) {
                        *glyph = glyphs::random_glyph(col.katakana, rng);
                    }
                }
            }
        }
    }
}

fn new_column(
    i: usize,
    n: usize,
    width: f32,
    height: f32,
    params: &Params,
    rng: &mut StdRng,
) -> Column {
    let category = SpeedCategory::sample(rng);
    let katakana = sample_f64(params.katakana_min, params.katakana_max, rng);
    let len = rng.gen_range(params.len_min..=params.len_max);

    Column {
        x: i as f32 * width / n as f32 + rng.gen_range(-X_JITTER..X_JITTER),
        y: rng.gen_range(-2.0 * height..0.0),
        speed: category.sample_speed(rng),
        category,
        glyphs: glyphs::glyph_run(len, katakana, rng),
        mutation: rng.gen_range(0.0..params.mutation_max),
        glow: sample_f32(params.glow_min, params.glow_max, rng),
        fade_len: sample_f32(params.fade_min, params.fade_max, rng),
        katakana,
    }
}

/// Send a stream back above the viewport. Speed tier, charset mix, and glyph
/// run each resample with a small probability and are otherwise retained;
/// the fade window always re-rolls.
fn recycle(col: &mut Column, params: &Params, rng: &mut StdRng) {
    if rng.gen_bool(RECYCLE_RESAMPLE) {
        col.category = SpeedCategory::sample(rng);
        col.speed = col.category.sample_speed(rng);
    }
    if rng.gen_bool(RECYCLE_RESAMPLE) {
        col.katakana = sample_f64(params.katakana_min, params.katakana_max, rng);
    }
    if rng.gen_bool(RECYCLE_RESAMPLE) {
        let len = rng.gen_range(params.len_min..=params.len_max);
        col.glyphs = glyphs::glyph_run(len, col.katakana, rng);
    }
    col.fade_len = sample_f32(params.fade_min, params.fade_max, rng);
    col.y = -rng.gen_range(0.0..500.0) - col.glyphs.len() as f32 * GLYPH_PX;
}

fn sample_f32(min: f32, max: f32, rng: &mut StdRng) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

fn sample_f64(min: f64, max: f64, rng: &mut StdRng) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PresetKind;
    use rand::SeedableRng;
    use rstest::rstest;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[rstest]
    #[case(1000.0, 14.0, 71)]
    #[case(1000.0, 20.0, 50)]
    #[case(14.0, 14.0, 1)]
    #[case(13.0, 14.0, 0)]
    fn column_count_follows_spacing(#[case] w: f32, #[case] spacing: f32, #[case] expect: usize) {
        let mut params = PresetKind::Enhanced.params();
        params.spacing = spacing;
        let rain = Rain::layout(w, 600.0, params, &mut rng(1));
        assert_eq!(rain.columns.len(), expect);
    }

    #[test]
    fn zero_viewport_yields_no_columns() {
        let params = PresetKind::Enhanced.params();
        assert!(Rain::layout(0.0, 600.0, params, &mut rng(1)).columns.is_empty());
        assert!(Rain::layout(800.0, 0.0, params, &mut rng(1)).columns.is_empty());
    }

    #[test]
    fn layout_count_is_stable_across_reruns() {
        let params = PresetKind::Enhanced.params();
        let a = Rain::layout(777.0, 431.0, params, &mut rng(1));
        let b = Rain::layout(777.0, 431.0, params, &mut rng(99));
        assert_eq!(a.columns.len(), b.columns.len());
    }

    #[test]
    fn fresh_columns_start_above_the_viewport() {
        let h = 500.0;
        let rain = Rain::layout(1000.0, h, PresetKind::Enhanced.params(), &mut rng(2));
        for col in &rain.columns {
            assert!(col.y < 0.0 && col.y >= -2.0 * h, "offset {} out of range", col.y);
        }
    }

    #[test]
    fn speeds_stay_inside_their_tier_for_the_assignment() {
        let mut rain = Rain::layout(700.0, 80.0, PresetKind::Enhanced.params(), &mut rng(4));
        let mut r = rng(5);
        for _ in 0..3000 {
            rain.step(&mut r);
            for col in &rain.columns {
                let (min, max) = col.category.range();
                assert!(col.speed >= min && col.speed < max);
            }
        }
    }

    #[test]
    fn glyph_lengths_stay_bounded_across_recycles() {
        let params = PresetKind::Enhanced.params();
        // Short viewport so recycles happen constantly.
        let mut rain = Rain::layout(300.0, 60.0, params, &mut rng(6));
        let mut r = rng(7);
        for _ in 0..3000 {
            rain.step(&mut r);
            for col in &rain.columns {
                let len = col.glyphs.len();
                assert!(len >= params.len_min && len <= params.len_max);
            }
        }
    }

    #[test]
    fn recycle_boundary_is_height_plus_rendered_extent() {
        let h = 600.0;
        let mut rain = Rain::layout(100.0, h, PresetKind::Enhanced.params(), &mut rng(8));
        let mut r = rng(9);

        // 10 glyphs at 20 px: just past the bottom edge is still falling.
        rain.columns[0].glyphs.truncate(10);
        rain.columns[0].y = h + 1.0;
        rain.columns[0].speed = 0.0;
        rain.step(&mut r);
        assert!(rain.columns[0].y > 0.0, "column recycled too early");

        // Past the full rendered extent it must wrap back above the top.
        rain.columns[0].y = h + 300.0;
        rain.step(&mut r);
        assert!(rain.columns[0].y < 0.0, "column failed to recycle");
    }

    #[test]
    fn recycled_offset_is_always_negative() {
        let h = 400.0;
        let mut rain = Rain::layout(200.0, h, PresetKind::Enhanced.params(), &mut rng(10));
        let mut r = rng(11);
        for _ in 0..200 {
            for col in &mut rain.columns {
                col.y = h * 3.0;
            }
            rain.step(&mut r);
            for col in &rain.columns {
                assert!(col.y < 0.0, "recycled offset {} not above viewport", col.y);
            }
        }
    }

    #[test]
    fn zero_mutation_keeps_the_glyph_run_frozen() {
        let mut rain = Rain::layout(500.0, 800.0, PresetKind::Enhanced.params(), &mut rng(12));
        let col = &mut rain.columns[0];
        col.mutation = 0.0;
        col.y = -1.0e6;
        col.speed = 0.5;
        let frozen = col.glyphs.clone();

        let mut r = rng(13);
        for _ in 0..1000 {
            rain.step(&mut r);
        }
        assert_eq!(rain.columns[0].glyphs, frozen);
    }

    #[test]
    fn classic_preset_rains_latin_only() {
        let mut rain = Rain::layout(600.0, 100.0, PresetKind::Classic.params(), &mut rng(14));
        let mut r = rng(15);
        for _ in 0..2000 {
            rain.step(&mut r);
            for col in &rain.columns {
                assert!(col.glyphs.iter().all(|ch| ch.is_ascii()));
            }
        }
    }

    #[test]
    fn mutation_rates_stay_below_preset_bound() {
        let params = PresetKind::Enhanced.params();
        let rain = Rain::layout(1000.0, 500.0, params, &mut rng(16));
        for col in &rain.columns {
            assert!(col.mutation >= 0.0 && col.mutation < params.mutation_max);
        }
    }
}
