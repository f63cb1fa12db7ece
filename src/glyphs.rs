use rand::{rngs::StdRng, Rng};

/// Printable Latin set used by plain streams.
pub(crate) const LATIN: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789$+-*/=%\"'#&_(),.;:?!\\|{}<>[]^~";

/// Half-width katakana block, the signature rain glyphs.
pub(crate) const KATAKANA: &[char] = &[
    'ｦ', 'ｧ', 'ｨ', 'ｩ', 'ｪ', 'ｫ', 'ｬ', 'ｭ', 'ｮ', 'ｯ', 'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ',
    'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ', 'ﾁ', 'ﾂ', 'ﾃ', 'ﾄ',
    'ﾅ', 'ﾆ', 'ﾇ', 'ﾈ', 'ﾉ', 'ﾊ', 'ﾋ', 'ﾌ', 'ﾍ', 'ﾎ', 'ﾏ', 'ﾐ', 'ﾑ', 'ﾒ', 'ﾓ',
    'ﾔ', 'ﾕ', 'ﾖ', 'ﾗ', 'ﾘ', 'ﾙ', 'ﾚ', 'ﾛ', 'ﾜ', 'ﾝ',
];

/// Draw one glyph, katakana with the given probability, Latin otherwise.
pub(crate) fn random_glyph(katakana_ratio: f64, rng: &mut StdRng) -> char {
    if katakana_ratio > 0.0 && rng.gen_bool(katakana_ratio) {
        KATAKANA[rng.gen_range(0..KATAKANA.len())]
    } else {
        LATIN[rng.gen_range(0..LATIN.len())] as char
    }
}

pub(crate) fn glyph_run(len: usize, katakana_ratio: f64, rng: &mut StdRng) -> Vec<char> {
    (0..len).map(|_| random_glyph(katakana_ratio, rng)).collect()
}
