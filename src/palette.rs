//! Color schemes for placed names.
//!
//! The palette is shuffled once per layout pass and then handed out round-robin by rank,
//! so neighbouring ranks differ and every pass looks a little different.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Foreground color plus the glow drawn behind it. Both are CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub color: String,
    pub shadow: String,
}

impl ColorScheme {
    pub fn new(color: &str, shadow: &str) -> Self {
        Self { color: color.to_string(), shadow: shadow.to_string() }
    }

    /// Three stacked glows of increasing blur.
    pub fn text_shadow(&self) -> String {
        let s = &self.shadow;
        format!("0 0 8px {s}, 0 0 16px {s}, 0 0 24px {s}")
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::new("#ffffff", "rgba(255, 255, 255, 0)")
    }
}

/// Red-orange primary followed by amber, violet, emerald and blue.
pub fn default_palette() -> Vec<ColorScheme> {
    vec![
        ColorScheme::new("#f87171", "rgba(248, 113, 113, 0.6)"),
        ColorScheme::new("#fbbf24", "rgba(251, 191, 36, 0.6)"),
        ColorScheme::new("#a78bfa", "rgba(167, 139, 250, 0.6)"),
        ColorScheme::new("#34d399", "rgba(52, 211, 153, 0.6)"),
        ColorScheme::new("#60a5fa", "rgba(96, 165, 250, 0.6)"),
    ]
}

/// Uniformly permuted copy of `palette`.
pub fn shuffled_palette<R: Rng + ?Sized>(palette: &[ColorScheme], rng: &mut R) -> Vec<ColorScheme> {
    let mut out = palette.to_vec();
    out.shuffle(rng);
    out
}

/// Round-robin pick. An empty palette falls back to `ColorScheme::default()`.
pub fn scheme_for_rank(palette: &[ColorScheme], rank: usize) -> ColorScheme {
    if palette.is_empty() {
        return ColorScheme::default();
    }
    palette[rank % palette.len()].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_text_shadow() {
        let scheme = ColorScheme::new("#fff", "red");
        assert_eq!(scheme.text_shadow(), "0 0 8px red, 0 0 16px red, 0 0 24px red");
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let palette = default_palette();
        let mut rng = StdRng::seed_from_u64(10);
        let shuffled = shuffled_palette(&palette, &mut rng);

        assert_eq!(shuffled.len(), palette.len());
        for scheme in &palette {
            assert!(shuffled.contains(scheme));
        }
    }

    #[test]
    fn test_shuffle_varies_with_seed() {
        let palette = default_palette();
        let orders: Vec<Vec<ColorScheme>> = (0..16)
            .map(|seed| shuffled_palette(&palette, &mut StdRng::seed_from_u64(seed)))
            .collect();
        assert!(orders.iter().any(|o| o != &orders[0]));
    }

    #[test]
    fn test_round_robin() {
        let palette = default_palette();
        assert_eq!(scheme_for_rank(&palette, 0), palette[0]);
        assert_eq!(scheme_for_rank(&palette, 4), palette[4]);
        assert_eq!(scheme_for_rank(&palette, 5), palette[0]);
        assert_eq!(scheme_for_rank(&palette, 12), palette[2]);
    }

    #[test]
    fn test_empty_palette() {
        assert_eq!(scheme_for_rank(&[], 3), ColorScheme::default());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(shuffled_palette(&[], &mut rng).is_empty());
    }
}
