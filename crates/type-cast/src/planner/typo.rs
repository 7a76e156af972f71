//! Error-kind selection.

use rand::{Rng, RngCore};

use crate::config::AdvancedTypingOptions;

/// Which shape a planted error takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypoKind {
    /// Emit the intended character twice, then correct by deleting one.
    Double,
    /// Emit the next character before this one, then correct by retyping both.
    Transpose,
    /// Substitute a QWERTY neighbor, then correct by retyping the intended one.
    NearbyKey,
}

/// Weighted choice among the three typo kinds. Returns `None` if every
/// weight is non-positive (no error kind is selectable).
pub fn choose_typo_kind(
    advanced: &AdvancedTypingOptions,
    rng: &mut dyn RngCore,
) -> Option<TypoKind> {
    let weights = [
        (TypoKind::Double, advanced.typo_double_weight.max(0.0)),
        (TypoKind::Transpose, advanced.typo_transpose_weight.max(0.0)),
        (TypoKind::NearbyKey, advanced.typo_nearby_key_weight.max(0.0)),
    ];
    let total: f32 = weights.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return None;
    }

    let mut pick = rng.random_range(0.0..total);
    for (kind, weight) in weights {
        if pick < weight {
            return Some(kind);
        }
        pick -= weight;
    }
    // Floating-point rounding at the boundary: fall back to the last kind.
    Some(TypoKind::NearbyKey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn single_nonzero_weight_always_wins() {
        let advanced = AdvancedTypingOptions {
            typo_double_weight: 1.0,
            typo_transpose_weight: 0.0,
            typo_nearby_key_weight: 0.0,
            ..AdvancedTypingOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(
                choose_typo_kind(&advanced, &mut rng),
                Some(TypoKind::Double)
            );
        }
    }

    #[test]
    fn all_zero_weights_yields_none() {
        let advanced = AdvancedTypingOptions {
            typo_double_weight: 0.0,
            typo_transpose_weight: 0.0,
            typo_nearby_key_weight: 0.0,
            ..AdvancedTypingOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(choose_typo_kind(&advanced, &mut rng), None);
    }
}
