//! Type matchup helpers for position scoring

use crate::types::Type;

/// Immunities count as a quarter so a log scale stays finite
const IMMUNE_FLOOR: f32 = 0.25;

/// Best multiplier the attacker gets from one of its own types (STAB)
pub fn best_stab_multiplier(attacker: &[Type], defender: &[Type]) -> Option<f32> {
    attacker
        .iter()
        .map(|t| t.effectiveness_multi(defender))
        .fold(None, |best, m| Some(best.map_or(m, |b: f32| b.max(m))))
}

/// How much better `own` hits `opp` than the reverse, in doublings
///
/// 0.0 is even, +2.0 means `own` has a 4x edge. `None` when either side has
/// no known types.
pub fn matchup_edge(own: &[Type], opp: &[Type]) -> Option<f32> {
    let offense = best_stab_multiplier(own, opp)?;
    let defense = best_stab_multiplier(opp, own)?;
    Some(offense.max(IMMUNE_FLOOR).log2() - defense.max(IMMUNE_FLOOR).log2())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_stab_multiplier() {
        // Incineroar into Rillaboom: Fire is 2x
        assert_eq!(
            best_stab_multiplier(&[Type::Fire, Type::Dark], &[Type::Grass]),
            Some(2.0)
        );
        // Rillaboom into Charizard: Grass is resisted twice
        assert_eq!(
            best_stab_multiplier(&[Type::Grass], &[Type::Fire, Type::Flying]),
            Some(0.25)
        );
        assert_eq!(best_stab_multiplier(&[], &[Type::Grass]), None);
    }

    #[test]
    fn test_matchup_edge() {
        // Fire vs Grass: 2x one way, 0.5x back
        let edge = matchup_edge(&[Type::Fire], &[Type::Grass]).unwrap();
        assert!((edge - 2.0).abs() < f32::EPSILON);

        let reverse = matchup_edge(&[Type::Grass], &[Type::Fire]).unwrap();
        assert!((reverse + 2.0).abs() < f32::EPSILON);

        // Mirror is even
        assert_eq!(matchup_edge(&[Type::Water], &[Type::Water]), Some(0.0));
    }

    #[test]
    fn test_matchup_edge_with_immunity_is_finite() {
        // Normal into Ghost is 0x; Ghost into Normal is also 0x
        let edge = matchup_edge(&[Type::Normal], &[Type::Ghost]).unwrap();
        assert!(edge.is_finite());
        assert_eq!(edge, 0.0);
        assert_eq!(matchup_edge(&[Type::Normal], &[]), None);
    }
}
