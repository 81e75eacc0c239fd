//! The skill layer: levels read from state bytes, bonuses applied to action
//! efficiency.
//!
//! Skills are not stored anywhere — they are a *reading* of the first bytes
//! of an entity's internal state, so information transfer and entropy both
//! reshape an entity's competence as a side effect.

use ew_core::{Skill, StateBuffer};

/// Level of `skill` in [0, 1]: byte `skill.index()` of the state, / 255.
/// Missing bytes read as level 0.
#[inline]
pub fn skill_level(state: &StateBuffer, skill: Skill) -> f64 {
    state.byte(skill.index()).map_or(0.0, |b| b as f64 / 255.0)
}

/// Multiplicative efficiency bonus for `skill`.
///
/// Exactly 1.0 when the skill-bonus flag is off — the off-state must be a
/// neutral factor, not zero, so baselines stay comparable.
#[inline]
pub fn skill_bonus(state: &StateBuffer, skill: Skill, enabled: bool, coefficient: f64) -> f64 {
    if enabled {
        1.0 + skill_level(state, skill) * coefficient
    } else {
        1.0
    }
}
