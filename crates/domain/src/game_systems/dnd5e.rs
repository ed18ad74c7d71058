//! D&D 5th Edition derived values for ability scores.

/// No effective ability score may exceed this value.
pub const ABSOLUTE_SCORE_CEILING: i32 = 20;

/// Ability modifier for a score: `floor((score - 10) / 2)`.
///
/// # Example
///
/// ```
/// use charbldr_domain::game_systems::ability_modifier;
///
/// assert_eq!(ability_modifier(15), 2);
/// assert_eq!(ability_modifier(8), -1);
/// ```
pub fn ability_modifier(score: i32) -> i32 {
    // D&D uses floor division, Rust's / rounds toward zero
    (score - 10).div_euclid(2)
}

/// Modifier formatted for display, with an explicit `+` for non-negative values.
pub fn modifier_string(score: i32) -> String {
    let modifier = ability_modifier(score);
    if modifier >= 0 {
        format!("+{}", modifier)
    } else {
        modifier.to_string()
    }
}
