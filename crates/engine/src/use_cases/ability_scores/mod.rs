//! Ability score use cases.
//!
//! Handles point-buy allocation for a character: starting a sheet, choosing
//! a background from the catalog, typed score entry, bumps and presets, and
//! restoring a stored sheet.

mod error;

pub use error::AbilityScoreError;

use std::sync::Arc;

use charbldr_domain::{
    AbilityKey, BumpChange, BumpLevel, BumpPreset, PointBuyConfig, ScoreChange, StatBlocks,
    StatBlocksState,
};

use crate::infrastructure::ports::{BackgroundCatalog, BackgroundRecord};

/// Container for ability score use cases.
pub struct AbilityScoreUseCases {
    catalog: Arc<dyn BackgroundCatalog>,
    config: PointBuyConfig,
}

impl AbilityScoreUseCases {
    pub fn new(catalog: Arc<dyn BackgroundCatalog>, config: PointBuyConfig) -> Self {
        Self { catalog, config }
    }

    /// A fresh sheet: every ability at the minimum, no background.
    pub fn start(&self) -> StatBlocks {
        StatBlocks::new(self.config.clone())
    }

    pub fn list_backgrounds(&self) -> Result<Vec<BackgroundRecord>, AbilityScoreError> {
        Ok(self.catalog.list_backgrounds()?)
    }

    /// Resolve the abilities a background may bump.
    pub fn eligible_abilities(
        background: &BackgroundRecord,
    ) -> Result<Vec<AbilityKey>, AbilityScoreError> {
        background
            .ability_score_improvements
            .iter()
            .map(|name| {
                name.parse::<AbilityKey>()
                    .map_err(|_| AbilityScoreError::UnknownAbility {
                        background: background.name.clone(),
                        ability: name.clone(),
                    })
            })
            .collect()
    }

    /// Select a background by name, or clear it with `None` or a blank name.
    ///
    /// Either way the sheet's bumps are reset. On error the sheet is left
    /// untouched.
    pub fn select_background(
        &self,
        sheet: &mut StatBlocks,
        name: Option<&str>,
    ) -> Result<Option<BackgroundRecord>, AbilityScoreError> {
        let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
            sheet.clear_background();
            tracing::info!("Background cleared");
            return Ok(None);
        };

        let background = self
            .catalog
            .get_background(name)?
            .ok_or_else(|| AbilityScoreError::BackgroundNotFound(name.to_string()))?;
        let eligible = Self::eligible_abilities(&background)?;

        sheet.set_eligible(eligible);
        tracing::info!(
            background = %background.name,
            eligible = ?sheet.eligible(),
            "Background selected"
        );
        Ok(Some(background))
    }

    pub fn increase(&self, sheet: &mut StatBlocks, key: AbilityKey) -> ScoreChange {
        let change = sheet.increase(key);
        log_score_change(change);
        change
    }

    pub fn decrease(&self, sheet: &mut StatBlocks, key: AbilityKey) -> ScoreChange {
        let change = sheet.decrease(key);
        log_score_change(change);
        change
    }

    /// Apply a typed value to the displayed (effective) score, moving as far
    /// toward it as the rules allow.
    pub fn set_score_from_input(
        &self,
        sheet: &mut StatBlocks,
        key: AbilityKey,
        input: &str,
    ) -> Result<ScoreChange, AbilityScoreError> {
        let target: i32 = input
            .trim()
            .parse()
            .map_err(|_| AbilityScoreError::InvalidNumber(input.to_string()))?;

        let change = sheet.set_effective_score(key, target);
        log_score_change(change);
        Ok(change)
    }

    pub fn apply_bump(
        &self,
        sheet: &mut StatBlocks,
        key: AbilityKey,
        level: BumpLevel,
    ) -> BumpChange {
        let change = sheet.apply_bump(key, level);
        if let BumpChange::Denied { current, .. } = change {
            tracing::debug!(ability = %key, requested = %level, current = %current, "Bump denied");
        }
        change
    }

    pub fn remove_bump(&self, sheet: &mut StatBlocks, key: AbilityKey) -> BumpChange {
        sheet.remove_bump(key)
    }

    pub fn apply_preset(&self, sheet: &mut StatBlocks, preset: BumpPreset) -> bool {
        let applied = sheet.apply_preset(preset);
        tracing::debug!(?preset, applied, "Bump preset");
        applied
    }

    /// Rebuild a stored sheet under `background` (`None` for no background).
    pub fn restore(
        &self,
        state: StatBlocksState,
        background: Option<&str>,
    ) -> Result<StatBlocks, AbilityScoreError> {
        let eligible = match background.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => {
                let record = self
                    .catalog
                    .get_background(name)?
                    .ok_or_else(|| AbilityScoreError::BackgroundNotFound(name.to_string()))?;
                Self::eligible_abilities(&record)?
            }
            None => Vec::new(),
        };

        let sheet = StatBlocks::from_record(self.config.clone(), state, eligible)?;
        tracing::info!(
            background = background.unwrap_or("none"),
            remaining_points = sheet.remaining_points(),
            "Sheet restored"
        );
        Ok(sheet)
    }
}

fn log_score_change(change: ScoreChange) {
    if let ScoreChange::Denied { key, score } = change {
        tracing::debug!(ability = %key, score, "Score change denied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{CatalogError, MockBackgroundCatalog};
    use charbldr_domain::DomainError;
    use mockall::predicate::*;

    fn record(name: &str, abilities: &[&str]) -> BackgroundRecord {
        BackgroundRecord {
            name: name.to_string(),
            description: format!("{} background", name),
            feats: vec!["Skilled".to_string()],
            skill_proficiencies: vec![],
            ability_score_improvements: abilities.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn sage() -> BackgroundRecord {
        record("Sage", &["Intelligence", "Wisdom", "Charisma"])
    }

    fn use_cases(catalog: MockBackgroundCatalog) -> AbilityScoreUseCases {
        AbilityScoreUseCases::new(Arc::new(catalog), PointBuyConfig::default())
    }

    #[test]
    fn select_background_sets_eligibility() {
        let mut catalog = MockBackgroundCatalog::new();
        catalog
            .expect_get_background()
            .with(eq("Sage"))
            .times(1)
            .returning(|_| Ok(Some(sage())));

        let use_cases = use_cases(catalog);
        let mut sheet = use_cases.start();

        let selected = use_cases
            .select_background(&mut sheet, Some(" Sage "))
            .unwrap();
        assert_eq!(selected.map(|b| b.name), Some("Sage".to_string()));
        assert!(sheet.eligible().contains(&AbilityKey::Wisdom));
        assert!(!sheet.eligible().contains(&AbilityKey::Strength));
    }

    #[test]
    fn select_background_resets_bumps() {
        let mut catalog = MockBackgroundCatalog::new();
        catalog.expect_get_background().returning(|name| {
            Ok(match name {
                "Sage" => Some(sage()),
                "Soldier" => Some(record("Soldier", &["Strength", "Constitution", "Wisdom"])),
                _ => None,
            })
        });

        let use_cases = use_cases(catalog);
        let mut sheet = use_cases.start();
        use_cases.select_background(&mut sheet, Some("Sage")).unwrap();
        assert!(use_cases
            .apply_bump(&mut sheet, AbilityKey::Wisdom, BumpLevel::Two)
            .is_changed());

        use_cases
            .select_background(&mut sheet, Some("Soldier"))
            .unwrap();
        assert!(sheet.bumps().is_empty());
        assert!(sheet.eligible().contains(&AbilityKey::Strength));
    }

    #[test]
    fn empty_name_clears_background_without_catalog() {
        let mut catalog = MockBackgroundCatalog::new();
        catalog.expect_get_background().never();

        let use_cases = use_cases(catalog);
        let mut sheet = use_cases.start();
        sheet.set_eligible([AbilityKey::Wisdom]);
        sheet.apply_bump(AbilityKey::Wisdom, BumpLevel::One);

        assert!(use_cases
            .select_background(&mut sheet, Some("  "))
            .unwrap()
            .is_none());
        assert!(sheet.eligible().is_empty());
        assert!(sheet.bumps().is_empty());

        assert!(use_cases.select_background(&mut sheet, None).unwrap().is_none());
    }

    #[test]
    fn unknown_background_leaves_sheet_untouched() {
        let mut catalog = MockBackgroundCatalog::new();
        catalog.expect_get_background().returning(|_| Ok(None));

        let use_cases = use_cases(catalog);
        let mut sheet = use_cases.start();
        sheet.set_eligible([AbilityKey::Wisdom]);
        sheet.apply_bump(AbilityKey::Wisdom, BumpLevel::One);

        let result = use_cases.select_background(&mut sheet, Some("Pirate"));
        assert!(
            matches!(result, Err(AbilityScoreError::BackgroundNotFound(name)) if name == "Pirate")
        );
        assert_eq!(sheet.bumps().get(AbilityKey::Wisdom), BumpLevel::One);
    }

    #[test]
    fn background_with_unknown_ability_is_rejected() {
        let mut catalog = MockBackgroundCatalog::new();
        catalog
            .expect_get_background()
            .returning(|_| Ok(Some(record("Oddball", &["Wisdom", "Luck"]))));

        let use_cases = use_cases(catalog);
        let mut sheet = use_cases.start();
        let err = use_cases
            .select_background(&mut sheet, Some("Oddball"))
            .unwrap_err();
        assert!(matches!(
            err,
            AbilityScoreError::UnknownAbility { ref ability, .. } if ability == "Luck"
        ));
        assert!(sheet.eligible().is_empty());
    }

    #[test]
    fn catalog_failure_propagates() {
        let mut catalog = MockBackgroundCatalog::new();
        catalog
            .expect_list_backgrounds()
            .returning(|| Err(CatalogError::unavailable("offline")));

        let use_cases = use_cases(catalog);
        assert!(matches!(
            use_cases.list_backgrounds(),
            Err(AbilityScoreError::Catalog(_))
        ));
    }

    #[test]
    fn typed_input_moves_effective_score() {
        let use_cases = use_cases(MockBackgroundCatalog::new());
        let mut sheet = use_cases.start();

        let change = use_cases
            .set_score_from_input(&mut sheet, AbilityKey::Strength, " 14 ")
            .unwrap();
        assert_eq!(
            change,
            ScoreChange::Changed {
                key: AbilityKey::Strength,
                from: 8,
                to: 14
            }
        );
        assert_eq!(sheet.remaining_points(), 20);

        // Capped by the table maximum
        use_cases
            .set_score_from_input(&mut sheet, AbilityKey::Dexterity, "20")
            .unwrap();
        assert_eq!(sheet.stats().get(AbilityKey::Dexterity), 15);
    }

    #[test]
    fn extreme_typed_input_walks_to_the_bound() {
        let use_cases = use_cases(MockBackgroundCatalog::new());
        let mut sheet = use_cases.start();
        sheet.increase(AbilityKey::Strength);

        let change = use_cases
            .set_score_from_input(&mut sheet, AbilityKey::Strength, "-2147483648")
            .unwrap();
        assert_eq!(
            change,
            ScoreChange::Changed {
                key: AbilityKey::Strength,
                from: 9,
                to: 8
            }
        );

        let change = use_cases
            .set_score_from_input(&mut sheet, AbilityKey::Strength, "2147483647")
            .unwrap();
        assert_eq!(sheet.stats().get(AbilityKey::Strength), 15);
        assert!(change.is_changed());
    }

    #[test]
    fn typed_input_targets_bumped_value() {
        let use_cases = use_cases(MockBackgroundCatalog::new());
        let mut sheet = use_cases.start();
        sheet.set_eligible([AbilityKey::Wisdom, AbilityKey::Intelligence]);
        sheet.apply_bump(AbilityKey::Wisdom, BumpLevel::Two);

        use_cases
            .set_score_from_input(&mut sheet, AbilityKey::Wisdom, "17")
            .unwrap();
        assert_eq!(sheet.stats().get(AbilityKey::Wisdom), 15);
        assert_eq!(sheet.effective_score(AbilityKey::Wisdom), 17);
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        let use_cases = use_cases(MockBackgroundCatalog::new());
        let mut sheet = use_cases.start();

        let err = use_cases
            .set_score_from_input(&mut sheet, AbilityKey::Charisma, "twelve")
            .unwrap_err();
        assert_eq!(err.to_string(), "enter a valid number");
        assert!(matches!(err, AbilityScoreError::InvalidNumber(ref raw) if raw == "twelve"));
        assert_eq!(sheet.stats().get(AbilityKey::Charisma), 8);
    }

    #[test]
    fn denied_increase_is_reported() {
        let use_cases = use_cases(MockBackgroundCatalog::new());
        let mut sheet = use_cases.start();
        for _ in 0..7 {
            use_cases.increase(&mut sheet, AbilityKey::Constitution);
        }
        assert!(!use_cases
            .increase(&mut sheet, AbilityKey::Constitution)
            .is_changed());
        assert!(use_cases
            .decrease(&mut sheet, AbilityKey::Constitution)
            .is_changed());
    }

    #[test]
    fn presets_follow_background() {
        let mut catalog = MockBackgroundCatalog::new();
        catalog.expect_get_background().returning(|_| Ok(Some(sage())));

        let use_cases = use_cases(catalog);
        let mut sheet = use_cases.start();
        assert!(!use_cases.apply_preset(&mut sheet, BumpPreset::Balanced));

        use_cases.select_background(&mut sheet, Some("Sage")).unwrap();
        assert!(use_cases.apply_preset(&mut sheet, BumpPreset::Balanced));
        assert_eq!(sheet.bumps().total_weight(), 3);

        let focused = BumpPreset::Focused {
            plus_two: AbilityKey::Intelligence,
            plus_one: AbilityKey::Charisma,
        };
        assert!(use_cases.apply_preset(&mut sheet, focused));
        assert_eq!(sheet.bumps().get(AbilityKey::Wisdom), BumpLevel::None);

        assert!(use_cases
            .remove_bump(&mut sheet, AbilityKey::Intelligence)
            .is_changed());
    }

    #[test]
    fn restore_validates_against_background() {
        let mut catalog = MockBackgroundCatalog::new();
        catalog
            .expect_get_background()
            .with(eq("Sage"))
            .returning(|_| Ok(Some(sage())));

        let use_cases = use_cases(catalog);
        let mut sheet = use_cases.start();
        use_cases.select_background(&mut sheet, Some("Sage")).unwrap();
        use_cases.set_score_from_input(&mut sheet, AbilityKey::Intelligence, "15").unwrap();
        use_cases.apply_bump(&mut sheet, AbilityKey::Intelligence, BumpLevel::Two);
        let state = sheet.snapshot();

        let restored = use_cases.restore(state, Some("Sage")).unwrap();
        assert_eq!(restored.effective_score(AbilityKey::Intelligence), 17);
        assert_eq!(restored.remaining_points(), 18);

        // Intelligence bump is not allowed without a background
        assert!(matches!(
            use_cases.restore(state, None),
            Err(AbilityScoreError::Domain(DomainError::Constraint(_)))
        ));
    }

    #[test]
    fn every_embedded_background_resolves() {
        let catalog = crate::StaticBackgroundCatalog::load().unwrap();
        let use_cases = AbilityScoreUseCases::new(Arc::new(catalog), PointBuyConfig::default());

        for background in use_cases.list_backgrounds().unwrap() {
            let mut sheet = use_cases.start();
            use_cases
                .select_background(&mut sheet, Some(&background.name))
                .unwrap();
            assert_eq!(
                sheet.eligible().len(),
                background.ability_score_improvements.len()
            );
        }

        let mut sheet = use_cases.start();
        use_cases
            .select_background(&mut sheet, Some("acolyte"))
            .unwrap();
        let preset = BumpPreset::Focused {
            plus_two: AbilityKey::Wisdom,
            plus_one: AbilityKey::Charisma,
        };
        assert!(use_cases.apply_preset(&mut sheet, preset));
        assert_eq!(sheet.modifier_string(AbilityKey::Wisdom), "+0");
    }
}
