//! Spell damage scaling.
//!
//! Computes the effective damage dice when a spell is cast from a
//! higher-level slot, and the cantrip damage progression by caster level.
//! Spell records come from an external content store and are treated as
//! untrusted: malformed dice strings fall through unchanged instead of
//! failing.

use crate::dice::DiceExpression;
use serde::{Deserialize, Serialize};

/// How a spell's damage grows when cast from a slot above its base level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellScaling {
    /// Extra dice added per slot level above the spell's level, in `XdY`
    /// notation (e.g. `"1d6"` for Fireball).
    pub dice_per_level: Option<String>,
}

/// Compute the damage dice string for casting at `slot_level`.
///
/// Returns `base_dice` unchanged when there is nothing to scale: no scaling
/// rule, a slot at or below the spell's own level, or dice strings that
/// don't parse. When the extra die matches the base die the pools merge into
/// one expression (`8d6` + 2 levels of `1d6` is `10d6`); otherwise the extra
/// pool is appended (`2d8 + 2d6`), since different die sizes can't merge.
///
/// Total: every branch returns a string, never panics.
pub fn upcast_damage(
    base_dice: &str,
    spell_level: u8,
    slot_level: u8,
    scaling: Option<&SpellScaling>,
) -> String {
    let Some(scaling) = scaling else {
        return base_dice.to_string();
    };
    if slot_level <= spell_level {
        return base_dice.to_string();
    }
    let Some(base) = DiceExpression::parse(base_dice) else {
        return base_dice.to_string();
    };
    let Some(extra) = scaling
        .dice_per_level
        .as_deref()
        .and_then(DiceExpression::parse)
    else {
        return base_dice.to_string();
    };

    let level_diff = u32::from(slot_level - spell_level);
    if extra.die == base.die {
        format!("{}d{}", base.count + extra.count * level_diff, base.die)
    } else {
        format!("{} + {}d{}", base_dice, extra.count * level_diff, extra.die)
    }
}

/// A spell record as supplied by the content store.
///
/// Only the fields this crate computes over; renderers carry the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellData {
    pub name: String,
    /// 0 for cantrips.
    pub level: u8,
    #[serde(default)]
    pub damage_dice: Option<String>,
    #[serde(default)]
    pub scaling: Option<SpellScaling>,
}

impl SpellData {
    /// Deserialize a record from content-store JSON.
    pub fn from_json(json: &str) -> Result<SpellData, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check if this is a cantrip.
    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }

    /// Number of damage dice for a cantrip at the given caster level
    /// (increases at levels 5, 11, and 17).
    pub fn cantrip_dice_count(&self, caster_level: u8) -> u32 {
        match caster_level {
            1..=4 => 1,
            5..=10 => 2,
            11..=16 => 3,
            _ => 4,
        }
    }

    /// Damage dice for a cantrip at the given caster level, e.g. `1d10`
    /// becomes `2d10` at caster level 5. Returns the base dice unchanged if
    /// they don't parse, and `None` if the spell deals no damage.
    pub fn cantrip_damage_dice(&self, caster_level: u8) -> Option<String> {
        let base_dice = self.damage_dice.as_ref()?;
        match DiceExpression::parse(base_dice) {
            Some(base) => Some(format!(
                "{}d{}",
                self.cantrip_dice_count(caster_level),
                base.die
            )),
            None => Some(base_dice.clone()),
        }
    }

    /// Damage dice when cast from a slot of the given level. `None` if the
    /// spell deals no damage.
    pub fn effective_damage_dice(&self, slot_level: u8) -> Option<String> {
        let base_dice = self.damage_dice.as_ref()?;
        Some(upcast_damage(
            base_dice,
            self.level,
            slot_level,
            self.scaling.as_ref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaling(dice: &str) -> SpellScaling {
        SpellScaling {
            dice_per_level: Some(dice.to_string()),
        }
    }

    #[test]
    fn test_upcast_at_own_level() {
        assert_eq!(upcast_damage("8d6", 3, 3, Some(&scaling("1d6"))), "8d6");
    }

    #[test]
    fn test_upcast_below_own_level() {
        // Defensive: a slot below the spell's level never scales
        assert_eq!(upcast_damage("8d6", 3, 2, Some(&scaling("1d6"))), "8d6");
    }

    #[test]
    fn test_upcast_same_die_merges() {
        // Fireball two levels up: 8d6 + 2x 1d6 = 10d6
        assert_eq!(upcast_damage("8d6", 3, 5, Some(&scaling("1d6"))), "10d6");
    }

    #[test]
    fn test_upcast_different_die_concatenates() {
        assert_eq!(
            upcast_damage("2d8", 5, 7, Some(&scaling("1d6"))),
            "2d8 + 2d6"
        );
    }

    #[test]
    fn test_upcast_multi_dice_per_level() {
        // Scorching Ray style: one extra 2d6 ray per level
        assert_eq!(upcast_damage("2d6", 2, 4, Some(&scaling("2d6"))), "6d6");
    }

    #[test]
    fn test_upcast_without_scaling() {
        assert_eq!(upcast_damage("8d6", 3, 5, None), "8d6");
    }

    #[test]
    fn test_upcast_with_empty_scaling() {
        let empty = SpellScaling::default();
        assert_eq!(upcast_damage("8d6", 3, 5, Some(&empty)), "8d6");
    }

    #[test]
    fn test_upcast_malformed_base_unchanged() {
        assert_eq!(
            upcast_damage("5 fire", 1, 3, Some(&scaling("1d10"))),
            "5 fire"
        );
    }

    #[test]
    fn test_upcast_malformed_extra_unchanged() {
        assert_eq!(upcast_damage("8d6", 3, 5, Some(&scaling("garbage"))), "8d6");
    }

    #[test]
    fn test_upcast_never_shrinks() {
        let base = DiceExpression::parse("8d6").unwrap();
        for slot_level in 3..=9 {
            let scaled = upcast_damage("8d6", 3, slot_level, Some(&scaling("1d6")));
            let parsed = DiceExpression::parse(&scaled).unwrap();
            assert!(parsed.count >= base.count);
            assert_eq!(parsed.die, base.die);
        }
    }

    #[test]
    fn test_cantrip_dice_count() {
        let fire_bolt = SpellData {
            name: "Fire Bolt".to_string(),
            level: 0,
            damage_dice: Some("1d10".to_string()),
            scaling: None,
        };
        assert!(fire_bolt.is_cantrip());
        assert_eq!(fire_bolt.cantrip_dice_count(1), 1);
        assert_eq!(fire_bolt.cantrip_dice_count(4), 1);
        assert_eq!(fire_bolt.cantrip_dice_count(5), 2);
        assert_eq!(fire_bolt.cantrip_dice_count(11), 3);
        assert_eq!(fire_bolt.cantrip_dice_count(17), 4);
        assert_eq!(fire_bolt.cantrip_damage_dice(5).as_deref(), Some("2d10"));
    }

    #[test]
    fn test_effective_damage_dice() {
        let fireball = SpellData {
            name: "Fireball".to_string(),
            level: 3,
            damage_dice: Some("8d6".to_string()),
            scaling: Some(scaling("1d6")),
        };
        assert_eq!(fireball.effective_damage_dice(3).as_deref(), Some("8d6"));
        assert_eq!(fireball.effective_damage_dice(6).as_deref(), Some("11d6"));

        let shield = SpellData {
            name: "Shield".to_string(),
            level: 1,
            damage_dice: None,
            scaling: None,
        };
        assert_eq!(shield.effective_damage_dice(3), None);
    }

    #[test]
    fn test_spell_from_json() {
        let spell = SpellData::from_json(
            r#"{
                "name": "Fireball",
                "level": 3,
                "damage_dice": "8d6",
                "scaling": { "dice_per_level": "1d6" }
            }"#,
        )
        .unwrap();
        assert_eq!(spell.name, "Fireball");
        assert_eq!(spell.effective_damage_dice(5).as_deref(), Some("10d6"));

        // Missing optional fields are fine
        let utility = SpellData::from_json(r#"{ "name": "Misty Step", "level": 2 }"#).unwrap();
        assert_eq!(utility.damage_dice, None);
        assert_eq!(utility.scaling, None);
    }
}
