//! D&D 5e spellcasting rules.
//!
//! This crate provides:
//! - Dice notation parsing and rolling (`XdY` strings)
//! - Upcast damage scaling (casting a spell from a higher-level slot)
//! - Spell slot availability and tracking
//!
//! Everything here is a pure function over immutable inputs: no I/O, no
//! shared state, safe to call from any thread. Spell content and slot
//! tables come from external stores and are handled defensively: malformed
//! dice strings parse to `None` or fall through unchanged rather than
//! failing.
//!
//! # Quick Start
//!
//! ```
//! use grimoire::{upcast_damage, SlotTable, SpellScaling};
//!
//! // Fireball (8d6, 3rd level) cast from a 5th-level slot
//! let scaling = SpellScaling { dice_per_level: Some("1d6".to_string()) };
//! assert_eq!(upcast_damage("8d6", 3, 5, Some(&scaling)), "10d6");
//!
//! // Which slots can cast it?
//! let mut slots = SlotTable::new();
//! slots.set(3, 0);
//! slots.set(4, 1);
//! slots.set(5, 2);
//! assert_eq!(slots.available_levels(3), vec![4, 5]);
//! ```

pub mod dice;
pub mod slots;
pub mod spells;

// Primary public API
pub use dice::{DiceExpression, NotationError, RollResult};
pub use slots::{SlotError, SlotState, SlotTable};
pub use spells::{upcast_damage, SpellData, SpellScaling};
