//! Dice notation values.
//!
//! Spell content stores damage as plain `XdY` strings ("8d6"). This module
//! parses that notation into a count/die pair and can roll it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for dice notation at the data-ingestion boundary.
///
/// Calculation paths never produce this; they treat an unparsable string as
/// "no expression" via [`DiceExpression::parse`] returning `None`.
#[derive(Debug, Error)]
pub enum NotationError {
    #[error("Invalid dice notation: {0}")]
    InvalidNotation(String),
}

/// A dice expression: `count` rolls of a `die`-sided die.
///
/// Both fields are positive; construction goes through [`parse`] or
/// [`new`], which enforce that.
///
/// [`parse`]: DiceExpression::parse
/// [`new`]: DiceExpression::new
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpression {
    pub count: u32,
    pub die: u32,
}

impl DiceExpression {
    /// Build an expression directly. Returns `None` if either value is zero.
    pub fn new(count: u32, die: u32) -> Option<DiceExpression> {
        if count == 0 || die == 0 {
            return None;
        }
        Some(DiceExpression { count, die })
    }

    /// Parse `XdY` notation.
    ///
    /// The grammar is strict: base-10 digits, a lowercase `d`, base-10
    /// digits, nothing else. No whitespace, no modifiers, no multiple
    /// components. Anything that doesn't match (including a zero count or
    /// zero die) yields `None`, an expected outcome for content-store data
    /// rather than an error.
    pub fn parse(notation: &str) -> Option<DiceExpression> {
        let (count_str, die_str) = notation.split_once('d')?;
        if count_str.is_empty()
            || die_str.is_empty()
            || !count_str.bytes().all(|b| b.is_ascii_digit())
            || !die_str.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let count = count_str.parse().ok()?;
        let die = die_str.parse().ok()?;
        DiceExpression::new(count, die)
    }

    /// Roll the expression and return the result.
    pub fn roll(&self) -> RollResult {
        self.roll_with_rng(&mut rand::thread_rng())
    }

    /// Roll with a specific RNG (useful for testing).
    pub fn roll_with_rng<R: Rng>(&self, rng: &mut R) -> RollResult {
        let rolls: Vec<u32> = (0..self.count)
            .map(|_| rng.gen_range(1..=self.die))
            .collect();
        let total = rolls.iter().sum();
        RollResult {
            expression: *self,
            rolls,
            total,
        }
    }
}

impl FromStr for DiceExpression {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiceExpression::parse(s).ok_or_else(|| NotationError::InvalidNotation(s.to_string()))
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.die)
    }
}

/// Result of rolling a dice expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollResult {
    pub expression: DiceExpression,
    pub rolls: Vec<u32>,
    pub total: u32,
}

impl RollResult {
    /// Format the individual dice results for display.
    pub fn dice_display(&self) -> String {
        format!(
            "[{}]",
            self.rolls
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.dice_display(), self.total)
    }
}

/// Convenience function to roll dice from a notation string.
pub fn roll(notation: &str) -> Result<RollResult, NotationError> {
    let expr: DiceExpression = notation.parse()?;
    Ok(expr.roll())
}
