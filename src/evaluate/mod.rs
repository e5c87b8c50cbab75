pub mod dice_roll;
mod expression;
mod outcome;
pub mod pool;
mod random;

use std::borrow::Cow;

use tracing::debug;

pub use outcome::Outcome;
pub use random::{LoadedDice, RandomSource};

use crate::{error::EvalError, maps::DiceMaps, parse::Roll};

/// Evaluates the rolls of one YADN string in order.
///
/// A dice map definition is visible to every roll after it. With more than
/// one roll the outcomes are returned together as a compound, leaving out
/// the map definitions.
pub fn evaluate_rolls<R: RandomSource + ?Sized>(
    rolls: &[Roll],
    rng: &mut R,
    maps: &DiceMaps,
) -> Result<Outcome, EvalError> {
    let mut maps = Cow::Borrowed(maps);
    let mut outcomes = Vec::with_capacity(rolls.len());

    for roll in rolls {
        match roll {
            Roll::DiceMap { name, map } => {
                debug!(%name, faces = map.len(), "defined dice map");
                maps.to_mut().insert(name.clone(), map.clone());
            }
            Roll::Expression(expression) => {
                let outcome = expression.evaluate(rng, &maps)?;
                debug!(%expression, %outcome, "rolled");
                outcomes.push(outcome);
            }
        }
    }

    if rolls.len() > 1 {
        if outcomes.is_empty() {
            return Err(EvalError::NothingToRoll);
        }
        return Ok(Outcome::Compound(outcomes));
    }
    outcomes.pop().ok_or(EvalError::NothingToRoll)
}
