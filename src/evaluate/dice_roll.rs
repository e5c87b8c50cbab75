use super::{pool::pool_concatenate, RandomSource};
use crate::error::EvalError;

/// Re-rolls allowed for a single exploding die.
const MAX_EXPLOSIONS: usize = 1000;

/// Dice allowed in a single roll.
pub const MAX_DICE: i64 = 999;

fn check_size(size: i64) -> Result<(), EvalError> {
    if size < 1 {
        return Err(EvalError::InvalidDieSize(size));
    }
    Ok(())
}

fn check_count(num: i64) -> Result<(), EvalError> {
    if num > MAX_DICE {
        return Err(EvalError::TooManyDice(num));
    }
    Ok(())
}

fn checked_sum(values: &[i64]) -> Result<i64, EvalError> {
    values
        .iter()
        .try_fold(0i64, |total, &value| total.checked_add(value))
        .ok_or(EvalError::Overflow)
}

/// Keeps rolling a die that landed on its maximum, adding every re-roll.
fn explode<R: RandomSource + ?Sized>(first: i64, size: i64, rng: &mut R) -> Result<i64, EvalError> {
    let mut total = first;
    let mut last = first;

    for _ in 0..MAX_EXPLOSIONS {
        if last != size {
            break;
        }
        last = rng.randint(1, size);
        total = total.checked_add(last).ok_or(EvalError::Overflow)?;
    }

    Ok(total)
}

/// Rolls `num` dice with `size` sides. A negative count rolls no dice.
pub fn dice_pool<R: RandomSource + ?Sized>(
    num: i64,
    size: i64,
    rng: &mut R,
) -> Result<Vec<i64>, EvalError> {
    check_size(size)?;
    check_count(num)?;
    Ok((0..num.max(0)).map(|_| rng.randint(1, size)).collect())
}

/// Rolls `num` dice with `size` sides, each exploding on its maximum.
///
/// The whole pool is rolled before any die explodes.
pub fn exploding_pool<R: RandomSource + ?Sized>(
    num: i64,
    size: i64,
    rng: &mut R,
) -> Result<Vec<i64>, EvalError> {
    dice_pool(num, size, rng)?
        .into_iter()
        .map(|value| explode(value, size, rng))
        .collect()
}

pub fn die<R: RandomSource + ?Sized>(num: i64, size: i64, rng: &mut R) -> Result<i64, EvalError> {
    checked_sum(&dice_pool(num, size, rng)?)
}

pub fn exploding_die<R: RandomSource + ?Sized>(
    num: i64,
    size: i64,
    rng: &mut R,
) -> Result<i64, EvalError> {
    checked_sum(&exploding_pool(num, size, rng)?)
}

pub fn keep_high_die<R: RandomSource + ?Sized>(
    num: i64,
    size: i64,
    rng: &mut R,
) -> Result<i64, EvalError> {
    dice_pool(num, size, rng)?
        .into_iter()
        .max()
        .ok_or(EvalError::EmptyPool("dh"))
}

pub fn keep_low_die<R: RandomSource + ?Sized>(
    num: i64,
    size: i64,
    rng: &mut R,
) -> Result<i64, EvalError> {
    dice_pool(num, size, rng)?
        .into_iter()
        .min()
        .ok_or(EvalError::EmptyPool("dl"))
}

/// Rolls one exploding wild die and `num - 1` regular dice, summing them.
///
/// The whole roll is 0 when the wild die's first value is a 1. The regular
/// dice are rolled either way.
pub fn wild_die<R: RandomSource + ?Sized>(num: i64, size: i64, rng: &mut R) -> Result<i64, EvalError> {
    check_size(size)?;
    check_count(num)?;
    let first = rng.randint(1, size);
    let wild = explode(first, size, rng)?;
    let regular = dice_pool(num - 1, size, rng)?;

    if first == 1 {
        return Ok(0);
    }
    checked_sum(&regular)?
        .checked_add(wild)
        .ok_or(EvalError::Overflow)
}

/// Rolls the dice and concatenates the last digit of each into one number.
pub fn concat<R: RandomSource + ?Sized>(num: i64, size: i64, rng: &mut R) -> Result<i64, EvalError> {
    let digits = dice_pool(num, size, rng)?
        .into_iter()
        .map(|value| value % 10)
        .collect::<Vec<_>>();
    pool_concatenate(&digits)
}
