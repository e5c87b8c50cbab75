//! Operators on pools of dice that have already been rolled.

use super::expression::floor_rem;
use crate::error::EvalError;

pub fn pool_cap(pool: &[i64], cap: i64) -> Vec<i64> {
    pool.iter().map(|&member| member.min(cap)).collect()
}

pub fn pool_floor(pool: &[i64], floor: i64) -> Vec<i64> {
    pool.iter().map(|&member| member.max(floor)).collect()
}

pub fn pool_keep_above(pool: &[i64], floor: i64) -> Vec<i64> {
    pool.iter().copied().filter(|&member| member >= floor).collect()
}

pub fn pool_keep_below(pool: &[i64], ceiling: i64) -> Vec<i64> {
    pool.iter().copied().filter(|&member| member <= ceiling).collect()
}

pub fn pool_remove(pool: &[i64], cut: i64) -> Vec<i64> {
    pool.iter().copied().filter(|&member| member != cut).collect()
}

pub fn pool_modulo(pool: &[i64], divisor: i64) -> Result<Vec<i64>, EvalError> {
    pool.iter()
        .map(|&member| floor_rem(member, divisor))
        .collect()
}

/// The index of the first member no other member `beats`.
fn first_position(pool: &[i64], beats: impl Fn(i64, i64) -> bool) -> Option<usize> {
    let mut found: Option<(usize, i64)> = None;

    for (index, &member) in pool.iter().enumerate() {
        match found {
            Some((_, best)) if !beats(member, best) => {}
            _ => found = Some((index, member)),
        }
    }

    found.map(|(index, _)| index)
}

/// Keeps the `keep` highest members, leaving them in their rolled order.
/// Ties are broken by dropping the earliest of the lowest first.
pub fn pool_keep_high(pool: &[i64], keep: i64) -> Vec<i64> {
    let mut kept = pool.to_vec();
    while kept.len() as i64 > keep.max(0) {
        match first_position(&kept, |member, lowest| member < lowest) {
            Some(index) => kept.remove(index),
            None => break,
        };
    }
    kept
}

/// Keeps the `keep` lowest members, leaving them in their rolled order.
/// Ties are broken by dropping the earliest of the highest first.
pub fn pool_keep_low(pool: &[i64], keep: i64) -> Vec<i64> {
    let mut kept = pool.to_vec();
    while kept.len() as i64 > keep.max(0) {
        match first_position(&kept, |member, highest| member > highest) {
            Some(index) => kept.remove(index),
            None => break,
        };
    }
    kept
}

pub fn pool_sum(pool: &[i64]) -> Result<i64, EvalError> {
    pool.iter()
        .try_fold(0i64, |total, &member| total.checked_add(member))
        .ok_or(EvalError::Overflow)
}

pub fn pool_count(pool: &[i64]) -> i64 {
    pool.len() as i64
}

/// Writes the members one after the other and reads them back as a number.
pub fn pool_concatenate(pool: &[i64]) -> Result<i64, EvalError> {
    if pool.is_empty() {
        return Err(EvalError::EmptyPool("C"));
    }
    let digits = pool.iter().map(|m| m.to_string()).collect::<String>();
    digits
        .parse()
        .map_err(|_| EvalError::Concatenate(digits))
}

/// The number of members at or above `target`.
pub fn count_successes(pool: &[i64], target: i64) -> i64 {
    pool.iter().filter(|&&member| member >= target).count() as i64
}

/// Successes minus the number of ones. The result can be negative.
pub fn count_successes_with_botch(pool: &[i64], target: i64) -> i64 {
    let botches = pool.iter().filter(|&&member| member == 1).count() as i64;
    count_successes(pool, target) - botches
}
