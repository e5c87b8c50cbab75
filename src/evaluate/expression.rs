use std::cmp::Ordering;

use super::{dice_roll, pool, Outcome, RandomSource};
use crate::{
    error::EvalError,
    maps::DiceMaps,
    parse::{
        Arithmetic, Comparison, DiceRoll, Expression, Operator, PoolDegeneration, PoolFilter,
        PoolGeneration, UnaryOperator,
    },
};

impl Expression {
    /// Computes the value of the expression, rolling dice from `rng` and
    /// looking dice maps up in `maps`. Operands are evaluated left first.
    pub fn evaluate<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        maps: &DiceMaps,
    ) -> Result<Outcome, EvalError> {
        match self {
            Expression::Number(number) => Ok(Outcome::Integer(*number)),
            Expression::Boolean(boolean) => Ok(Outcome::Boolean(*boolean)),
            Expression::Qualifier(qualifier) => Ok(Outcome::Qualifier(qualifier.clone())),
            Expression::Pool(members) => Ok(Outcome::Pool(members.clone())),
            Expression::Parens(expression) => expression.evaluate(rng, maps),
            Expression::Infix(op, left, right) => {
                let left = left.evaluate(rng, maps)?;
                let right = right.evaluate(rng, maps)?;
                op.apply(left, right, rng, maps)
            }
            Expression::Prefix(op, operand) => op.apply(operand.evaluate(rng, maps)?),
        }
    }
}

impl Operator {
    pub fn apply<R: RandomSource + ?Sized>(
        self,
        left: Outcome,
        right: Outcome,
        rng: &mut R,
        maps: &DiceMaps,
    ) -> Result<Outcome, EvalError> {
        let mismatch = |left: &Outcome, right: &Outcome| EvalError::TypeMismatch {
            operator: self.symbol(),
            lhs: left.type_name(),
            rhs: right.type_name(),
        };

        match (self, left, right) {
            (Operator::Arithmetic(op), Outcome::Integer(a), Outcome::Integer(b)) => {
                arithmetic(op, a, b).map(Outcome::Integer)
            }
            (Operator::Comparison(op), Outcome::Integer(a), Outcome::Integer(b)) => {
                Ok(Outcome::Boolean(compare(op, a, b)))
            }
            (Operator::DiceRoll(op), Outcome::Integer(num), Outcome::Integer(size)) => {
                let rolled = match op {
                    DiceRoll::Sum => dice_roll::die(num, size, rng),
                    DiceRoll::Exploding => dice_roll::exploding_die(num, size, rng),
                    DiceRoll::Concat => dice_roll::concat(num, size, rng),
                    DiceRoll::KeepHigh => dice_roll::keep_high_die(num, size, rng),
                    DiceRoll::KeepLow => dice_roll::keep_low_die(num, size, rng),
                    DiceRoll::Wild => dice_roll::wild_die(num, size, rng),
                };
                rolled.map(Outcome::Integer)
            }
            (Operator::PoolGeneration(op), Outcome::Integer(num), Outcome::Integer(size)) => {
                let rolled = match op {
                    PoolGeneration::Pool => dice_roll::dice_pool(num, size, rng),
                    PoolGeneration::Exploding => dice_roll::exploding_pool(num, size, rng),
                };
                rolled.map(Outcome::Pool)
            }
            (Operator::PoolFilter(op), Outcome::Pool(members), Outcome::Integer(n)) => {
                let filtered = match op {
                    PoolFilter::KeepAbove => pool::pool_keep_above(&members, n),
                    PoolFilter::KeepBelow => pool::pool_keep_below(&members, n),
                    PoolFilter::Cap => pool::pool_cap(&members, n),
                    PoolFilter::Floor => pool::pool_floor(&members, n),
                    PoolFilter::KeepHigh => pool::pool_keep_high(&members, n),
                    PoolFilter::KeepLow => pool::pool_keep_low(&members, n),
                    PoolFilter::Remove => pool::pool_remove(&members, n),
                    PoolFilter::Modulo => pool::pool_modulo(&members, n)?,
                };
                Ok(Outcome::Pool(filtered))
            }
            (Operator::PoolDegeneration(op), Outcome::Pool(members), Outcome::Integer(target)) => {
                Ok(Outcome::Integer(match op {
                    PoolDegeneration::CountSuccesses => pool::count_successes(&members, target),
                    PoolDegeneration::CountSuccessesWithBotch => {
                        pool::count_successes_with_botch(&members, target)
                    }
                }))
            }
            (Operator::Options, Outcome::Qualifier(when_true), Outcome::Qualifier(when_false)) => {
                Ok(Outcome::Options(when_true, when_false))
            }
            (
                Operator::Choice,
                Outcome::Boolean(choice),
                Outcome::Options(when_true, when_false),
            ) => Ok(Outcome::Qualifier(if choice { when_true } else { when_false })),
            (Operator::Mapping, Outcome::Integer(face), Outcome::Qualifier(name)) => {
                let map = maps
                    .get(&name)
                    .ok_or_else(|| EvalError::UnknownDiceMap(name.clone()))?;
                Ok(match map.get(&face) {
                    Some(symbol) => Outcome::Qualifier(symbol.clone()),
                    None => Outcome::Integer(face),
                })
            }
            (_, left, right) => Err(mismatch(&left, &right)),
        }
    }
}

impl UnaryOperator {
    pub fn apply(self, operand: Outcome) -> Result<Outcome, EvalError> {
        let Outcome::Pool(members) = operand else {
            return Err(EvalError::UnaryTypeMismatch {
                operator: self.symbol(),
                operand: operand.type_name(),
            });
        };

        let degenerated = match self {
            UnaryOperator::Concatenate => pool::pool_concatenate(&members)?,
            UnaryOperator::Count => pool::pool_count(&members),
            UnaryOperator::Sum => pool::pool_sum(&members)?,
        };
        Ok(Outcome::Integer(degenerated))
    }
}

fn arithmetic(op: Arithmetic, a: i64, b: i64) -> Result<i64, EvalError> {
    match op {
        Arithmetic::Add => a.checked_add(b).ok_or(EvalError::Overflow),
        Arithmetic::Sub => a.checked_sub(b).ok_or(EvalError::Overflow),
        Arithmetic::Mul => a.checked_mul(b).ok_or(EvalError::Overflow),
        Arithmetic::Div => floor_div(a, b),
        Arithmetic::Rem => floor_rem(a, b),
        Arithmetic::Pow => power(a, b),
    }
}

fn power(base: i64, exponent: i64) -> Result<i64, EvalError> {
    if exponent < 0 {
        return Err(EvalError::NegativeExponent(exponent));
    }
    // These bases stay small whatever the exponent.
    match base {
        0 if exponent > 0 => return Ok(0),
        1 => return Ok(1),
        -1 => return Ok(if exponent % 2 == 0 { 1 } else { -1 }),
        _ => {}
    }
    let exponent = u32::try_from(exponent).map_err(|_| EvalError::Overflow)?;
    base.checked_pow(exponent).ok_or(EvalError::Overflow)
}

fn compare(op: Comparison, a: i64, b: i64) -> bool {
    let ordering = a.cmp(&b);
    match op {
        Comparison::Less => ordering == Ordering::Less,
        Comparison::Greater => ordering == Ordering::Greater,
        Comparison::GreaterOrEqual => ordering != Ordering::Less,
        Comparison::LessOrEqual => ordering != Ordering::Greater,
        Comparison::NotEqual => ordering != Ordering::Equal,
        Comparison::Equal => ordering == Ordering::Equal,
    }
}

/// Division rounding towards negative infinity.
pub(crate) fn floor_div(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(EvalError::DivisionByZero);
    }
    let quotient = a.checked_div(b).ok_or(EvalError::Overflow)?;
    if a % b != 0 && (a < 0) != (b < 0) {
        return Ok(quotient - 1);
    }
    Ok(quotient)
}

/// Remainder taking the sign of the divisor.
pub(crate) fn floor_rem(a: i64, b: i64) -> Result<i64, EvalError> {
    if b == 0 {
        return Err(EvalError::DivisionByZero);
    }
    let remainder = a.checked_rem(b).ok_or(EvalError::Overflow)?;
    if remainder != 0 && (remainder < 0) != (b < 0) {
        return Ok(remainder + b);
    }
    Ok(remainder)
}
