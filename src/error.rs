use std::path::PathBuf;

use crate::lex::TokenKind;

/// Every way rolling a YADN string can fail.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Map(#[from] MapError),
}

/// A character the lexer was not allowed to accept where it found it.
#[derive(thiserror::Error, Debug)]
pub enum LexError {
    #[error("Cannot start with {symbol}.")]
    CannotStart { symbol: char },
    #[error("{symbol} cannot follow {}.", with_article(.state))]
    CannotFollow { symbol: char, state: TokenKind },
    #[error("{symbol} is not a valid {kind}.")]
    UnknownSymbol { symbol: String, kind: TokenKind },
    #[error("{0} is not a valid number.")]
    InvalidNumber(String),
    #[error("Unexpected end of input in {}.", with_article(.kind))]
    UnexpectedEnd { kind: TokenKind },
    #[error("Invalid dice map: {0}")]
    Map(#[from] MapError),
}

/// A token sequence that does not form a roll.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("Empty roll: nothing to roll around a roll delimiter.")]
    EmptyRoll,
    #[error("Unexpected end of roll: an operand is missing.")]
    UnexpectedEnd,
    #[error("Unexpected {kind} {token}.")]
    UnexpectedToken { kind: TokenKind, token: String },
    #[error("A group was opened without a matching ).")]
    UnclosedGroup,
    #[error("Unknown {kind} symbol {symbol}.")]
    UnknownOperator { kind: TokenKind, symbol: String },
    #[error("Roll is nested more than {0} levels deep.")]
    TooDeep(usize),
}

/// A well formed roll that could not be computed.
#[derive(thiserror::Error, Debug)]
pub enum EvalError {
    #[error("Cannot apply {operator} to {lhs} and {rhs}.")]
    TypeMismatch {
        operator: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error("Cannot apply {operator} to {operand}.")]
    UnaryTypeMismatch {
        operator: &'static str,
        operand: &'static str,
    },
    #[error("Division by zero.")]
    DivisionByZero,
    #[error("Cannot raise to the negative power {0}.")]
    NegativeExponent(i64),
    #[error("Integer overflow.")]
    Overflow,
    #[error("Dice must have at least one side, not {0}.")]
    InvalidDieSize(i64),
    #[error("Cannot roll {0} dice at once, the limit is {max}.", max = crate::evaluate::dice_roll::MAX_DICE)]
    TooManyDice(i64),
    #[error("Cannot apply {0} to an empty pool.")]
    EmptyPool(&'static str),
    #[error("Cannot concatenate {0} into a number.")]
    Concatenate(String),
    #[error("No dice map named \"{0}\".")]
    UnknownDiceMap(String),
    #[error("Nothing to roll: the input only defines dice maps.")]
    NothingToRoll,
}

/// A dice map that could not be read.
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("{0}")]
    Syntax(String),
    #[error("Could not read dice maps from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn with_article(kind: &TokenKind) -> String {
    let name = kind.follow_name();
    let article = if name.starts_with(['A', 'E', 'I', 'O', 'U']) {
        "an"
    } else {
        "a"
    };
    format!("{article} {name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cannot_follow_article() {
        let error = LexError::CannotFollow {
            symbol: 'x',
            state: TokenKind::Number,
        };
        assert_eq!(error.to_string(), "x cannot follow a NUMBER.");

        let error = LexError::CannotFollow {
            symbol: '3',
            state: TokenKind::UPoolDegenOperator,
        };
        assert_eq!(error.to_string(), "3 cannot follow an U_POOL_DEGEN_OPERATOR.");

        let error = LexError::CannotFollow {
            symbol: '+',
            state: TokenKind::AsOperator,
        };
        assert_eq!(error.to_string(), "+ cannot follow an AS_OPERATOR.");
    }

    #[test]
    fn test_end_states_use_container_name() {
        let error = LexError::CannotFollow {
            symbol: '3',
            state: TokenKind::QualifierEnd,
        };
        assert_eq!(error.to_string(), "3 cannot follow a QUALIFIER.");
    }

    #[test]
    fn test_cannot_start() {
        let error = LexError::CannotStart { symbol: '+' };
        assert_eq!(error.to_string(), "Cannot start with +.");
    }
}
