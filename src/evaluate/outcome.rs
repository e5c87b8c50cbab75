use std::fmt::Display;

use crate::lex::to_pool_notation;

/// The computed value of a roll.
///
/// `Display` writes the value back out as YADN, so a result can be fed to
/// another roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Integer(i64),
    Boolean(bool),
    Qualifier(String),
    Pool(Vec<i64>),
    /// The pair of qualifiers a choice picks from: (if true, if false).
    Options(String, String),
    /// The results of a roll with several parts, in order.
    Compound(Vec<Outcome>),
}

impl Outcome {
    /// The name of the kind of value, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Outcome::Integer(_) => "a number",
            Outcome::Boolean(_) => "a boolean",
            Outcome::Qualifier(_) => "a qualifier",
            Outcome::Pool(_) => "a pool",
            Outcome::Options(_, _) => "options",
            Outcome::Compound(_) => "a compound roll",
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Outcome::Integer(integer) => Some(*integer),
            _ => None,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Integer(integer) => write!(f, "{integer}"),
            Outcome::Boolean(true) => write!(f, "T"),
            Outcome::Boolean(false) => write!(f, "F"),
            Outcome::Qualifier(qualifier) => write!(f, "\"{qualifier}\""),
            Outcome::Pool(members) => write!(f, "{}", to_pool_notation(members)),
            Outcome::Options(when_true, when_false) => {
                write!(f, "\"{when_true}\":\"{when_false}\"")
            }
            Outcome::Compound(outcomes) => write!(
                f,
                "{}",
                outcomes
                    .iter()
                    .map(|o| o.to_string())
                    .collect::<Vec<_>>()
                    .join("; ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding() {
        #[rustfmt::skip]
        let inputs = [
            (Outcome::Integer(3), "3"),
            (Outcome::Integer(-12), "-12"),
            (Outcome::Boolean(true), "T"),
            (Outcome::Qualifier("spam".into()), "\"spam\""),
            (Outcome::Pool(vec![3, 1, 5]), "[3, 1, 5]"),
            (Outcome::Pool(vec![]), "[]"),
            (Outcome::Options("spam".into(), "eggs".into()), "\"spam\":\"eggs\""),
            (
                Outcome::Compound(vec![Outcome::Integer(8), Outcome::Qualifier("+".into())]),
                "8; \"+\"",
            ),
        ];

        for (outcome, expected) in inputs {
            assert_eq!(outcome.to_string(), expected);
        }
    }
}
