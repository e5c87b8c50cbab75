mod expression;

use std::fmt::Display;

pub use expression::*;

use crate::{
    lex::{to_pool_notation, TokenKind},
    maps::DiceMap,
};

/// One roll of a YADN string: the text between roll delimiters.
#[derive(Debug, Clone, PartialEq)]
pub enum Roll {
    /// A dice map definition, usable by the rolls after it.
    DiceMap { name: String, map: DiceMap },
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(i64),
    Boolean(bool),
    Qualifier(String),
    Pool(Vec<i64>),
    Parens(Box<Expression>),
    Infix(Operator, Box<Expression>, Box<Expression>),
    Prefix(UnaryOperator, Box<Expression>),
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Number(number) => write!(f, "{number}"),
            Expression::Boolean(true) => write!(f, "T"),
            Expression::Boolean(false) => write!(f, "F"),
            Expression::Qualifier(qualifier) => write!(f, "\"{qualifier}\""),
            Expression::Pool(members) => write!(f, "{}", to_pool_notation(members)),
            Expression::Parens(expression) => write!(f, "({expression})"),
            Expression::Infix(op, left, right) => write!(f, "{left}{op}{right}"),
            Expression::Prefix(op, operand) => write!(f, "{op}{operand}"),
        }
    }
}

impl Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Roll::DiceMap { name, map } => {
                let pairs = map
                    .iter()
                    .map(|(face, symbol)| format!("{face}:\"{symbol}\""))
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "{{\"{name}\"={pairs}}}")
            }
            Roll::Expression(expression) => write!(f, "{expression}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arithmetic {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    Greater,
    GreaterOrEqual,
    LessOrEqual,
    NotEqual,
    Equal,
}

/// Operators that roll dice and reduce them to a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceRoll {
    /// `d`, sum of the dice.
    Sum,
    /// `d!`, sum of the dice, each exploding on its maximum.
    Exploding,
    /// `dc`, the last digit of every die concatenated.
    Concat,
    /// `dh`, the highest die.
    KeepHigh,
    /// `dl`, the lowest die.
    KeepLow,
    /// `dw`, one exploding wild die that zeroes the roll on a 1.
    Wild,
}

/// Operators that roll dice into a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolGeneration {
    Pool,
    Exploding,
}

/// Operators that take a pool and a number and give back a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolFilter {
    /// `pa`, keep members at or above.
    KeepAbove,
    /// `pb`, keep members at or below.
    KeepBelow,
    /// `pc`, cap members.
    Cap,
    /// `pf`, floor members.
    Floor,
    /// `ph`, keep the highest members.
    KeepHigh,
    /// `pl`, keep the lowest members.
    KeepLow,
    /// `pr`, remove members equal to.
    Remove,
    /// `p%`, members modulo.
    Modulo,
}

/// Operators that take a pool and a number and give back a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolDegeneration {
    /// `ns`, count members at or above a target.
    CountSuccesses,
    /// `nb`, count successes minus the ones rolled.
    CountSuccessesWithBotch,
}

/// A binary operator, grouped by the kind of operands it takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Arithmetic(Arithmetic),
    Comparison(Comparison),
    DiceRoll(DiceRoll),
    PoolGeneration(PoolGeneration),
    PoolFilter(PoolFilter),
    PoolDegeneration(PoolDegeneration),
    /// `:`, pairs two qualifiers as the options of a choice.
    Options,
    /// `?`, picks one of two options.
    Choice,
    /// `m`, looks a number up in a dice map.
    Mapping,
}

impl Operator {
    const ALL: [Operator; 33] = [
        Operator::Arithmetic(Arithmetic::Add),
        Operator::Arithmetic(Arithmetic::Sub),
        Operator::Arithmetic(Arithmetic::Mul),
        Operator::Arithmetic(Arithmetic::Div),
        Operator::Arithmetic(Arithmetic::Rem),
        Operator::Arithmetic(Arithmetic::Pow),
        Operator::Comparison(Comparison::Less),
        Operator::Comparison(Comparison::Greater),
        Operator::Comparison(Comparison::GreaterOrEqual),
        Operator::Comparison(Comparison::LessOrEqual),
        Operator::Comparison(Comparison::NotEqual),
        Operator::Comparison(Comparison::Equal),
        Operator::DiceRoll(DiceRoll::Sum),
        Operator::DiceRoll(DiceRoll::Exploding),
        Operator::DiceRoll(DiceRoll::Concat),
        Operator::DiceRoll(DiceRoll::KeepHigh),
        Operator::DiceRoll(DiceRoll::KeepLow),
        Operator::DiceRoll(DiceRoll::Wild),
        Operator::PoolGeneration(PoolGeneration::Pool),
        Operator::PoolGeneration(PoolGeneration::Exploding),
        Operator::PoolFilter(PoolFilter::KeepAbove),
        Operator::PoolFilter(PoolFilter::KeepBelow),
        Operator::PoolFilter(PoolFilter::Cap),
        Operator::PoolFilter(PoolFilter::Floor),
        Operator::PoolFilter(PoolFilter::KeepHigh),
        Operator::PoolFilter(PoolFilter::KeepLow),
        Operator::PoolFilter(PoolFilter::Remove),
        Operator::PoolFilter(PoolFilter::Modulo),
        Operator::PoolDegeneration(PoolDegeneration::CountSuccesses),
        Operator::PoolDegeneration(PoolDegeneration::CountSuccessesWithBotch),
        Operator::Options,
        Operator::Choice,
        Operator::Mapping,
    ];

    /// Looks up the operator of a token. `None` means the symbol has no
    /// operator registered under that token kind.
    pub fn from_token(kind: TokenKind, symbol: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.token_kind() == kind && op.symbol() == symbol)
    }

    /// The kind of token this operator is lexed as, which is also what
    /// decides its precedence.
    pub fn token_kind(self) -> TokenKind {
        match self {
            Operator::Arithmetic(Arithmetic::Add | Arithmetic::Sub) => TokenKind::AsOperator,
            Operator::Arithmetic(Arithmetic::Mul | Arithmetic::Div | Arithmetic::Rem) => {
                TokenKind::MdOperator
            }
            Operator::Arithmetic(Arithmetic::Pow) => TokenKind::ExOperator,
            Operator::Comparison(_) => TokenKind::ComparisonOperator,
            Operator::DiceRoll(_) => TokenKind::DiceOperator,
            Operator::PoolGeneration(_) => TokenKind::PoolGenOperator,
            Operator::PoolFilter(_) => TokenKind::PoolOperator,
            Operator::PoolDegeneration(_) => TokenKind::PoolDegenOperator,
            Operator::Options => TokenKind::OptionsOperator,
            Operator::Choice => TokenKind::ChoiceOperator,
            Operator::Mapping => TokenKind::MappingOperator,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Arithmetic(op) => match op {
                Arithmetic::Add => "+",
                Arithmetic::Sub => "-",
                Arithmetic::Mul => "*",
                Arithmetic::Div => "/",
                Arithmetic::Rem => "%",
                Arithmetic::Pow => "^",
            },
            Operator::Comparison(op) => match op {
                Comparison::Less => "<",
                Comparison::Greater => ">",
                Comparison::GreaterOrEqual => ">=",
                Comparison::LessOrEqual => "<=",
                Comparison::NotEqual => "!=",
                Comparison::Equal => "==",
            },
            Operator::DiceRoll(op) => match op {
                DiceRoll::Sum => "d",
                DiceRoll::Exploding => "d!",
                DiceRoll::Concat => "dc",
                DiceRoll::KeepHigh => "dh",
                DiceRoll::KeepLow => "dl",
                DiceRoll::Wild => "dw",
            },
            Operator::PoolGeneration(op) => match op {
                PoolGeneration::Pool => "g",
                PoolGeneration::Exploding => "g!",
            },
            Operator::PoolFilter(op) => match op {
                PoolFilter::KeepAbove => "pa",
                PoolFilter::KeepBelow => "pb",
                PoolFilter::Cap => "pc",
                PoolFilter::Floor => "pf",
                PoolFilter::KeepHigh => "ph",
                PoolFilter::KeepLow => "pl",
                PoolFilter::Remove => "pr",
                PoolFilter::Modulo => "p%",
            },
            Operator::PoolDegeneration(op) => match op {
                PoolDegeneration::CountSuccesses => "ns",
                PoolDegeneration::CountSuccessesWithBotch => "nb",
            },
            Operator::Options => ":",
            Operator::Choice => "?",
            Operator::Mapping => "m",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A prefix operator that reduces a pool to a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `C`, the pool members concatenated.
    Concatenate,
    /// `N`, the number of members.
    Count,
    /// `S`, the sum of the members.
    Sum,
}

impl UnaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "C" => Some(UnaryOperator::Concatenate),
            "N" => Some(UnaryOperator::Count),
            "S" => Some(UnaryOperator::Sum),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Concatenate => "C",
            UnaryOperator::Count => "N",
            UnaryOperator::Sum => "S",
        }
    }
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
