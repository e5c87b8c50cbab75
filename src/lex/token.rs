use std::fmt::Display;

use crate::maps::DiceMap;

/// Every kind of token the YADN lexers know about.
///
/// Some kinds are never stored in a token list: they are lexer states
/// (`Start`, `Whitespace`, `End`, the `*End` kinds) or the opening symbol of
/// a bracketed token that is immediately redirected into its container kind
/// (`NegativeSign`, `QualifierDelimiter`, `PoolOpen`, `MapOpen`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Start,
    Whitespace,
    Number,
    Boolean,
    Qualifier,
    QualifierDelimiter,
    QualifierEnd,
    Pool,
    PoolOpen,
    PoolClose,
    PoolEnd,
    Member,
    MemberDelimiter,
    GroupOpen,
    GroupClose,
    AsOperator,
    MdOperator,
    ExOperator,
    ComparisonOperator,
    DiceOperator,
    PoolGenOperator,
    PoolOperator,
    PoolDegenOperator,
    UPoolDegenOperator,
    ChoiceOperator,
    OptionsOperator,
    MappingOperator,
    Map,
    MapOpen,
    MapClose,
    MapEnd,
    NegativeSign,
    RollDelimiter,
    End,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Start => "START",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Number => "NUMBER",
            TokenKind::Boolean => "BOOLEAN",
            TokenKind::Qualifier => "QUALIFIER",
            TokenKind::QualifierDelimiter => "QUALIFIER_DELIMITER",
            TokenKind::QualifierEnd => "QUALIFIER_END",
            TokenKind::Pool => "POOL",
            TokenKind::PoolOpen => "POOL_OPEN",
            TokenKind::PoolClose => "POOL_CLOSE",
            TokenKind::PoolEnd => "POOL_END",
            TokenKind::Member => "MEMBER",
            TokenKind::MemberDelimiter => "MEMBER_DELIMITER",
            TokenKind::GroupOpen => "GROUP_OPEN",
            TokenKind::GroupClose => "GROUP_CLOSE",
            TokenKind::AsOperator => "AS_OPERATOR",
            TokenKind::MdOperator => "MD_OPERATOR",
            TokenKind::ExOperator => "EX_OPERATOR",
            TokenKind::ComparisonOperator => "COMPARISON_OPERATOR",
            TokenKind::DiceOperator => "DICE_OPERATOR",
            TokenKind::PoolGenOperator => "POOL_GEN_OPERATOR",
            TokenKind::PoolOperator => "POOL_OPERATOR",
            TokenKind::PoolDegenOperator => "POOL_DEGEN_OPERATOR",
            TokenKind::UPoolDegenOperator => "U_POOL_DEGEN_OPERATOR",
            TokenKind::ChoiceOperator => "CHOICE_OPERATOR",
            TokenKind::OptionsOperator => "OPTIONS_OPERATOR",
            TokenKind::MappingOperator => "MAPPING_OPERATOR",
            TokenKind::Map => "MAP",
            TokenKind::MapOpen => "MAP_OPEN",
            TokenKind::MapClose => "MAP_CLOSE",
            TokenKind::MapEnd => "MAP_END",
            TokenKind::NegativeSign => "NEGATIVE_SIGN",
            TokenKind::RollDelimiter => "ROLL_DELIMITER",
            TokenKind::End => "END",
        }
    }

    /// The name used when reporting what a character illegally follows.
    /// The `*End` states report the token they close.
    pub fn follow_name(self) -> &'static str {
        match self {
            TokenKind::QualifierEnd => TokenKind::Qualifier.name(),
            TokenKind::PoolEnd => TokenKind::Pool.name(),
            TokenKind::MapEnd => TokenKind::Map.name(),
            kind => kind.name(),
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The payload of a token. Which variant a token carries depends on its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Number(i64),
    Boolean(bool),
    Qualifier(String),
    Pool(Vec<i64>),
    /// The raw symbol of an operator, group or delimiter token.
    Symbol(String),
    /// A named dice map defined inline.
    Map(String, DiceMap),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) value: Value,
}

impl Token {
    pub fn new(kind: TokenKind, value: Value) -> Self {
        Self { kind, value }
    }

    pub fn number(number: i64) -> Self {
        Self::new(TokenKind::Number, Value::Number(number))
    }

    pub fn boolean(boolean: bool) -> Self {
        Self::new(TokenKind::Boolean, Value::Boolean(boolean))
    }

    pub fn qualifier(qualifier: impl Into<String>) -> Self {
        Self::new(TokenKind::Qualifier, Value::Qualifier(qualifier.into()))
    }

    pub fn pool(members: impl Into<Vec<i64>>) -> Self {
        Self::new(TokenKind::Pool, Value::Pool(members.into()))
    }

    pub fn symbol(kind: TokenKind, symbol: impl Into<String>) -> Self {
        Self::new(kind, Value::Symbol(symbol.into()))
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Value::Number(number) => write!(f, "{number}"),
            Value::Boolean(true) => write!(f, "T"),
            Value::Boolean(false) => write!(f, "F"),
            Value::Qualifier(qualifier) => write!(f, "\"{qualifier}\""),
            Value::Pool(members) => write!(f, "{}", to_pool_notation(members)),
            Value::Symbol(symbol) => write!(f, "{symbol}"),
            Value::Map(name, map) => {
                let pairs = map
                    .iter()
                    .map(|(face, symbol)| format!("{face}:\"{symbol}\""))
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "{{\"{name}\"={pairs}}}")
            }
        }
    }
}

pub(crate) fn to_pool_notation(members: &[i64]) -> String {
    format!(
        "[{}]",
        members
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )
}
