use super::TokenKind;

const DIGITS: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// The literal symbols that make up a token of the given kind.
///
/// Container kinds (`Qualifier`, `Pool`, `Map`) have no symbol table of their
/// own: they start with their opening delimiter and are consumed raw.
pub(crate) fn symbols(kind: TokenKind) -> &'static [&'static str] {
    match kind {
        TokenKind::Number => DIGITS,
        TokenKind::Whitespace => &[" ", "\t", "\n"],
        TokenKind::Boolean => &["T", "F"],
        TokenKind::QualifierDelimiter => &["\""],
        TokenKind::PoolOpen => &["["],
        TokenKind::PoolClose => &["]"],
        TokenKind::MemberDelimiter => &[","],
        TokenKind::GroupOpen => &["("],
        TokenKind::GroupClose => &[")"],
        TokenKind::AsOperator => &["+", "-"],
        TokenKind::MdOperator => &["*", "/", "%"],
        TokenKind::ExOperator => &["^"],
        TokenKind::ComparisonOperator => &["<", ">", ">=", "<=", "!=", "=="],
        TokenKind::DiceOperator => &["d", "d!", "dc", "dh", "dl", "dw"],
        TokenKind::PoolGenOperator => &["g", "g!"],
        TokenKind::PoolOperator => &["pa", "pb", "pc", "pf", "ph", "pl", "pr", "p%"],
        TokenKind::PoolDegenOperator => &["nb", "ns"],
        TokenKind::UPoolDegenOperator => &["C", "N", "S"],
        TokenKind::ChoiceOperator => &["?"],
        TokenKind::OptionsOperator => &[":"],
        TokenKind::MappingOperator => &["m"],
        TokenKind::MapOpen => &["{"],
        TokenKind::MapClose => &["}"],
        TokenKind::NegativeSign => &["-"],
        TokenKind::RollDelimiter => &[";"],
        _ => &[],
    }
}

/// Whether `c` can begin a token of `kind`.
pub(crate) fn is_start(kind: TokenKind, c: char) -> bool {
    symbols(kind).iter().any(|symbol| symbol.starts_with(c))
}

/// Whether appending `c` to `buffer` keeps it a prefix of some symbol of
/// `kind`, so that the token in progress continues.
pub(crate) fn is_still(kind: TokenKind, buffer: &str, c: char) -> bool {
    symbols(kind).iter().any(|symbol| {
        symbol
            .strip_prefix(buffer)
            .is_some_and(|rest| rest.starts_with(c))
    })
}

/// Whether `text` is a complete symbol of `kind`.
pub(crate) fn is_symbol(kind: TokenKind, text: &str) -> bool {
    symbols(kind).contains(&text)
}

pub(crate) fn is_whitespace(c: char) -> bool {
    is_start(TokenKind::Whitespace, c)
}
