//! Turns YADN text into tokens.
//!
//! The lexer is a state machine whose state is the kind of the token being
//! built. For every character it either extends the current token or starts
//! a new one, and a character that can do neither is an error naming what it
//! illegally followed.

mod classify;
mod pool;
mod token;

use tracing::trace;

pub(crate) use token::to_pool_notation;
pub use token::{Token, TokenKind, Value};

use crate::{error::LexError, maps};

/// What a character does to the token in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Extend,
    Begin(TokenKind),
}

/// The kinds that may legally begin right after a token of kind `state`,
/// in the order they are tried.
pub(crate) fn successors(state: TokenKind) -> &'static [TokenKind] {
    use TokenKind::*;

    match state {
        Start | RollDelimiter => &[
            Number,
            NegativeSign,
            Boolean,
            QualifierDelimiter,
            GroupOpen,
            PoolOpen,
            UPoolDegenOperator,
            MapOpen,
        ],
        Number => &[
            AsOperator,
            MdOperator,
            ExOperator,
            ComparisonOperator,
            DiceOperator,
            PoolGenOperator,
            GroupClose,
            RollDelimiter,
            MappingOperator,
        ],
        GroupClose => &[
            AsOperator,
            MdOperator,
            ExOperator,
            ComparisonOperator,
            DiceOperator,
            PoolGenOperator,
            PoolOperator,
            PoolDegenOperator,
            GroupClose,
            RollDelimiter,
            MappingOperator,
        ],
        AsOperator | MdOperator | ExOperator | ComparisonOperator | DiceOperator
        | PoolGenOperator | PoolOperator | PoolDegenOperator => {
            &[Number, NegativeSign, GroupOpen, UPoolDegenOperator]
        }
        GroupOpen | UPoolDegenOperator => &[
            GroupOpen,
            Number,
            NegativeSign,
            PoolOpen,
            UPoolDegenOperator,
        ],
        PoolEnd => &[GroupClose, PoolDegenOperator, PoolOperator, RollDelimiter],
        QualifierEnd => &[OptionsOperator, RollDelimiter],
        Boolean => &[ChoiceOperator],
        ChoiceOperator | OptionsOperator | MappingOperator => &[QualifierDelimiter],
        MapEnd => &[RollDelimiter],
        _ => &[],
    }
}

/// Decides what `c` does when the lexer is in `state` holding `buffer`.
///
/// An empty buffer means the previous token is complete (the lexer just
/// resumed after whitespace, or has not started), so `c` can only begin a
/// new token.
pub(crate) fn step(state: TokenKind, buffer: &str, c: char) -> Result<Step, LexError> {
    if state == TokenKind::Number && buffer == "-" {
        return if c.is_ascii_digit() {
            Ok(Step::Extend)
        } else {
            Err(LexError::CannotFollow {
                symbol: c,
                state: TokenKind::NegativeSign,
            })
        };
    }

    if !buffer.is_empty() {
        let extends = match state {
            TokenKind::Number => c.is_ascii_digit(),
            kind => classify::is_still(kind, buffer, c),
        };
        if extends {
            return Ok(Step::Extend);
        }
    }

    successors(state)
        .iter()
        .copied()
        .find(|&kind| classify::is_start(kind, c))
        .map(Step::Begin)
        .ok_or(if state == TokenKind::Start {
            LexError::CannotStart { symbol: c }
        } else {
            LexError::CannotFollow { symbol: c, state }
        })
}

/// Opening symbols that are lexed as part of the container they open.
fn container(kind: TokenKind) -> TokenKind {
    match kind {
        TokenKind::NegativeSign => TokenKind::Number,
        TokenKind::QualifierDelimiter => TokenKind::Qualifier,
        TokenKind::PoolOpen => TokenKind::Pool,
        TokenKind::MapOpen => TokenKind::Map,
        kind => kind,
    }
}

fn is_stored(kind: TokenKind) -> bool {
    !matches!(
        kind,
        TokenKind::Start
            | TokenKind::Whitespace
            | TokenKind::End
            | TokenKind::QualifierEnd
            | TokenKind::PoolEnd
            | TokenKind::MapEnd
    )
}

#[derive(Debug)]
pub struct Lexer {
    state: TokenKind,
    buffer: String,
    tokens: Vec<Token>,
    in_map_qualifier: bool,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    pub fn new() -> Self {
        Self {
            state: TokenKind::Start,
            buffer: String::new(),
            tokens: Vec::new(),
            in_map_qualifier: false,
        }
    }

    /// Lexes `text` into tokens. The lexer can be reused afterwards.
    pub fn lex(&mut self, text: &str) -> Result<Vec<Token>, LexError> {
        self.reset();
        let lexed = text
            .chars()
            .try_for_each(|c| self.process(c))
            .and_then(|()| self.finish());
        let tokens = std::mem::take(&mut self.tokens);
        self.reset();
        lexed.map(|()| tokens)
    }

    fn reset(&mut self) {
        self.state = TokenKind::Start;
        self.buffer.clear();
        self.tokens.clear();
        self.in_map_qualifier = false;
    }

    fn process(&mut self, c: char) -> Result<(), LexError> {
        match self.state {
            TokenKind::Qualifier => self.qualifier(c),
            TokenKind::Pool => self.pool(c),
            TokenKind::Map => self.map(c),
            _ if classify::is_whitespace(c) => self.whitespace(c),
            TokenKind::Whitespace => {
                let step = step(self.resume_state(), "", c)?;
                self.apply(step, c)
            }
            state => {
                let step = step(state, &self.buffer, c)?;
                self.apply(step, c)
            }
        }
    }

    fn apply(&mut self, step: Step, c: char) -> Result<(), LexError> {
        match step {
            Step::Extend => {
                self.buffer.push(c);
                Ok(())
            }
            Step::Begin(kind) => self.change_state(container(kind), c),
        }
    }

    fn whitespace(&mut self, c: char) -> Result<(), LexError> {
        if self.state == TokenKind::Number && self.buffer == "-" {
            return Err(LexError::CannotFollow {
                symbol: c,
                state: TokenKind::NegativeSign,
            });
        }
        if self.state != TokenKind::Whitespace {
            self.change_state(TokenKind::Whitespace, c)?;
        }
        Ok(())
    }

    fn qualifier(&mut self, c: char) -> Result<(), LexError> {
        self.buffer.push(c);
        if c == '"' {
            self.change_state(TokenKind::QualifierEnd, c)?;
        }
        Ok(())
    }

    fn pool(&mut self, c: char) -> Result<(), LexError> {
        self.buffer.push(c);
        if c == ']' {
            self.change_state(TokenKind::PoolEnd, c)?;
        }
        Ok(())
    }

    fn map(&mut self, c: char) -> Result<(), LexError> {
        self.buffer.push(c);
        match c {
            '"' => self.in_map_qualifier = !self.in_map_qualifier,
            '}' if !self.in_map_qualifier => self.change_state(TokenKind::MapEnd, c)?,
            _ => {}
        }
        Ok(())
    }

    /// The state to continue from once whitespace ends: the last token
    /// stored, or its closed form for container tokens.
    fn resume_state(&self) -> TokenKind {
        self.tokens
            .last()
            .map_or(TokenKind::Start, |token| match token.kind {
                TokenKind::Qualifier => TokenKind::QualifierEnd,
                TokenKind::Pool => TokenKind::PoolEnd,
                TokenKind::Map => TokenKind::MapEnd,
                kind => kind,
            })
    }

    fn change_state(&mut self, new_state: TokenKind, c: char) -> Result<(), LexError> {
        self.store()?;
        self.state = new_state;
        self.buffer.clear();
        if new_state == TokenKind::Map {
            self.in_map_qualifier = false;
        }
        if !matches!(
            new_state,
            TokenKind::QualifierEnd | TokenKind::PoolEnd | TokenKind::MapEnd
        ) {
            self.buffer.push(c);
        }
        Ok(())
    }

    fn store(&mut self) -> Result<(), LexError> {
        if !is_stored(self.state) {
            return Ok(());
        }
        let token = Token::new(self.state, self.value()?);
        trace!(kind = %token.kind, %token, "lexed token");
        self.tokens.push(token);
        Ok(())
    }

    fn value(&self) -> Result<Value, LexError> {
        let value = match self.state {
            TokenKind::Number => Value::Number(
                self.buffer
                    .parse()
                    .map_err(|_| LexError::InvalidNumber(self.buffer.clone()))?,
            ),
            TokenKind::Boolean => Value::Boolean(self.buffer == "T"),
            TokenKind::Qualifier => Value::Qualifier(self.buffer.trim_matches('"').to_string()),
            TokenKind::Pool => Value::Pool(pool::lex_pool(&self.buffer)?),
            TokenKind::Map => {
                let (name, map) = maps::parse_map_literal(&self.buffer)?;
                Value::Map(name, map)
            }
            kind if classify::is_symbol(kind, &self.buffer) => Value::Symbol(self.buffer.clone()),
            kind => {
                return Err(LexError::UnknownSymbol {
                    symbol: self.buffer.clone(),
                    kind,
                })
            }
        };
        Ok(value)
    }

    fn finish(&mut self) -> Result<(), LexError> {
        match self.state {
            kind @ (TokenKind::Qualifier | TokenKind::Pool | TokenKind::Map) => {
                Err(LexError::UnexpectedEnd { kind })
            }
            TokenKind::Number if self.buffer == "-" => Err(LexError::UnexpectedEnd {
                kind: TokenKind::NegativeSign,
            }),
            _ => {
                self.store()?;
                self.state = TokenKind::End;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lex(text: &str) -> Result<Vec<Token>, LexError> {
        Lexer::new().lex(text)
    }

    #[test]
    fn test_basic_roll() {
        let expected = vec![
            Token::number(3),
            Token::symbol(TokenKind::DiceOperator, "d"),
            Token::number(6),
            Token::symbol(TokenKind::AsOperator, "+"),
            Token::number(-2),
        ];
        assert_eq!(lex("3d6+-2").unwrap(), expected);
        assert_eq!(lex(" 3 d 6 + -2 ").unwrap(), expected);
    }

    #[test]
    fn test_multi_character_operators() {
        #[rustfmt::skip]
        let inputs = [
            ("3d!6", TokenKind::DiceOperator, "d!"),
            ("3>=6", TokenKind::ComparisonOperator, ">="),
            ("3!=6", TokenKind::ComparisonOperator, "!="),
            ("3g!6", TokenKind::PoolGenOperator, "g!"),
        ];

        for (input, kind, symbol) in inputs {
            let tokens = lex(input).unwrap();
            assert_eq!(tokens[1], Token::symbol(kind, symbol), "{input}");
        }

        let tokens = lex("[3,1]p%2").unwrap();
        assert_eq!(tokens[1], Token::symbol(TokenKind::PoolOperator, "p%"));
    }

    #[test]
    fn test_containers() {
        let tokens = lex(r#"T?"spam eggs":"ham""#).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::boolean(true),
                Token::symbol(TokenKind::ChoiceOperator, "?"),
                Token::qualifier("spam eggs"),
                Token::symbol(TokenKind::OptionsOperator, ":"),
                Token::qualifier("ham"),
            ]
        );

        let tokens = lex("S[3, 1 ,2]").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::symbol(TokenKind::UPoolDegenOperator, "S"),
                Token::pool([3, 1, 2]),
            ]
        );
    }

    #[test]
    fn test_map_token() {
        let tokens = lex(r#"{"spam"=1:"}", 2:"eggs"};1m"spam""#).unwrap();
        let map = BTreeMap::from([(1, "}".to_string()), (2, "eggs".to_string())]);
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Map, Value::Map("spam".into(), map)),
                Token::symbol(TokenKind::RollDelimiter, ";"),
                Token::number(1),
                Token::symbol(TokenKind::MappingOperator, "m"),
                Token::qualifier("spam"),
            ]
        );
    }

    #[test]
    fn test_lexing_errors() {
        #[rustfmt::skip]
        let inputs = [
            ("+2", "Cannot start with +."),
            (" +2", "Cannot start with +."),
            ("3 4", "4 cannot follow a NUMBER."),
            ("3T", "T cannot follow a NUMBER."),
            ("3d+2", "+ cannot follow a DICE_OPERATOR."),
            ("3d !2", "! cannot follow a DICE_OPERATOR."),
            ("-+", "+ cannot follow a NEGATIVE_SIGN."),
            ("- 3", "  cannot follow a NEGATIVE_SIGN."),
            (r#""spam"3"#, "3 cannot follow a QUALIFIER."),
            (r#""spam" 3"#, "3 cannot follow a QUALIFIER."),
            ("[1]3", "3 cannot follow a POOL."),
            ("T?3", "3 cannot follow a CHOICE_OPERATOR."),
            ("3!2", "! is not a valid COMPARISON_OPERATOR."),
            ("3p2", "p cannot follow a NUMBER."),
            ("[3]p2", "p is not a valid POOL_OPERATOR."),
            ("\"spam", "Unexpected end of input in a QUALIFIER."),
            ("[3, 1", "Unexpected end of input in a POOL."),
            ("-", "Unexpected end of input in a NEGATIVE_SIGN."),
            ("99999999999999999999", "99999999999999999999 is not a valid number."),
        ];

        for (input, expected) in inputs {
            assert_eq!(lex(input).unwrap_err().to_string(), expected, "{input}");
        }
    }

    #[test]
    fn test_lexer_is_reusable() {
        let mut lexer = Lexer::new();
        assert!(lexer.lex("3 4").is_err());
        assert_eq!(lexer.lex("4").unwrap(), vec![Token::number(4)]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(lex("").unwrap(), vec![]);
        assert_eq!(lex(" \t\n").unwrap(), vec![]);
    }
}
