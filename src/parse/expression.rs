use tracing::debug;

use super::{Expression, Operator, Roll, UnaryOperator};
use crate::{
    error::ParseError,
    lex::{Token, TokenKind, Value},
};

type ParseResult = Result<Expression, ParseError>;

/// How deep groups, unary operators and operator chains may nest in a roll.
pub const MAX_DEPTH: usize = 128;

/// Splits tokens on roll delimiters and parses each part into a roll.
pub fn parse_tokens(tokens: &[Token]) -> Result<Vec<Roll>, ParseError> {
    split_rolls(tokens).map(parse_roll).collect()
}

/// The token slices between roll delimiters, in order.
pub fn split_rolls(tokens: &[Token]) -> impl Iterator<Item = &[Token]> {
    tokens.split(|token| token.kind == TokenKind::RollDelimiter)
}

/// Parses the tokens of one roll, with no roll delimiters among them.
pub fn parse_roll(tokens: &[Token]) -> Result<Roll, ParseError> {
    if let [Token {
        kind: TokenKind::Map,
        value: Value::Map(name, map),
    }] = tokens
    {
        debug!(%name, "parsed dice map");
        return Ok(Roll::DiceMap {
            name: name.clone(),
            map: map.clone(),
        });
    }
    if tokens.is_empty() {
        return Err(ParseError::EmptyRoll);
    }

    let mut parser = Parser::new(tokens);
    let expression = parser.parse_choice()?;
    if let Some(token) = parser.peek() {
        return Err(unexpected(token));
    }

    debug!(%expression, "parsed roll");
    Ok(Roll::Expression(expression))
}

/// A recursive descent parser with one function per precedence level,
/// loosest first. Every binary level is left associative.
///
/// `depth` counts the open groups, unary operators and chained binary
/// operators above the current position, so the tree is never deeper than
/// the parser can recurse.
struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.peek()?;
        self.position += 1;
        Some(token)
    }

    fn next_if_kind(&mut self, kind: TokenKind) -> Option<&'t Token> {
        match self.peek() {
            Some(token) if token.kind == kind => self.next(),
            _ => None,
        }
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_binary(
        &mut self,
        kind: TokenKind,
        parse_operand: fn(&mut Self) -> ParseResult,
    ) -> ParseResult {
        let depth = self.depth;
        let mut left = parse_operand(self)?;

        while let Some(token) = self.next_if_kind(kind) {
            self.descend()?;
            let op = operator(token)?;
            let right = parse_operand(self)?;
            left = Expression::Infix(op, Box::new(left), Box::new(right));
        }

        self.depth = depth;
        Ok(left)
    }

    fn parse_choice(&mut self) -> ParseResult {
        self.parse_binary(TokenKind::ChoiceOperator, Self::parse_options)
    }

    fn parse_options(&mut self) -> ParseResult {
        self.parse_binary(TokenKind::OptionsOperator, Self::parse_mapping)
    }

    fn parse_mapping(&mut self) -> ParseResult {
        self.parse_binary(TokenKind::MappingOperator, Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> ParseResult {
        self.parse_binary(TokenKind::ComparisonOperator, Self::parse_add_sub)
    }

    fn parse_add_sub(&mut self) -> ParseResult {
        self.parse_binary(TokenKind::AsOperator, Self::parse_mul_div)
    }

    fn parse_mul_div(&mut self) -> ParseResult {
        self.parse_binary(TokenKind::MdOperator, Self::parse_exponent)
    }

    fn parse_exponent(&mut self) -> ParseResult {
        self.parse_binary(TokenKind::ExOperator, Self::parse_dice)
    }

    fn parse_dice(&mut self) -> ParseResult {
        self.parse_binary(TokenKind::DiceOperator, Self::parse_pool_degen)
    }

    fn parse_pool_degen(&mut self) -> ParseResult {
        self.parse_binary(TokenKind::PoolDegenOperator, Self::parse_unary_pool_degen)
    }

    fn parse_unary_pool_degen(&mut self) -> ParseResult {
        let Some(token) = self.next_if_kind(TokenKind::UPoolDegenOperator) else {
            return self.parse_pool_operator();
        };
        let op = unary_operator(token)?;
        let depth = self.depth;
        self.descend()?;
        let operand = self.parse_unary_pool_degen()?;
        self.depth = depth;
        Ok(Expression::Prefix(op, Box::new(operand)))
    }

    fn parse_pool_operator(&mut self) -> ParseResult {
        self.parse_binary(TokenKind::PoolOperator, Self::parse_pool_gen)
    }

    fn parse_pool_gen(&mut self) -> ParseResult {
        self.parse_binary(TokenKind::PoolGenOperator, Self::parse_atom)
    }

    fn parse_atom(&mut self) -> ParseResult {
        let token = self.next().ok_or(ParseError::UnexpectedEnd)?;

        match (&token.kind, &token.value) {
            (TokenKind::Number, Value::Number(number)) => Ok(Expression::Number(*number)),
            (TokenKind::Boolean, Value::Boolean(boolean)) => Ok(Expression::Boolean(*boolean)),
            (TokenKind::Qualifier, Value::Qualifier(qualifier)) => {
                Ok(Expression::Qualifier(qualifier.clone()))
            }
            (TokenKind::Pool, Value::Pool(members)) => Ok(Expression::Pool(members.clone())),
            (TokenKind::GroupOpen, _) => {
                let depth = self.depth;
                self.descend()?;
                let expression = self.parse_choice()?;
                self.depth = depth;
                self.next_if_kind(TokenKind::GroupClose)
                    .ok_or(ParseError::UnclosedGroup)?;
                Ok(Expression::Parens(Box::new(expression)))
            }
            _ => Err(unexpected(token)),
        }
    }
}

fn operator(token: &Token) -> Result<Operator, ParseError> {
    let Value::Symbol(symbol) = &token.value else {
        return Err(unexpected(token));
    };
    Operator::from_token(token.kind, symbol).ok_or_else(|| ParseError::UnknownOperator {
        kind: token.kind,
        symbol: symbol.clone(),
    })
}

fn unary_operator(token: &Token) -> Result<UnaryOperator, ParseError> {
    let Value::Symbol(symbol) = &token.value else {
        return Err(unexpected(token));
    };
    UnaryOperator::from_symbol(symbol).ok_or_else(|| ParseError::UnknownOperator {
        kind: token.kind,
        symbol: symbol.clone(),
    })
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        kind: token.kind,
        token: token.to_string(),
    }
}
