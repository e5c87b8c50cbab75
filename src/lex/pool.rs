use tracing::trace;

use super::{classify::is_whitespace, TokenKind};
use crate::error::LexError;

/// Lexes the raw text of a pool literal such as `[3, -1, 5]` into its members.
///
/// The pool may be delimited by brackets or braces but must close with the
/// delimiter matching its opening one. Empty pools are allowed, a trailing
/// member delimiter is not.
pub(crate) fn lex_pool(text: &str) -> Result<Vec<i64>, LexError> {
    let mut chars = text.chars();
    let close = match chars.next() {
        Some('[') => ']',
        Some('{') => '}',
        Some(c) => return Err(LexError::CannotStart { symbol: c }),
        None => {
            return Err(LexError::UnexpectedEnd {
                kind: TokenKind::Pool,
            })
        }
    };

    let mut members = Vec::new();
    let mut buffer = String::new();
    let mut state = TokenKind::PoolOpen;

    for c in chars {
        if buffer == "-" && !c.is_ascii_digit() {
            return Err(cannot_follow(c, TokenKind::NegativeSign));
        }

        if is_whitespace(c) {
            if state == TokenKind::Member {
                finish_member(&mut buffer, &mut members)?;
            }
            continue;
        }

        state = match state {
            TokenKind::PoolOpen | TokenKind::MemberDelimiter
                if c.is_ascii_digit() || c == '-' =>
            {
                buffer.push(c);
                TokenKind::Member
            }
            TokenKind::PoolOpen if c == close => TokenKind::PoolClose,
            TokenKind::Member if !buffer.is_empty() && c.is_ascii_digit() => {
                buffer.push(c);
                TokenKind::Member
            }
            TokenKind::Member if c == ',' => {
                finish_member(&mut buffer, &mut members)?;
                TokenKind::MemberDelimiter
            }
            TokenKind::Member if c == close => {
                finish_member(&mut buffer, &mut members)?;
                TokenKind::PoolClose
            }
            state => return Err(cannot_follow(c, state)),
        };
    }

    if state != TokenKind::PoolClose {
        return Err(LexError::UnexpectedEnd {
            kind: TokenKind::Pool,
        });
    }

    trace!(?members, "lexed pool");
    Ok(members)
}

fn finish_member(buffer: &mut String, members: &mut Vec<i64>) -> Result<(), LexError> {
    if buffer.is_empty() {
        return Ok(());
    }
    let member = buffer
        .parse()
        .map_err(|_| LexError::InvalidNumber(buffer.clone()))?;
    members.push(member);
    buffer.clear();
    Ok(())
}

fn cannot_follow(symbol: char, state: TokenKind) -> LexError {
    LexError::CannotFollow { symbol, state }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_members() {
        #[rustfmt::skip]
        let inputs = [
            ("[]", vec![]),
            ("[ ]", vec![]),
            ("[3]", vec![3]),
            ("[3,2,1]", vec![3, 2, 1]),
            ("[ 10 , -2,\t7\n]", vec![10, -2, 7]),
            ("{5, 1}", vec![5, 1]),
        ];

        for (input, expected) in inputs {
            assert_eq!(lex_pool(input).unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_pool_errors() {
        #[rustfmt::skip]
        let inputs = [
            ("[1,]", "] cannot follow a MEMBER_DELIMITER."),
            ("[,1]", ", cannot follow a POOL_OPEN."),
            ("[1 2]", "2 cannot follow a MEMBER."),
            ("[1-2]", "- cannot follow a MEMBER."),
            ("[-]", "] cannot follow a NEGATIVE_SIGN."),
            ("[1}", "} cannot follow a MEMBER."),
            ("[1, 2", "Unexpected end of input in a POOL."),
            ("(1)", "Cannot start with (."),
        ];

        for (input, expected) in inputs {
            assert_eq!(lex_pool(input).unwrap_err().to_string(), expected, "{input}");
        }
    }

    #[test]
    fn test_member_out_of_range() {
        let error = lex_pool("[99999999999999999999]").unwrap_err();
        assert!(matches!(error, LexError::InvalidNumber(_)));
    }
}
