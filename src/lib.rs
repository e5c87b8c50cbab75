//! Roll dice written in YADN (Yet Another Dice Notation).
//!
//! ```rust
//! # use yadr::{roll, roll_with, LoadedDice};
//! # use rand::rngs::StdRng;
//! # use rand::SeedableRng;
//! #
//! # fn main() -> Result<(), yadr::Error> {
//! // Roll 3 d6 and add 2.
//! let rolled = roll("3d6+2")?;
//! println!("{rolled}");
//!
//! // Use a custom Rng that implements the rand::Rng trait.
//! // Sum the highest 3 of 5 d6.
//! let mut rng = StdRng::seed_from_u64(1);
//! let rolled = roll_with("S((5g6)ph3)", &mut rng)?;
//! println!("{rolled}");
//!
//! // Roll dice with known values, and look a die up in a dice map.
//! let mut dice = LoadedDice::new([1, 2, 3, 3, 3]);
//! let rolled = roll_with(r#"4d3-8;1d3m"fudge""#, &mut dice)?;
//! assert_eq!(rolled.to_string(), r#"1; "+""#);
//! # Ok(())
//! # }
//! ```

mod error;
mod evaluate;
mod lex;
mod maps;
mod parse;

pub use error::{Error, EvalError, LexError, MapError, ParseError};
pub use evaluate::{dice_roll, evaluate_rolls, pool, LoadedDice, Outcome, RandomSource};
pub use lex::{Lexer, Token, TokenKind, Value};
pub use maps::{
    default_dice_maps, parse_dice_maps, parse_map_literal, read_dice_maps, DiceMap, DiceMaps,
};
pub use parse::{
    parse_tokens, Arithmetic, Comparison, DiceRoll, Expression, Operator, PoolDegeneration,
    PoolFilter, PoolGeneration, Roll, UnaryOperator,
};

/// Splits the notation into tokens.
pub fn lex(yadn: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new().lex(yadn)
}

/// Parses the notation returning the parsed rolls without rolling the dice.
pub fn parse(yadn: &str) -> Result<Vec<Roll>, Error> {
    let tokens = lex(yadn)?;
    Ok(parse_tokens(&tokens)?)
}

/// Parses the notation returning the result of rolling all the dice parsed.
pub fn roll(yadn: &str) -> Result<Outcome, Error> {
    roll_with(yadn, &mut rand::thread_rng())
}

/// Same as `roll()` but allows you to choose where the dice values come from.
pub fn roll_with<R: RandomSource + ?Sized>(yadn: &str, rng: &mut R) -> Result<Outcome, Error> {
    let maps = default_dice_maps()?;
    roll_with_maps(yadn, rng, &maps)
}

/// Same as `roll_with()` but looks dice maps up in `maps` instead of the
/// bundled ones.
pub fn roll_with_maps<R: RandomSource + ?Sized>(
    yadn: &str,
    rng: &mut R,
    maps: &DiceMaps,
) -> Result<Outcome, Error> {
    let rolls = parse(yadn)?;
    Ok(evaluate_rolls(&rolls, rng, maps)?)
}

/// The names of the bundled dice maps, sorted.
pub fn list_dice_maps() -> Result<Vec<String>, Error> {
    Ok(default_dice_maps()?.into_keys().collect())
}

/// Loads the dice maps stored in a file.
pub fn add_dice_map(path: impl AsRef<std::path::Path>) -> Result<DiceMaps, Error> {
    Ok(read_dice_maps(path)?)
}
