//! Dice maps: named lookup tables that turn die faces into symbols.
//!
//! A map is written `{"name"=1:"-",2:"",3:"+"}`. A map file holds one or
//! more maps separated by `;`.

use std::{collections::BTreeMap, fs, path::Path};

use tracing::debug;
use winnow::{
    ascii::{dec_int, multispace0},
    combinator::{cut_err, delimited, opt, separated, separated_pair, terminated},
    error::{StrContext, StrContextValue},
    token::take_till,
    PResult, Parser,
};

use crate::error::MapError;

pub type DiceMap = BTreeMap<i64, String>;
pub type DiceMaps = BTreeMap<String, DiceMap>;

const DEFAULT_DICE_MAPS: &str = include_str!("../data/dice_maps.yadn");

fn parse_qualifier<'s>(input: &mut &'s str) -> PResult<&'s str> {
    delimited('"', take_till(0.., '"'), cut_err('"'))
        .context(StrContext::Label("qualifier"))
        .parse_next(input)
}

fn parse_face(input: &mut &str) -> PResult<i64> {
    dec_int
        .context(StrContext::Label("face"))
        .parse_next(input)
}

fn parse_pair(input: &mut &str) -> PResult<(i64, String)> {
    separated_pair(
        parse_face,
        (multispace0, cut_err(':'), multispace0),
        cut_err(parse_qualifier.map(str::to_string)),
    )
    .parse_next(input)
}

fn parse_name(input: &mut &str) -> PResult<String> {
    terminated(parse_qualifier, (multispace0, '=', multispace0))
        .map(str::to_string)
        .parse_next(input)
}

fn parse_map(input: &mut &str) -> PResult<(String, DiceMap)> {
    let (name, pairs): (Option<String>, Vec<(i64, String)>) = delimited(
        ('{', multispace0),
        (
            opt(parse_name),
            separated(0.., parse_pair, (multispace0, ',', multispace0)),
        ),
        (
            multispace0,
            cut_err('}').context(StrContext::Expected(StrContextValue::CharLiteral('}'))),
        ),
    )
    .context(StrContext::Label("dice map"))
    .parse_next(input)?;

    Ok((name.unwrap_or_default(), pairs.into_iter().collect()))
}

fn parse_map_file(input: &mut &str) -> PResult<Vec<(String, DiceMap)>> {
    delimited(
        multispace0,
        separated(1.., parse_map, (multispace0, ';', multispace0)),
        (multispace0, opt(';'), multispace0),
    )
    .parse_next(input)
}

/// Parses a single map literal, as found inline in a roll.
pub fn parse_map_literal(text: &str) -> Result<(String, DiceMap), MapError> {
    parse_map
        .parse(text)
        .map_err(|e| MapError::Syntax(e.to_string()))
}

/// Parses the contents of a dice map file.
pub fn parse_dice_maps(text: &str) -> Result<DiceMaps, MapError> {
    let maps = parse_map_file
        .parse(text)
        .map_err(|e| MapError::Syntax(e.to_string()))?;
    Ok(maps.into_iter().collect())
}

/// Loads the dice maps stored in the file at `path`.
pub fn read_dice_maps(path: impl AsRef<Path>) -> Result<DiceMaps, MapError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let maps = parse_dice_maps(&text)?;
    debug!(path = %path.display(), count = maps.len(), "loaded dice maps");
    Ok(maps)
}

/// The dice maps bundled with the crate.
pub fn default_dice_maps() -> Result<DiceMaps, MapError> {
    parse_dice_maps(DEFAULT_DICE_MAPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_literal() {
        let (name, map) = parse_map_literal(r#"{"spam"=1:"eggs", 2 : "bacon",-1:""}"#).unwrap();
        assert_eq!(name, "spam");
        assert_eq!(
            map,
            DiceMap::from([
                (-1, String::new()),
                (1, "eggs".to_string()),
                (2, "bacon".to_string()),
            ])
        );
    }

    #[test]
    fn test_empty_and_unnamed_maps() {
        assert_eq!(parse_map_literal("{}").unwrap(), (String::new(), DiceMap::new()));
        assert_eq!(parse_map_literal("{ }").unwrap(), (String::new(), DiceMap::new()));

        let (name, map) = parse_map_literal(r#"{1:"one"}"#).unwrap();
        assert_eq!(name, "");
        assert_eq!(map.get(&1).map(String::as_str), Some("one"));
    }

    #[test]
    fn test_later_duplicate_face_wins() {
        let (_, map) = parse_map_literal(r#"{"spam"=1:"eggs",1:"bacon"}"#).unwrap();
        assert_eq!(map.get(&1).map(String::as_str), Some("bacon"));
    }

    #[test]
    fn test_malformed_maps() {
        let inputs = [
            r#"{"spam"}"#,
            r#"{"spam"=1"eggs"}"#,
            r#"{"spam"=1:"eggs",}"#,
            r#"{"spam"=1:"eggs""#,
            r#"{"spam"=a:"eggs"}"#,
            r#"{"spam"=1:"eggs"} 3"#,
        ];

        for input in inputs {
            assert!(parse_map_literal(input).is_err(), "{input}");
        }
    }

    #[test]
    fn test_map_file() {
        let text = "\n{\"a\"=1:\"x\"} ;\n{\"b\"=2:\"y\"};\n";
        let maps = parse_dice_maps(text).unwrap();
        assert_eq!(maps.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(maps["b"][&2], "y");
    }

    #[test]
    fn test_default_dice_maps() {
        let maps = default_dice_maps().unwrap();
        assert_eq!(
            maps.keys().collect::<Vec<_>>(),
            ["ability", "boost", "difficulty", "fudge", "setback"]
        );
        assert_eq!(maps["fudge"][&3], "+");
        assert_eq!(maps["ability"].len(), 8);
        assert_eq!(maps["setback"].len(), 6);
    }

    #[test]
    fn test_missing_file() {
        let error = read_dice_maps("/definitely/not/here.yadn").unwrap_err();
        assert!(matches!(error, MapError::Io { .. }));
    }
}
