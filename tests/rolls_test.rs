use std::io::Write;

use rand::{rngs::StdRng, SeedableRng};
use yadr::{
    add_dice_map, default_dice_maps, list_dice_maps, parse, roll_with, roll_with_maps, Error,
    EvalError, LoadedDice, Outcome,
};

fn run(input: &str, rolls: &[i64], expected: &str) {
    let mut dice = LoadedDice::new(rolls.to_vec());
    let rolled = roll_with(input, &mut dice).unwrap();
    assert_eq!(rolled.to_string(), expected, "{input}");
    assert_eq!(dice.remaining(), 0, "{input} left dice unrolled");
}

fn run_err(input: &str, expected: &str) {
    let error = roll_with(input, &mut LoadedDice::default()).unwrap_err();
    assert_eq!(error.to_string(), expected, "{input}");
}

#[test]
fn test_arithmetic() {
    run("3+2*4", &[], "11");
    run("3*2^4", &[], "48");
    run("3*(2+4)", &[], "18");
    run("5/2", &[], "2");
    run("-5 - -5", &[], "0");
}

#[test]
fn test_dice() {
    run("3d6", &[4, 4, 3], "11");
    run("3d6 + 2", &[4, 4, 3], "13");
    run("5d!4", &[2, 1, 4, 4, 3, 1, 4, 4, 2], "25");
    run("4dw6", &[4, 2, 1, 6], "13");
    run("4dw6", &[1, 6, 6, 6], "0");
    run("3dc12", &[1, 11, 3], "113");
    run("3dh6", &[2, 6, 3], "6");
    run("3dl6", &[2, 6, 3], "2");
}

#[test]
fn test_pools() {
    run("4g6", &[5, 8, 1, 9], "[5, 8, 1, 9]");
    run("[5, 8, 1, 9] ph 2", &[], "[8, 9]");
    run("[5, 8, 1, 9] pl 2", &[], "[5, 1]");
    run("[5, 8, 1, 9]pa5", &[], "[5, 8, 9]");
    run("[5, 8, 1, 9]pb5", &[], "[5, 1]");
    run("[5, 8, 1, 9]pf3", &[], "[5, 8, 3, 9]");
    run("[5, 8, 5, 9]pr5", &[], "[8, 9]");
    run("[5, 8, 1, 9]p%4", &[], "[1, 0, 1, 1]");
    run("S3g6+5", &[6, 6, 2], "19");
    run("N(4g!6)", &[6, 3, 2, 1, 4], "4");
    run("(4g!6)ns6", &[6, 3, 2, 1, 4], "1");
    run("(5g10)nb7", &[1, 7, 10, 3, 1], "0");
    run("C[4, 2]", &[], "42");
}

#[test]
fn test_choices() {
    run(r#"T?"hit":"miss""#, &[], r#""hit""#);
    run(r#"1d20 >= 11"#, &[11], "T");
    run(r#""hit" : "miss""#, &[], r#""hit":"miss""#);
}

#[test]
fn test_compound_rolls() {
    run("2d10;1d6", &[4, 4, 3], "8; 3");
    run("2d10 ; [1,2]; T", &[4, 4], "8; [1, 2]; T");
}

#[test]
fn test_dice_maps() {
    run(r#"1d3m"fudge""#, &[1], r#""-""#);
    run(r#"4d3-8; 1d8m"ability""#, &[3, 3, 3, 3, 4], r#"4; "success success""#);
    run(
        r#"{"coin" = 1:"heads", 2:"tails"}; 1d2m"coin""#,
        &[2],
        r#""tails""#,
    );
    run(r#"7m"fudge""#, &[], "7");
}

#[test]
fn test_errors() {
    run_err("+2", "Cannot start with +.");
    run_err("3 4", "4 cannot follow a NUMBER.");
    run_err("3d", "Unexpected end of roll: an operand is missing.");
    run_err("(3+2", "A group was opened without a matching ).");
    run_err("3;;3", "Empty roll: nothing to roll around a roll delimiter.");
    run_err("3d0", "Dice must have at least one side, not 0.");
    run_err("6/(3-3)", "Division by zero.");
    run_err(r#"1m"spam""#, "No dice map named \"spam\".");
    run_err("[1,2]ph1+1", "Cannot apply + to a pool and a number.");
    run_err(r#"{"coin"=1:"heads"}"#, "Nothing to roll: the input only defines dice maps.");
}

#[test]
fn test_limits() {
    run_err("1000d6", "Cannot roll 1000 dice at once, the limit is 999.");
    run_err(
        "9223372036854775807d6",
        "Cannot roll 9223372036854775807 dice at once, the limit is 999.",
    );
    run_err("(1000g!6)ph3", "Cannot roll 1000 dice at once, the limit is 999.");
    run_err("1000dw6", "Cannot roll 1000 dice at once, the limit is 999.");

    let deep = format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000));
    run_err(&deep, "Roll is nested more than 128 levels deep.");
    run_err(&format!("{}[1]", "S".repeat(200_000)), "Roll is nested more than 128 levels deep.");
}

#[test]
fn test_exponents_of_trivial_bases() {
    run("1^4294967296", &[], "1");
    run("0^4294967296", &[], "0");
    run("-1^4294967296", &[], "1");
    run("-1^4294967297", &[], "-1");
    run("1^0", &[], "1");
    run_err("2^4294967296", "Integer overflow.");
}

#[test]
fn test_error_kinds() {
    let mut dice = LoadedDice::default();
    assert!(matches!(roll_with("3 4", &mut dice), Err(Error::Lex(_))));
    assert!(matches!(roll_with("3d", &mut dice), Err(Error::Parse(_))));
    assert!(matches!(roll_with("3d0", &mut dice), Err(Error::Eval(_))));
    assert!(matches!(
        roll_with("1000d6", &mut dice),
        Err(Error::Eval(EvalError::TooManyDice(1000)))
    ));
}

#[test]
fn test_seeded_rolls_are_deterministic() {
    let first = roll_with("10d20; 6g!6", &mut StdRng::seed_from_u64(1)).unwrap();
    let second = roll_with("10d20; 6g!6", &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(first, second);

    let Outcome::Compound(outcomes) = first else {
        panic!("expected a compound roll");
    };
    let sum = outcomes[0].as_integer().unwrap();
    assert!((10..=200).contains(&sum));
}

#[test]
fn test_parse_without_rolling() {
    let rolls = parse("3d6 + 2; S[1, 2]").unwrap();
    let written = rolls.iter().map(|roll| roll.to_string()).collect::<Vec<_>>();
    assert_eq!(written, ["3d6+2", "S[1, 2]"]);
}

#[test]
fn test_list_dice_maps() {
    assert_eq!(
        list_dice_maps().unwrap(),
        ["ability", "boost", "difficulty", "fudge", "setback"]
    );
}

#[test]
fn test_add_dice_map_file() {
    let path = std::env::temp_dir().join(format!("yadr-maps-{}.yadn", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, r#"{{"coin"=1:"heads",2:"tails"}};"#).unwrap();
    writeln!(file, r#"{{"fudge"=1:"minus",2:"blank",3:"plus"}}"#).unwrap();
    drop(file);

    let mut maps = default_dice_maps().unwrap();
    maps.extend(add_dice_map(&path).unwrap());
    std::fs::remove_file(&path).unwrap();

    let rolled = roll_with_maps(
        r#"1d2m"coin"; 1d3m"fudge""#,
        &mut LoadedDice::new([1, 3]),
        &maps,
    )
    .unwrap();
    assert_eq!(rolled.to_string(), r#""heads"; "plus""#);
}
