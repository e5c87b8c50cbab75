use std::{path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;
use yadr::{
    add_dice_map, default_dice_maps, list_dice_maps, roll_with_maps, RandomSource,
};

/// Execute YADN to roll dice.
#[derive(Debug, Parser)]
#[command(name = "yadr", version, about)]
struct Cli {
    /// A string of YADN describing the roll.
    yadn: Option<String>,

    /// List the names of the bundled dice maps.
    #[arg(short, long)]
    list_dice_maps: bool,

    /// Load the dice maps in the given file. Can be repeated.
    #[arg(short = 'm', long, value_name = "FILE")]
    add_dice_map: Vec<PathBuf>,

    /// Print the result as a native value instead of YADN.
    #[arg(short, long)]
    native: bool,

    /// Seed the dice so the roll can be repeated.
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace). Overridden by RUST_LOG.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let executed = match cli.seed {
        Some(seed) => execute(&cli, &mut StdRng::seed_from_u64(seed)),
        None => execute(&cli, &mut rand::thread_rng()),
    };

    match executed {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the command, returning the line to print.
fn execute<R: RandomSource + ?Sized>(cli: &Cli, rng: &mut R) -> Result<String, yadr::Error> {
    let Some(yadn) = &cli.yadn else {
        if cli.list_dice_maps {
            return Ok(list_dice_maps()?.join("\n"));
        }
        return Ok("Use `yadr -h` to view the available options.".to_string());
    };

    let mut maps = default_dice_maps()?;
    for path in &cli.add_dice_map {
        maps.extend(add_dice_map(path)?);
    }

    let outcome = roll_with_maps(yadn, rng, &maps)?;
    tracing::debug!(%yadn, ?outcome, "rolled");

    if cli.native {
        Ok(format!("{outcome:?}"))
    } else {
        Ok(outcome.to_string())
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "yadr=warn",
        1 => "yadr=debug",
        _ => "yadr=trace",
    }
}
