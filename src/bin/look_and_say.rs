//! look-and-say CLI
//!
//! Commands:
//!   look-and-say sequence  — print the terms of a sequence
//!   look-and-say split     — split a string into chunks
//!   look-and-say table     — print a periodic table
//!   look-and-say json      — print a periodic table as JSON
//!   look-and-say constant  — print the dominant eigenvalue
//!   look-and-say poly      — print the characteristic polynomial
//!   look-and-say decay     — follow a string until it splits into elements

use look_and_say::chemistry::{DEFAULT_ABUNDANCE_SUM, DEFAULT_DECIMAL_PLACES};
use look_and_say::{Chemistry, Cosmology, ElementOrder, LookAndSay, Result, SplitRule};
use std::env;
use std::process;

const RULES: &str = "decimal | binary | negafibnary | roman | say-again | look-knave";

fn print_usage() {
    println!(
        r#"
Usage: look-and-say <command> [options]

Commands:
  sequence <seed> [terms] [rule]          Print a look-and-say sequence
  split    <string>                       Split with Conway's theorem
  table    [rule] [order] [seeds...]      Print the periodic table
  json     [rule] [order] [seeds...]      Print the periodic table as JSON
  constant [rule] [seeds...]              Print the dominant eigenvalue
  poly     [rule] [--expanded|--latex]    Print the characteristic polynomial
  decay    <string>                       Decay tree and days until common

Rules:   {RULES}
         (table, json, constant and poly need decimal, binary or negafibnary)
Orders:  abundance | name | string | "string length"

Examples:
  look-and-say sequence 1 10
  look-and-say table decimal abundance
  look-and-say constant binary 1
  look-and-say poly negafibnary --latex
  look-and-say decay 22233
"#
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "sequence" => cmd_sequence(&args[2..]),
        "split" => cmd_split(&args[2..]),
        "table" => cmd_table(&args[2..], false),
        "json" => cmd_table(&args[2..], true),
        "constant" => cmd_constant(&args[2..]),
        "poly" => cmd_poly(&args[2..]),
        "decay" => cmd_decay(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("  Error: {}", e);
        process::exit(1);
    }
}

fn rule_named(name: &str) -> LookAndSay {
    LookAndSay::by_name(name).unwrap_or_else(|| {
        eprintln!("Unknown rule: {} (expected {})", name, RULES);
        process::exit(2);
    })
}

const CHEMISTRY_RULES: &str = "decimal, binary or negafibnary";

/// Exits when the rule has no chemistry rather than splitting blindly
fn chemistry_named(name: &str) -> Chemistry {
    Chemistry::for_rule(name).unwrap_or_else(|| {
        if LookAndSay::by_name(name).is_some() {
            eprintln!("Rule {} has no known chemistry; use {}", name, CHEMISTRY_RULES);
        } else {
            eprintln!("Unknown rule: {} (expected {})", name, CHEMISTRY_RULES);
        }
        process::exit(2);
    })
}

fn default_seeds(chem: &Chemistry) -> Vec<String> {
    let seed = if chem.look_and_say().is_conway() { "9" } else { "0" };
    vec![seed.to_string()]
}

/// Rule from `args[0]`, seeds from `args[seeds_from..]`
fn build_chemistry(args: &[String], seeds_from: usize) -> Result<Chemistry> {
    let mut chem = chemistry_named(args.first().map(String::as_str).unwrap_or("decimal"));
    let seeds = match args.get(seeds_from..) {
        Some(seeds) if !seeds.is_empty() => seeds.to_vec(),
        _ => default_seeds(&chem),
    };
    chem.generate_elements(&seeds)?;
    Ok(chem)
}

fn cmd_sequence(args: &[String]) -> Result<()> {
    let Some(seed) = args.first() else {
        eprintln!("Usage: look-and-say sequence <seed> [terms] [rule]");
        return Ok(());
    };
    let terms = match args.get(1).map(|t| t.parse::<usize>()) {
        Some(Ok(terms)) => terms,
        Some(Err(_)) => {
            eprintln!("terms must be a number");
            process::exit(2);
        }
        None => 10,
    };
    let mut las = rule_named(args.get(2).map(String::as_str).unwrap_or("decimal"));
    for (i, term) in las.generate_sequence(seed, terms)?.iter().enumerate() {
        println!("{:>3}  {}", i + 1, term);
    }
    if let Ok(ratio) = las.last_length_ratio() {
        println!("  Last length ratio: {:.6}", ratio);
    }
    Ok(())
}

fn cmd_split(args: &[String]) -> Result<()> {
    let Some(string) = args.first() else {
        eprintln!("Usage: look-and-say split <string>");
        return Ok(());
    };
    println!("{}", SplitRule::Conway.split(string).join(" | "));
    Ok(())
}

fn cmd_table(args: &[String], json: bool) -> Result<()> {
    let mut chem = build_chemistry(args, 2)?;
    if let Some(order) = args.get(1) {
        chem.order_elements(order.parse::<ElementOrder>()?, false, true)?;
    }
    let table = chem.periodic_table(DEFAULT_DECIMAL_PLACES, DEFAULT_ABUNDANCE_SUM)?;
    if json {
        match table.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("  Failed to serialize: {}", e),
        }
    } else {
        print!("{}", table);
    }
    Ok(())
}

fn cmd_constant(args: &[String]) -> Result<()> {
    let mut chem = build_chemistry(args, 1)?;
    println!("  Elements:            {}", chem.len());
    println!("  Dominant eigenvalue: {:.15}", chem.dominant_eigenvalue()?);
    Ok(())
}

fn cmd_poly(args: &[String]) -> Result<()> {
    let expanded = args.iter().any(|a| a == "--expanded");
    let latex = args.iter().any(|a| a == "--latex");
    let rule: Vec<String> = args.iter().filter(|a| !a.starts_with("--")).cloned().collect();
    let chem = build_chemistry(&rule, 1)?;
    let polynomial = chem.characteristic_polynomial(!expanded)?;
    if latex {
        println!("{}", polynomial.to_latex());
    } else {
        println!("{}", polynomial);
    }
    Ok(())
}

fn cmd_decay(args: &[String]) -> Result<()> {
    let Some(string) = args.first() else {
        eprintln!("Usage: look-and-say decay <string>");
        return Ok(());
    };
    let cosmo = Cosmology::conway()?;
    for (chunk, decay) in cosmo.decay_tree(string)? {
        println!("  {} -> [{}]", chunk, decay.join(", "));
    }
    println!("  Days until common: {}", cosmo.days_until_common(string)?);
    Ok(())
}
