use std::{fs, io::Read, process};

use first_follow::{Error, Grammar};
use log::{debug, info};

fn print_help() {
    println!("Usage: first-follow outputs [options] [grammar file]");
    println!("outputs:");
    println!("  prod: Productions");
    println!("  first: Nullable and first sets");
    println!("  follow: Follow sets");
    println!("  nff: Nullable, first and follow");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!("  -s <symbol>: Start symbol (default: first left side)");
    println!("The grammar is read from stdin when no file is given. It is either");
    println!("written as `A -> x B | ε` rules or as a JSON object of productions.");
}

enum OutputFormat {
    Plain,
    LaTeX,
    JSON,
}

fn read_input(path: Option<&str>) -> Result<String, String> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e)),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .lock()
                .read_to_string(&mut input)
                .map_err(|e| format!("stdin: {}", e))?;
            Ok(input)
        }
    }
}

fn run(
    g: &Grammar,
    outputs: &[&str],
    output_format: &OutputFormat,
    start_symbol: Option<&str>,
) -> Result<(), Error> {
    let first = g.compute_first();
    let follow = match start_symbol.or_else(|| g.default_start_symbol()) {
        Some(start) => Some(g.compute_follow(&first, start)?),
        None => None,
    };
    info!(
        "{} non-terminals, {} terminals",
        g.non_terminal_count(),
        g.terminals().len()
    );

    for output in outputs {
        if *output == "prod" {
            let t = g.to_production_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json(),
                }
            );
            continue;
        }
        let t = match *output {
            "first" => g.to_non_terminal_output_vec(Some(&first), None),
            "follow" => g.to_non_terminal_output_vec(None, follow.as_ref()),
            _ => g.to_non_terminal_output_vec(Some(&first), follow.as_ref()),
        };
        println!(
            "{}",
            match output_format {
                OutputFormat::Plain => t.to_plaintext(),
                OutputFormat::LaTeX => t.to_latex(),
                OutputFormat::JSON => t.to_json(),
            }
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let mut outputs: Vec<&str> = Vec::new();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut i: usize = 0;
    while i < args.len() && ["prod", "first", "follow", "nff"].contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }

    let mut output_format = OutputFormat::Plain;
    let mut start_symbol: Option<&str> = None;

    while i < args.len() && ["-h", "--help", "-l", "-j", "-s"].contains(&args[i].as_str()) {
        if args[i] == "-h" || args[i] == "--help" {
            print_help();
            return;
        } else if args[i] == "-l" {
            output_format = OutputFormat::LaTeX;
        } else if args[i] == "-j" {
            output_format = OutputFormat::JSON;
        } else if args[i] == "-s" {
            i += 1;
            match args.get(i) {
                Some(s) => start_symbol = Some(s.as_str()),
                None => {
                    print_help();
                    process::exit(2);
                }
            }
        }
        i += 1;
    }

    if i + 1 < args.len() || outputs.is_empty() {
        print_help();
        return;
    }

    let path = args.get(i).map(|s| s.as_str());
    debug!("reading grammar from {}", path.unwrap_or("stdin"));
    let input = match read_input(path) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let result = Grammar::load(&input)
        .and_then(|g| run(&g, &outputs, &output_format, start_symbol));
    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
