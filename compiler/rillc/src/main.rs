//! Rill CLI.

use rillc::commands::{check_file, lex_file, run_file};
use rillc::{init_tracing, RunOptions};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let mut options = RunOptions::default();
            let mut file_path = None;

            let mut rest = args.iter().skip(2);
            while let Some(arg) = rest.next() {
                match arg.as_str() {
                    "--call" => {
                        let Some(name) = rest.next() else {
                            eprintln!("error: --call needs a function name");
                            std::process::exit(1);
                        };
                        options.call = Some(name.clone());
                    }
                    "--max-depth" => {
                        let Some(depth) = rest.next().and_then(|d| d.parse::<usize>().ok()) else {
                            eprintln!("error: --max-depth needs a positive number");
                            std::process::exit(1);
                        };
                        options.max_depth = depth;
                    }
                    _ if !arg.starts_with('-') && file_path.is_none() => {
                        file_path = Some(arg.as_str());
                    }
                    _ => {
                        eprintln!("error: unknown option '{arg}'");
                        std::process::exit(1);
                    }
                }
            }

            let Some(path) = file_path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: rill run <file.rill> [--call <function>] [--max-depth <n>]");
                std::process::exit(1);
            };
            run_file(path, &options);
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: rill check <file.rill>");
                std::process::exit(1);
            }
            check_file(&args[2]);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: rill lex <file.rill>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("rill {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Rill scripting language");
    println!();
    println!("Usage: rill <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>     Compile and run a script");
    println!("                   --call <function>  call a function after the top level");
    println!("                   --max-depth <n>    limit nested calls (default 512)");
    println!("  check <file>   Compile a script without running it");
    println!("  lex <file>     Print the token stream");
    println!("  help           Show this message");
    println!("  version        Show the version");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=rill_eval=debug) for tracing output.");
}
