use fl_compiler::ast::pp::PrettyPrintable;
use fl_compiler::ast::Definition;
use fl_compiler::error::Error;
use fl_compiler::parser::{parse_program, parse_type};
use fl_compiler::tc::Unifier;

use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use pretty_trait::to_string;
use simple_logger::SimpleLogger;

use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(version, about = "Front end for a small functional language")]
struct Args {
    /// Increases logging verbosity, may be repeated.
    #[clap(short, long, parse(from_occurrences))]
    verbose: usize,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parses a source file and prints its definitions.
    Dump {
        input: PathBuf,

        /// Preferred maximum line width.
        #[clap(long, default_value = "80")]
        width: usize,
    },

    /// Prints the type of every data constructor in a source file.
    Signatures { input: PathBuf },

    /// Unifies two type expressions like "a -> Int" and "Bool -> b".
    Unify { left: String, right: String },
}

fn log_level(verbose: usize) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn main() -> Result<(), Error> {
    let args = Args::parse();

    SimpleLogger::new()
        .with_level(log_level(args.verbose))
        .init()?;

    match args.command {
        Command::Dump { input, width } => {
            let source = fs::read_to_string(&input)?;
            let program = parse_program(&source)?;

            info!("Read {} definitions from {}", program.len(), input.display());

            println!("{}", to_string(&program.to_pretty(), Some(width), 4));
        }

        Command::Signatures { input } => {
            let source = fs::read_to_string(&input)?;
            let program = parse_program(&source)?;

            for definition in program.iter() {
                if let Definition::Data(data) = definition {
                    for (name, ty) in data.constructor_signatures() {
                        println!("{} :: {}", name, ty);
                    }
                }
            }
        }

        Command::Unify { left, right } => {
            let left = parse_type(&left)?;
            let right = parse_type(&right)?;

            let mut unifier = Unifier::new();
            unifier.unify(&left, &right)?;

            println!("{}", unifier.resolve(&left));

            let mut bindings: Vec<_> = unifier.substitution().keys().collect();
            bindings.sort();

            for var in bindings {
                println!("  {} = {}", var, unifier.resolve(&var.clone().into()));
            }
        }
    }

    Ok(())
}
