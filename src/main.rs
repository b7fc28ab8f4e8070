use std::{fs, io::Read, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use greibach::{EmptyStringPolicy, Grammar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Productions after epsilon elimination
    Eps,
    /// Productions after unit production elimination
    Unit,
    /// Productions after left recursion elimination
    Elf,
    /// Productions in Greibach normal form
    Gnf,
    /// Transitions of the equivalent pushdown automaton
    Pda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Plain,
    Latex,
    Json,
}

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// What to print
    #[arg(value_enum)]
    output: Output,

    /// File containing the grammar (default: stdin)
    file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Keep the empty string in the language if the start variable is nullable
    #[arg(short, long)]
    keep_empty: bool,
}

fn read_input(file: Option<&PathBuf>) -> std::io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut input = String::new();
            std::io::stdin().lock().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let input = match read_input(cli.file.as_ref()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Failed to read grammar: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let g = match Grammar::parse(&input) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let policy = if cli.keep_empty {
        EmptyStringPolicy::RetainAtStart
    } else {
        EmptyStringPolicy::Discard
    };

    let text = if cli.output == Output::Pda {
        let t = g.to_pda(policy).to_transition_output_vec();
        match cli.format {
            OutputFormat::Plain => t.to_plaintext(),
            OutputFormat::Latex => t.to_latex(),
            OutputFormat::Json => t.to_json(),
        }
    } else {
        let eps = g.eliminate_epsilon(policy);
        let g = match cli.output {
            Output::Eps => eps,
            Output::Unit => eps.eliminate_unit_productions(),
            Output::Elf => eps.eliminate_unit_productions().eliminate_left_recursion(),
            _ => eps
                .eliminate_unit_productions()
                .eliminate_left_recursion()
                .to_greibach(),
        };
        let t = g.to_production_output_vec();
        match cli.format {
            OutputFormat::Plain => t.to_plaintext(),
            OutputFormat::Latex => t.to_latex(),
            OutputFormat::Json => t.to_json(),
        }
    };
    println!("{}", text);

    ExitCode::SUCCESS
}
