use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process,
};

use clap::{CommandFactory, Parser};
use tally::{Engine, Value, config::EngineConfig};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// tally evaluates natural-language calculations: numbers, currencies,
/// units, crypto, metals and percentages.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluates a single line.
    #[arg(short, long)]
    expression: Option<String>,

    /// Evaluates every line of a file. Use `-` for standard input.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Treats undefined names as errors.
    #[arg(long, env = "TALLY_STRICT")]
    strict: bool,

    /// Decimal places used when printing results.
    #[arg(short, long)]
    precision: Option<u8>,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prints the running total after the last line.
    #[arg(short, long)]
    total: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry().with(filter)
                                  .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                                  .init();
}

fn read_source(args: &Args) -> io::Result<Option<String>> {
    if let Some(expression) = &args.expression {
        return Ok(Some(expression.clone()));
    }
    match &args.file {
        Some(path) if path.as_os_str() == "-" => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        },
        Some(path) => fs::read_to_string(path).map(Some),
        None => Ok(None),
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let source = match read_source(&args) {
        Ok(Some(source)) => source,
        Ok(None) => {
            let _ = Args::command().print_help();
            return;
        },
        Err(err) => {
            eprintln!("Failed to read the input: {err}");
            process::exit(1);
        },
    };

    let mut config = EngineConfig::load(args.config.as_deref()).unwrap_or_else(|err| {
                                                                   eprintln!("{err}");
                                                                   process::exit(1);
                                                               });
    if let Some(precision) = args.precision {
        config.precision = precision;
    }
    config.strict |= args.strict;

    let engine = Engine::with_config(&config).unwrap_or_else(|err| {
                                                   eprintln!("{err}");
                                                   process::exit(1);
                                               });
    match engine.load_rates() {
        Ok(()) => {},
        Err(err) if err.is_missing() => debug!(%err, "no rate cache yet, using built-in rates"),
        Err(err) => warn!(%err, "using built-in rates"),
    }

    for (index, line) in source.lines().enumerate() {
        match engine.eval(line) {
            Value::Empty => {},
            Value::Error(err) => eprintln!("Line {}: {err}", index + 1),
            value => println!("{}", engine.format(&value)),
        }
    }

    if args.total {
        let totals = engine.grouped_totals();
        if totals.is_empty() {
            println!("Total: {}", engine.format(&engine.total()));
        } else {
            for total in &totals {
                println!("Total: {}", engine.format(total));
            }
        }
    }
}
