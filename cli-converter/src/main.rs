use clap::{Parser, ValueEnum};
use dkb_parser::{DkbStatement, ParseError, ParseResult};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Код выхода, если в режиме `--strict` были пропущены строки
const EXIT_WITH_WARNINGS: i32 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "cli_converter",
    version,
    about = "Извлекает операции из текста кредитно-карточной выписки DKB.",
    long_about = None,
)]
struct Args {
    /// Входной файл с текстом, извлечённым из PDF
    #[arg(long)]
    input: PathBuf,

    /// Формат вывода
    #[arg(long, value_enum, default_value_t = Format::Json)]
    output_format: Format,

    /// Завершаться с кодом 2, если какие-то строки не удалось разобрать
    #[arg(long)]
    strict: bool,
}

/// Поддерживаемые форматы вывода
#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Json,
    Csv,
    Table,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(result) => {
            if result.has_warnings() && args.strict {
                process::exit(EXIT_WITH_WARNINGS);
            }
        }
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<ParseResult, ParseError> {
    if !args.input.exists() {
        eprintln!("input file does not exist: {}", args.input.display());
        process::exit(1)
    }

    let file = File::open(&args.input)?;
    let reader = io::BufReader::new(file);

    let statement = DkbStatement::parse(reader)?;
    if !statement.looks_like_dkb() {
        warn!(
            input = %args.input.display(),
            "input does not look like a DKB credit card statement"
        );
    }

    let result: ParseResult = statement.into();
    info!(
        transactions = result.transactions.len(),
        warnings = result.warnings.len(),
        "statement parsed"
    );

    let stdout = io::stdout();
    let handle = stdout.lock();

    match args.output_format {
        Format::Json => result.write_json(handle)?,
        Format::Csv => result.write_csv(handle)?,
        Format::Table => result.write_table(handle)?,
    }

    Ok(result)
}
