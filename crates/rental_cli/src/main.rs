use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use rental_core::core_api::{
    CoreError, CoreErrorCode, DEFAULT_DELIMITER, Engine, MalformedPolicy, ParseOptions,
};
use rental_render::{
    JsonStyle, SummaryOptions, render_report_json, render_summary, write_json_file,
};

const DEFAULT_DEX_PATH: &str = "dex/johto.json";
const DEFAULT_RENTAL_PATH: &str = "dex/stadium2_rental.txt";
const DEFAULT_OUTPUT_PATH: &str = "dex/stadium2.json";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum JsonStyleArg {
    Python,
    Compact,
    Pretty,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Reference dex: JSON array of objects with a `name` field.
    #[arg(long, value_name = "JSON", default_value = DEFAULT_DEX_PATH)]
    dex: PathBuf,
    /// Rental listing text dump.
    #[arg(long, value_name = "TXT", default_value = DEFAULT_RENTAL_PATH)]
    rental: PathBuf,
    #[arg(long, value_name = "JSON", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,
    #[arg(long = "json-style", value_enum, default_value_t = JsonStyleArg::Python)]
    json_style: JsonStyleArg,
    /// Character that starts each rental block.
    #[arg(long, value_name = "CHAR", default_value_t = DEFAULT_DELIMITER, value_parser = parse_delimiter)]
    delimiter: char,
    /// Log and skip blocks that do not fit either layout instead of failing.
    #[arg(long = "skip-malformed")]
    skip_malformed: bool,
    /// Parse and merge without writing the output file.
    #[arg(long = "dry-run")]
    dry_run: bool,
    /// Print a text report after the run.
    #[arg(long)]
    summary: bool,
    /// Include every rental record in the text report.
    #[arg(long, requires = "summary")]
    records: bool,
    /// Print the run report as JSON.
    #[arg(long = "report-json", conflicts_with = "summary")]
    report_json: bool,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = ParseOptions {
        delimiter: cli.delimiter,
        malformed: if cli.skip_malformed {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Fail
        },
    };

    let session = Engine::with_options(options)
        .open_paths(&cli.dex, &cli.rental)
        .unwrap_or_else(|e| {
            eprintln!("Error merging {} into {}", cli.rental.display(), cli.dex.display());
            eprintln!("  {e}");
            process::exit(1);
        });

    if !cli.dry_run {
        write_json_file(&cli.output, session.merged(), to_json_style(cli.json_style))
            .unwrap_or_else(|e| {
                eprintln!("Error writing {}", cli.output.display());
                eprintln!("  {e}");
                process::exit(1);
            });
        log::info!(
            "wrote {} entries to {}",
            session.merged().len(),
            cli.output.display()
        );
    }

    if cli.report_json {
        let rendered = render_report_json(session.report())
            .and_then(|value| {
                serde_json::to_string_pretty(&value).map_err(|e| {
                    CoreError::new(
                        CoreErrorCode::Encode,
                        format!("failed to encode run report: {e}"),
                    )
                })
            })
            .unwrap_or_else(|e| {
                eprintln!("Error rendering JSON report: {e}");
                process::exit(1);
            });
        println!("{rendered}");
    } else if cli.summary {
        print!(
            "{}",
            render_summary(
                &session,
                SummaryOptions {
                    records: cli.records
                }
            )
        );
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn parse_delimiter(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '\n' => Ok(c),
        _ => Err(format!("expected a single character, got {value:?}")),
    }
}

fn to_json_style(style: JsonStyleArg) -> JsonStyle {
    match style {
        JsonStyleArg::Python => JsonStyle::PythonCompat,
        JsonStyleArg::Compact => JsonStyle::Compact,
        JsonStyleArg::Pretty => JsonStyle::Pretty,
    }
}
