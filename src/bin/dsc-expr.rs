use std::{
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use dsc_expression::{
    parse_value_with_options, parse_with_options, ConfigValue, ParseError, ParseOptions,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Sexp,
    Text,
}

/// Parse bracketed configuration expressions and print their syntax tree.
#[derive(Debug, Parser)]
#[command(name = "dsc-expr", version)]
struct Cli {
    /// Expression text, e.g. "[concat('a', 'b').length]"
    #[arg(conflicts_with = "file", required_unless_present = "file")]
    expression: Option<String>,

    /// Read the expression from a file ('-' for stdin)
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[arg(short = 'o', long, value_enum, default_value = "sexp")]
    format: OutputFormat,

    /// Indent JSON output
    #[arg(long)]
    pretty: bool,

    /// Treat input as a configuration value: non-bracketed text is a literal
    #[arg(long)]
    value: bool,

    /// Maximum nesting depth of function calls
    #[arg(long)]
    max_depth: Option<usize>,

    /// Log parser activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let source = read_source(cli)?;
    let mut options = ParseOptions::default();
    if let Some(depth) = cli.max_depth {
        options = options.with_max_depth(depth);
    }
    debug!(?options, value_mode = cli.value, "parsing input");

    let parsed = if cli.value {
        parse_value_with_options(&source, &options)
    } else {
        parse_with_options(&source, &options).map(ConfigValue::Expression)
    };

    match parsed {
        Ok(value) => {
            println!("{}", render(&value, cli.format, cli.pretty)?);
            Ok(())
        }
        Err(err) => {
            if let OutputFormat::Json = cli.format {
                println!("{}", to_json(&err, cli.pretty)?);
            }
            Err(describe_error(&source, &err))
        }
    }
}

fn read_source(cli: &Cli) -> Result<String, String> {
    if let Some(expression) = &cli.expression {
        return Ok(expression.clone());
    }
    let Some(path) = &cli.file else {
        return Err("no expression given".to_string());
    };

    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {e}"))?;
        buf
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read '{}': {e}", path.display()))?
    };
    Ok(text.trim().to_string())
}

fn render(value: &ConfigValue, format: OutputFormat, pretty: bool) -> Result<String, String> {
    match (format, value) {
        (OutputFormat::Json, ConfigValue::Expression(expr)) => to_json(expr, pretty),
        (OutputFormat::Json, literal) => to_json(literal, pretty),
        (OutputFormat::Sexp, ConfigValue::Expression(expr)) => Ok(expr.to_sexp()),
        (OutputFormat::Text, ConfigValue::Expression(expr)) => Ok(expr.to_string()),
        (_, ConfigValue::Literal(text)) => Ok(text.clone()),
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| format!("failed to serialize output: {e}"))
}

/// Error message followed by the source line and a caret under the offending character.
fn describe_error(source: &str, err: &ParseError) -> String {
    let position = err.position();
    let mut line_start = 0usize;
    let mut line_no = 1usize;
    for (i, c) in source.chars().enumerate() {
        if i >= position {
            break;
        }
        if c == '\n' {
            line_start = i + 1;
            line_no += 1;
        }
    }
    let line: String = source
        .chars()
        .skip(line_start)
        .take_while(|c| *c != '\n')
        .collect();
    let column = position - line_start;

    format!(
        "error: {err}\n{line_no:>4} | {line}\n     | {}^",
        caret_padding(&line, column)
    )
}

/// Blanks out the first `column` characters of `line`, keeping tabs so the
/// caret lands under the same character when the terminal expands them.
fn caret_padding(line: &str, column: usize) -> String {
    line.chars()
        .take(column)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect()
}
