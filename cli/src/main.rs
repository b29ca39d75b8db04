use std::error::Error;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};

use clap::{ArgAction, Parser};
use flatini::{Arena, Delimiter, File, ParseOptions};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flatini", version, about = "Flat key=value file reader")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Print the value of the first entry with this key instead of JSON.
    #[arg(short, long, value_name = "key")]
    get: Option<String>,

    /// Strip quotes and resolve \" escapes in the value printed by --get.
    #[arg(long, requires = "get")]
    unquote: bool,

    /// Emit every entry as a [key, value] pair, duplicates included.
    #[arg(long, conflicts_with = "get")]
    entries: bool,

    /// Emit unquoted booleans and numbers as JSON scalars.
    #[arg(long, conflicts_with = "entries")]
    typed: bool,

    /// Key/value delimiter: = (equals) or : (colon).
    #[arg(long, value_name = "char", value_parser = parse_delimiter, default_value = "=")]
    delimiter: Delimiter,

    /// Maximum number of entries.
    #[arg(long, value_name = "number", default_value_t = flatini::DEFAULT_CAPACITY)]
    capacity: usize,

    /// Treat unterminated quoted values as errors.
    #[arg(long)]
    strict: bool,

    /// JSON indentation size (0 for compact output).
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let input = read_input(args.input.as_deref())?;
    let options = ParseOptions::new()
        .with_delimiter(args.delimiter)
        .with_strict(args.strict)
        .with_capacity(args.capacity);

    let mut arena = Arena::with_capacity(input.len());
    let mut file = File::new(options.capacity);
    let report = flatini::parse_with_options(&mut arena, &mut file, &input, &options)?;
    for diagnostic in &report.diagnostics {
        tracing::warn!("{diagnostic}");
    }
    tracing::debug!(entries = file.len(), "parsed input");

    if let Some(key) = args.get.as_deref() {
        let value = file
            .find_by_key(&arena, key)
            .ok_or_else(|| format!("key not found: {key}"))?;
        let value = if args.unquote {
            flatini::unquote(value)
        } else {
            value.into()
        };
        return write_output(args.output.as_deref(), format!("{value}\n").as_bytes());
    }

    let value = if args.entries {
        Value::Array(
            file.iter(&arena)
                .map(|(key, value)| Value::from(vec![key, value]))
                .collect(),
        )
    } else if args.typed {
        flatini::to_typed_value(&file, &arena)
    } else {
        flatini::to_value(&file, &arena)
    };

    with_output_writer(args.output.as_deref(), |writer| {
        write_json(writer, &value, args.indent)
    })?;
    if let Some(path) = args.output.as_deref().filter(|path| *path != "-") {
        println!("✔ Parsed {} entries → {path}", file.len());
    }
    Ok(())
}

fn read_input(input: Option<&str>) -> Result<String, Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(fs::read_to_string(path)?),
    }
}

fn parse_delimiter(raw: &str) -> Result<Delimiter, String> {
    let mut chars = raw.chars();
    match (chars.next().and_then(Delimiter::from_char), chars.next()) {
        (Some(delimiter), None) => Ok(delimiter),
        _ => Err(format!(
            "Invalid delimiter \"{raw}\". Valid delimiters are: equals (=), colon (:)"
        )),
    }
}

fn with_output_writer<F>(path: Option<&str>, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match path {
        Some(path) if path != "-" => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
}

fn write_output(path: Option<&str>, data: &[u8]) -> Result<(), Box<dyn Error>> {
    with_output_writer(path, |writer| {
        writer.write_all(data)?;
        Ok(())
    })
}

fn write_json(writer: &mut dyn Write, value: &Value, indent: usize) -> Result<(), Box<dyn Error>> {
    if indent == 0 {
        serde_json::to_writer(&mut *writer, value)?;
        return Ok(());
    }

    let indent_bytes = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut serializer = serde_json::Serializer::with_formatter(&mut *writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}
