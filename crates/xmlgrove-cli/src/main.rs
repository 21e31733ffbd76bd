use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use xmlgrove::{Config, Input};

#[derive(Debug, Parser)]
#[command(
    name = "xmlgrove",
    version,
    about = "Parse an XML document and print its syntax tree"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value = "debug")]
    to: OutputArg,
    /// Keep whitespace-only text nodes in element content
    #[arg(short = 'w', long)]
    preserve_whitespace: bool,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputArg {
    /// Pretty-printed Rust debug tree
    Debug,
    /// JSON rendering of the tree
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let source = read_input(&args.input)?;
    let mut input = Input::from_str(&source);
    let filename;
    if let Some(path) = &args.input {
        filename = path.display().to_string();
        input = input.with_filename(&filename);
    }

    let config = Config::new(args.preserve_whitespace);
    let doc = xmlgrove::from_input(input, config).map_err(|err| match input.filename() {
        Some(name) => anyhow::anyhow!("{name}: {err}"),
        None => anyhow::anyhow!("{err}"),
    })?;

    let rendered = match args.to {
        OutputArg::Debug => format!("{doc:#?}\n"),
        OutputArg::Json => {
            let mut json =
                serde_json::to_string_pretty(&doc).context("failed to serialize document")?;
            json.push('\n');
            json
        }
    };

    write_output(&args.output, rendered.as_bytes())?;
    Ok(())
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
