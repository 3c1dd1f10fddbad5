use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use legv8_rs::{disassemble_with, Diagnostic, DisasmConfig, Disassembly, Entry, Legv8Decoder};

mod model;
use model::{load_image, trace_line};

#[derive(Parser, Debug)]
#[command(author, version, about = "LEGv8 disassembler CLI", long_about = None)]
struct Cli {
    /// Input binary path (big-endian 32-bit words)
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
    /// Print every raw word in binary and hex before decoding
    #[arg(long)]
    trace: bool,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Prefix for synthesised branch labels
    #[arg(long, default_value = "label")]
    label_prefix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, serde::Serialize)]
struct Report<'a> {
    image: &'a str,
    words: usize,
    lines: &'a [String],
    entries: &'a [Entry],
    diagnostics: &'a [Diagnostic],
}

fn render_output(
    image: &str,
    words: usize,
    dis: &Disassembly,
    format: OutputFormat,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => {
            let mut buf = String::new();
            for line in &dis.lines {
                buf.push_str(line);
                buf.push('\n');
            }
            buf
        }
        OutputFormat::Json => {
            let report = Report {
                image,
                words,
                lines: &dis.lines,
                entries: &dis.entries,
                diagnostics: &dis.diagnostics,
            };
            serde_json::to_string_pretty(&report)? + "\n"
        }
    })
}

fn run(cli: &Cli) -> Result<String> {
    anyhow::ensure!(!cli.label_prefix.is_empty(), "--label-prefix must not be empty");
    let img = load_image(&cli.input)?;
    tracing::info!(image = %img.name, words = img.words.len(), "loaded");

    if cli.trace {
        for &w in &img.words {
            println!("{}", trace_line(w));
        }
    }

    let cfg = DisasmConfig { label_prefix: cli.label_prefix.clone(), ..DisasmConfig::default() };
    let dis = disassemble_with(&Legv8Decoder::new(), &cfg, img.words.iter().copied());
    for d in &dis.diagnostics {
        eprintln!("{d}");
    }
    render_output(&img.name, img.words.len(), &dis, cli.format)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let text = run(&cli)?;
    if let Some(path) = &cli.out {
        std::fs::write(path, text)?;
    } else {
        print!("{text}");
    }
    Ok(())
}
