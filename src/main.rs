//! # kakaoday CLI
//!
//! Command-line interface for the kakaoday library.

use std::path::Path;
use std::process;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use kakaoday::cli::{Args, Command, MetaFormat, TranscriptOptions};
use kakaoday::config::ServerConfig;
use kakaoday::core::output::{split_by_day, to_csv, to_json, write_csv, write_json};
use kakaoday::core::ChatTranscript;
use kakaoday::service::MetaResponse;
use kakaoday::source::FileSource;
use kakaoday::{KakaoDayError, Result};

fn main() {
    init_logging();
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Log events go to stderr, filtered by `KAKAODAY_LOG` (default: `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("KAKAODAY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args = <Args as ClapParser>::parse();

    match args.command {
        Command::Serve {
            input_dir,
            bind,
            options,
        } => {
            println!("📦 kakaoday v{}", env!("CARGO_PKG_VERSION"));
            println!("📂 Input:   {}", input_dir.display());
            let config = options.service_config(input_dir);
            let server = ServerConfig::default().with_bind(bind);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(kakaoday::server::run_server(config, &server))
        }

        Command::Dates { input } => {
            let transcript = open(&input, &TranscriptOptions::default());
            for (i, day) in transcript.dates()?.into_iter().enumerate() {
                println!("{:>4}  {}", i + 1, day.format("%Y-%m-%d"));
            }
            Ok(())
        }

        Command::Page {
            input,
            page,
            options,
        } => {
            let record = open(&input, &options).page(page)?;
            println!("{}", to_json(&record)?);
            Ok(())
        }

        Command::Meta {
            input,
            page,
            format,
            output,
            options,
        } => {
            let transcript = open(&input, &options);
            let meta = match page {
                Some(page) => MetaResponse::Page(transcript.page_meta(page)?),
                None => MetaResponse::Days(transcript.all_meta()?),
            };
            write_meta(&meta, format, output.as_deref())
        }

        Command::Split { input, output_dir } => {
            let written = split_by_day(&input, &output_dir)?;
            for path in &written {
                println!("💾 {}", path.display());
            }
            println!("✅ Done! {} days written to {}", written.len(), output_dir.display());
            Ok(())
        }
    }
}

fn open(input: &Path, options: &TranscriptOptions) -> ChatTranscript<FileSource> {
    let config = options.scan_config();
    let source = FileSource::new(input).with_buffer_size(config.buffer_size);
    ChatTranscript::with_config(source, config).with_slugs(options.slug_table())
}

fn write_meta(meta: &MetaResponse, format: MetaFormat, output: Option<&Path>) -> Result<()> {
    match (format, meta, output) {
        (MetaFormat::Json, _, Some(path)) => write_json(meta, path),
        (MetaFormat::Json, _, None) => {
            println!("{}", to_json(meta)?);
            Ok(())
        }
        (MetaFormat::Csv, MetaResponse::Days(days), Some(path)) => write_csv(days, path),
        (MetaFormat::Csv, MetaResponse::Days(days), None) => {
            print!("{}", to_csv(days)?);
            Ok(())
        }
        (MetaFormat::Csv, MetaResponse::Page(_), _) => Err(KakaoDayError::invalid_format(
            "CSV output is only available for the full day listing (omit --page)",
        )),
    }
}
