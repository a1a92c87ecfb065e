//! bindery - EPUB packager CLI
//!
//! Builds an EPUB from a JSON book description listing metadata and
//! input files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;

use bindery::{Assembler, DateValue, SourceFileSpec};

#[derive(Parser)]
#[command(name = "bindery")]
#[command(version, about = "Assemble HTML, images, and CSS into an EPUB", long_about = None)]
#[command(after_help = "EXAMPLES:
    bindery book.json -o book.epub              Build from a book description
    bindery book.json -o book.epub --strict     Fail on unrecognized input files
    bindery book.json -o book.epub --no-toc     Skip the generated contents page")]
struct Cli {
    /// JSON book description
    #[arg(value_name = "BOOK")]
    book: PathBuf,

    /// Output EPUB path
    #[arg(short, long, value_name = "OUTPUT")]
    output: PathBuf,

    /// Staging directory (recreated on every run)
    #[arg(long, default_value = "ebook_root")]
    staging: PathBuf,

    /// Fail on input files with unrecognized suffixes
    #[arg(long)]
    strict: bool,

    /// Skip the generated table-of-contents page
    #[arg(long)]
    no_toc: bool,

    /// Suppress log output
    #[arg(short, long)]
    quiet: bool,
}

/// One input file: a bare path, or a record with overrides.
#[derive(Deserialize)]
#[serde(untagged)]
enum FileInput {
    Path(PathBuf),
    Spec {
        src: PathBuf,
        #[serde(default)]
        class: Option<String>,
        #[serde(default)]
        nav_label: Option<String>,
    },
}

#[derive(Deserialize)]
struct IdentifierInput {
    value: String,
    scheme: String,
}

#[derive(Deserialize)]
struct BookInput {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    identifier: Option<IdentifierInput>,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(default)]
    contributors: Vec<String>,
    #[serde(default)]
    rights: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    publisher: Option<String>,
    #[serde(default)]
    cover: Option<PathBuf>,
    #[serde(default)]
    files: Vec<FileInput>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match build(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build(cli: &Cli) -> Result<(), String> {
    let raw = std::fs::read_to_string(&cli.book)
        .map_err(|e| format!("cannot read {}: {e}", cli.book.display()))?;
    let input: BookInput =
        serde_json::from_str(&raw).map_err(|e| format!("invalid book description: {e}"))?;

    let mut assembler = Assembler::new();
    assembler.set_staging_root(&cli.staging);
    assembler.set_strict(cli.strict);
    assembler.set_generate_toc(!cli.no_toc);

    if let Some(title) = input.title {
        assembler.metadata.set_title(title);
    }
    if let Some(language) = input.language {
        assembler.metadata.set_language(language);
    }
    if let Some(id) = input.identifier {
        assembler.metadata.set_identifier(id.value, id.scheme);
    }
    for author in input.authors {
        assembler.metadata.add_author(author);
    }
    for contributor in input.contributors {
        assembler.metadata.add_contributor(contributor);
    }
    if let Some(rights) = input.rights {
        assembler.metadata.set_rights(rights);
    }
    if let Some(date) = input.date {
        assembler.metadata.set_date(DateValue::Text(date));
    }
    if let Some(description) = input.description {
        assembler.metadata.set_description(description);
    }
    if let Some(publisher) = input.publisher {
        assembler.metadata.set_publisher(publisher);
    }
    if let Some(cover) = input.cover {
        assembler.set_cover(cover);
    }

    for file in input.files {
        let spec = match file {
            FileInput::Path(src) => SourceFileSpec::new(src),
            FileInput::Spec {
                src,
                class,
                nav_label,
            } => SourceFileSpec {
                src,
                class,
                nav_label,
            },
        };
        assembler.add_file(spec);
    }

    assembler
        .assemble(&cli.output)
        .map_err(|e| e.to_string())?;

    if !cli.quiet {
        println!("wrote {}", cli.output.display());
    }
    Ok(())
}
