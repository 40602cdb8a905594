//! Command-line interface definitions

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Batch converter for office documents to Markdown
#[derive(Debug, Parser)]
#[command(name = "markdownify", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert documents (.docx, .pdf, .xlsx/.xls, .txt) to Markdown
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input documents
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory receiving the .md outputs (created if absent)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// TOML config file; CLI flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Cap on the number of PDF pages converted per document
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert_command() {
        let cli = Cli::try_parse_from([
            "markdownify",
            "convert",
            "report.pdf",
            "notes.docx",
            "--output-dir",
            "out",
            "-v",
        ])
        .unwrap();

        let Commands::Convert(args) = cli.command;
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.verbose, 1);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_convert_requires_inputs() {
        assert!(Cli::try_parse_from(["markdownify", "convert"]).is_err());
    }

    #[test]
    fn test_max_pages_flag() {
        let cli =
            Cli::try_parse_from(["markdownify", "convert", "a.pdf", "--max-pages", "5"]).unwrap();
        let Commands::Convert(args) = cli.command;
        assert_eq!(args.max_pages, Some(5));
    }
}
