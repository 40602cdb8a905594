use anyhow::bail;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use markdownify::cli::{Cli, Commands, ConvertArgs};
use markdownify::{ConsoleSink, ConvertOptions, Converter, DiagnosticsSink};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Convert(args) => run_convert(args),
    }
}

fn run_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let mut options = match &args.config {
        Some(path) => ConvertOptions::load(path)?,
        None => ConvertOptions::default(),
    };
    if let Some(output_dir) = args.output_dir {
        options.output_dir = Some(output_dir);
    }
    if let Some(max_pages) = args.max_pages {
        options.max_pages = Some(max_pages);
    }

    let sink = ConsoleSink::new(args.verbose);
    let converter = Converter::new(options);

    // Progress bar only for quiet batch runs; verbose output would
    // interleave with it
    let bar = if args.inputs.len() > 1 && args.verbose == 0 {
        let bar = ProgressBar::new(args.inputs.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };

    let mut failures = 0usize;
    for input in &args.inputs {
        if let Some(bar) = &bar {
            bar.set_message(input.display().to_string());
        }
        match converter.convert_file(input, &sink) {
            Ok(output) => {
                if bar.is_none() {
                    println!("{} -> {}", input.display(), output.display());
                }
            }
            Err(e) => {
                failures += 1;
                sink.error(&format!("{}: {e}", input.display()));
            }
        }
        if let Some(bar) = &bar {
            bar.inc(1);
        }
    }
    if let Some(bar) = &bar {
        bar.finish_and_clear();
    }

    if failures == args.inputs.len() {
        bail!("all {} conversion(s) failed", failures);
    }
    if failures > 0 {
        eprintln!(
            "{} of {} conversion(s) failed",
            failures,
            args.inputs.len()
        );
    }
    Ok(())
}
