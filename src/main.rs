/*!
 * Command-line interface for git2md
 */

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use git2md::config::{Args, Config};
use git2md::converter::Converter;
use git2md::git::{self, CloneProgress};
use git2md::pdf;

fn main() -> ExitCode {
    let args = Args::parse();

    // Generate shell completions and exit
    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "git2md", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    // Report PDF capability and exit
    if args.check_pdf {
        if pdf::is_available() {
            println!("PDF support is available");
            return ExitCode::SUCCESS;
        }
        println!("PDF support is NOT available");
        println!("  Rebuild with: cargo install git2md --features pdf");
        return ExitCode::FAILURE;
    }

    let source = match &args.source {
        Some(source) => source.clone(),
        None => {
            let _ = Args::command().print_help();
            return ExitCode::FAILURE;
        }
    };

    let mut config = Config::from_args(&args);

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    // Optional capability absence degrades gracefully: warn once, continue
    if config.include_pdf && !pdf::is_available() {
        eprintln!("Warning: PDF support requested but not compiled in.");
        eprintln!("  Rebuild with: cargo install git2md --features pdf");
        eprintln!("  Continuing without PDF support...");
        config.include_pdf = false;
    }

    // Default output: <repo_name>.md in the current directory
    let output_path = if args.stdout {
        None
    } else {
        Some(
            args.output
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("{}.md", git::repo_name(&source)))),
        )
    };

    if args.verbose {
        eprintln!("Processing repository: {}", source);
    }

    // Clone progress goes to stderr, never into the Markdown output
    let progress = ProgressBar::hidden();
    if git::is_git_url(&source) && !args.stdout {
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        progress.enable_steady_tick(std::time::Duration::from_millis(100));
        progress.set_message(format!("Cloning {}", source));
    }

    let reporter = {
        let progress = progress.clone();
        move |p: &CloneProgress| {
            progress.set_message(format!(
                "Cloning: {}/{} objects ({}%)",
                p.received_objects,
                p.total_objects,
                p.percentage()
            ));
        }
    };

    let converter = Converter::new(config).with_progress(reporter);
    let result = converter.convert(&source, output_path.as_deref());
    progress.finish_and_clear();

    let conversion = match result {
        Ok(conversion) => conversion,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.stdout {
        println!("{}", conversion.markdown);
        return ExitCode::SUCCESS;
    }

    if conversion.written.len() > 1 {
        println!("Generated {} files:", conversion.written.len());
        for path in &conversion.written {
            println!("  - {}", path.display());
        }
    } else if let Some(path) = conversion.written.first() {
        println!("Generated: {}", path.display());
    }

    if args.verbose {
        eprintln!(
            "Rendered {} characters of Markdown",
            conversion.markdown.chars().count()
        );
    }

    ExitCode::SUCCESS
}
