#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;

use protoget_cli::args::{CliArgs, OutputFormat};
use protoget_cli::reporter::Reporter;
use protoget_cli::{config, driver, tracing_config};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DIAGNOSTICS: i32 = 1;
const EXIT_FAILURE: i32 = 2;

fn main() {
    // Zero cost unless PROTOGET_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let code = match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

fn run(args: &CliArgs) -> Result<i32> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let config_path = config::resolve_config_path(&cwd, args.project.as_deref())?;
    let loaded = config_path
        .as_deref()
        .map(config::load_config)
        .transpose()?;
    let base_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or(&cwd);
    let resolved = config::resolve_config(loaded.as_ref(), base_dir, args);

    if args.list_files {
        for file in driver::discover_files(&resolved, &args.paths)? {
            println!("{}", driver::display_name(&file));
        }
        return Ok(EXIT_SUCCESS);
    }

    let result = driver::run(&resolved, &args.paths)?;

    let color = args
        .pretty
        .unwrap_or_else(|| std::io::stdout().is_terminal());
    let mut reporter = Reporter::new(color && args.format == OutputFormat::Text);
    for (file, text) in &result.sources {
        reporter.add_source(file.as_str(), text.as_str());
    }

    match args.format {
        OutputFormat::Text => print!("{}", reporter.render(&result.diagnostics)),
        OutputFormat::Json => println!("{}", reporter.render_json(&result.diagnostics)?),
    }

    Ok(if result.has_errors() {
        EXIT_DIAGNOSTICS
    } else {
        EXIT_SUCCESS
    })
}
