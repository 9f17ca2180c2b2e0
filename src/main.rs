use clap::Parser;

use slim_jre::aggregator::{self, AggregatorHandle};
use slim_jre::cli::Cli;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { cli.log_level.as_str() };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(err) = run(&cli) {
        if cli.verbose {
            eprintln!("error: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                eprintln!("caused by: {cause}");
                source = cause.source();
            }
        } else {
            eprintln!("error: {err}");
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> slim_jre::error::Result<()> {
    let engine_config = cli.to_engine_config()?;
    let handle = AggregatorHandle::new();

    if cli.analyze_only {
        let result = aggregator::analyze_only(&cli.input, &engine_config, &handle)?;
        println!("resolved {} platform module(s):", result.all_modules.len());
        for module in &result.all_modules {
            println!("  {module}");
        }
        for warning in &result.warnings {
            eprintln!("warning: {warning}");
        }
        return Ok(());
    }

    let build_config = cli.to_build_config()?;
    let (analysis, build_result) = aggregator::create_minimal_jre(&cli.input, &engine_config, &build_config, &handle)?;

    println!(
        "linked runtime image at {} with {} module(s)",
        build_result.output.display(),
        build_result.modules.len()
    );
    println!("image size: {} bytes", build_result.slim_jre_size);
    if let Some(ratio) = build_result.size_ratio() {
        println!("{:.1}% of the estimated full-JDK size", ratio * 100.0);
    }
    for warning in &analysis.warnings {
        eprintln!("warning: {warning}");
    }

    Ok(())
}
