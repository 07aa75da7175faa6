use std::process::ExitCode;

use anyhow::Context;
use ontask::cli::{program_name, Cli};
use ontask::invoker::{invoke, Invocation};
use ontask::text_classification::TextClassificationPipelineBuilder;
use ontask::Verdict;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::from_args(std::env::args_os());
    init_logging(cli.verbose);

    let invocation = match cli.invocation(&program_name()) {
        Ok(invocation) => invocation,
        Err(usage) => {
            eprintln!("{usage}");
            return ExitCode::from(1);
        }
    };

    match run(&cli, &invocation) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, invocation: &Invocation) -> anyhow::Result<Verdict> {
    let config = cli.classifier_config();
    let pipeline = TextClassificationPipelineBuilder::from_config(&config)
        .build()
        .with_context(|| format!("failed to load model '{}'", config.model))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let verdict = invoke(&pipeline, invocation, &mut out).context("classification failed")?;
    Ok(verdict)
}

fn init_logging(verbose: u8) {
    // Callers read stdout and stderr as one stream, so a successful run must
    // leave stderr empty unless asked otherwise.
    let default_level = match verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
