mod demo;

use cmdkit::{AppConfig, AppError, Output, StdOutput};
use std::path::Path;
use std::process::ExitCode;
use std::rc::Rc;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let config = AppConfig::from_env();

    // Initialize logging; the guard flushes file output on exit
    let _guard = init_logging(&config);

    info!("Starting cmdkit...");

    let result = demo::application(config).and_then(|app| {
        let app = Rc::new(app);
        app.run_from_argv(std::env::args())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(report_failure(&e, &StdOutput::stdout())),
    }
}

/// Shows `e` on `output` unless the user has already seen it, and returns the exit code.
fn report_failure(e: &AppError, output: &dyn Output) -> u8 {
    debug!(error = ?e, "Command failed");
    // Validation paths have already shown usage or a critical message
    if !e.is_reported() {
        output.critical(&e.to_string());
    }
    e.exit_code()
}

fn init_logging(config: &AppConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env();

    match &config.log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "cmdkit.log".to_string());

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        },
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        },
    }
}
