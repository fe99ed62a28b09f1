use std::process::ExitCode;

use gemini_prompt::observability::init_tracing;
use gemini_prompt::runner::report_config_error;
use gemini_prompt::{PromptRunner, RunnerConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let written = match RunnerConfig::load().await {
        Ok(config) => PromptRunner::from_env(config).run(&mut out).await,
        Err(err) => {
            let model = std::env::var("GEMINI_MODEL").ok();
            report_config_error(&mut out, model.as_deref(), err)
        }
    };

    match written {
        Ok(outcome) => tracing::debug!(state = ?outcome.state(), "Run finished"),
        Err(e) => tracing::error!(error = %e, "Failed to write report"),
    }

    ExitCode::SUCCESS
}
