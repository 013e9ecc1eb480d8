mod config;

use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use imgextract_config::ResolvedConfig;
use imgextract_core::{ConfigError, VisionProvider};
use imgextract_logging::{init_logger, redact_sensitive_data};
use imgextract_processor::DataProcessor;
use imgextract_understanding::{Extractor, OpenAiVisionProvider};

use config::CliArgs;

/// Ctrl-C arrived while the batch was running.
#[derive(Debug, thiserror::Error)]
#[error("process interrupted by user")]
struct Interrupted;

/// How a failed run ended. Every class exits with status 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    Config,
    Interrupted,
    Unexpected,
}

impl Failure {
    fn of(err: &anyhow::Error) -> Self {
        if err.is::<ConfigError>() {
            Failure::Config
        } else if err.is::<Interrupted>() {
            Failure::Interrupted
        } else {
            Failure::Unexpected
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let _log_guard = init_logger(&args.log_level, args.log_dir.as_deref());

    let outcome = run(
        &args,
        |resolved| {
            Arc::new(
                OpenAiVisionProvider::new(resolved.credential())
                    .with_base_url(resolved.api().base_url.clone()),
            ) as Arc<dyn VisionProvider>
        },
        tokio::signal::ctrl_c(),
    )
    .await;

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match Failure::of(&e) {
                Failure::Config => error!("Configuration error: {}", e),
                Failure::Interrupted => warn!("Process interrupted by user"),
                Failure::Unexpected => {
                    error!("Unexpected error: {}", redact_sensitive_data(&format!("{e:?}")))
                }
            }
            ExitCode::FAILURE
        }
    }
}

/// Validate configuration, process every image, then write the CSV.
///
/// The provider is built only after validation succeeds. If `interrupt`
/// resolves before the batch finishes, nothing is written.
async fn run(
    args: &CliArgs,
    make_provider: impl FnOnce(&ResolvedConfig) -> Arc<dyn VisionProvider>,
    interrupt: impl Future,
) -> Result<()> {
    let app_config = args.load_app_config().await?;
    let resolved = app_config.validate()?;

    info!("Configuration: {}", resolved);
    info!("Extraction fields: {}", resolved.fields());

    let extractor = Extractor::new(make_provider(&resolved), resolved.api().clone());
    let processor = DataProcessor::new(
        extractor,
        resolved.fields().clone(),
        resolved.output_file(),
    )
    .with_verbose(!args.quiet);

    let images = resolved.images();
    info!("Processing {} images...", images.len());
    warn!("Note: vision model calls may take some time");

    let result = tokio::select! {
        biased;
        _ = interrupt => return Err(Interrupted.into()),
        result = processor.process_images(images) => result,
    };

    processor.save_to_csv(&result.records)?;
    processor.log_summary(&result);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgextract_understanding::MockVisionProvider;
    use std::future::pending;
    use std::path::Path;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    struct Workspace {
        dir: tempfile::TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            std::fs::write(dir.path().join(".env"), "OPENAI_API_KEY=sk-test1234567890\n").unwrap();
            let images = dir.path().join("images");
            std::fs::create_dir(&images).unwrap();
            std::fs::write(images.join("1.png"), PNG_HEADER).unwrap();
            Self { dir }
        }

        fn path(&self, name: &str) -> std::path::PathBuf {
            self.dir.path().join(name)
        }

        fn args(&self, images: &Path, output: &Path) -> CliArgs {
            CliArgs::parse_from([
                "imgextract",
                "--env-file",
                self.path(".env").to_str().unwrap(),
                "--images",
                images.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ])
        }
    }

    fn provider(
        mock: &Arc<MockVisionProvider>,
    ) -> impl FnOnce(&ResolvedConfig) -> Arc<dyn VisionProvider> {
        let mock = Arc::clone(mock);
        move |_: &ResolvedConfig| mock as Arc<dyn VisionProvider>
    }

    #[tokio::test]
    async fn writes_csv_on_success() {
        let ws = Workspace::new();
        let output = ws.path("out.csv");
        let mock = Arc::new(MockVisionProvider::new("mock").then_reply(r#"[{"email": "a@x.io"}]"#));

        run(&ws.args(&ws.path("images"), &output), provider(&mock), pending::<()>())
            .await
            .unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().next(), Some("filename,email,firstname,name"));
        assert!(written.contains("1.png,a@x.io,,"));
    }

    #[tokio::test]
    async fn config_error_stops_before_any_call() {
        let ws = Workspace::new();
        let output = ws.path("out.csv");
        let mock = Arc::new(MockVisionProvider::new("mock"));

        let err = run(&ws.args(&ws.path("missing"), &output), provider(&mock), pending::<()>())
            .await
            .unwrap_err();

        assert_eq!(Failure::of(&err), Failure::Config);
        assert!(mock.prompts().is_empty());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn csv_write_failure_is_unexpected() {
        let ws = Workspace::new();
        let mock = Arc::new(MockVisionProvider::new("mock"));

        // A directory cannot be opened as the output file.
        let err = run(&ws.args(&ws.path("images"), ws.dir.path()), provider(&mock), pending::<()>())
            .await
            .unwrap_err();

        assert_eq!(Failure::of(&err), Failure::Unexpected);
        assert_eq!(mock.prompts().len(), 1);
    }

    #[tokio::test]
    async fn interrupt_writes_nothing() {
        let ws = Workspace::new();
        let output = ws.path("out.csv");
        let mock = Arc::new(MockVisionProvider::new("mock"));

        let err = run(&ws.args(&ws.path("images"), &output), provider(&mock), async {})
            .await
            .unwrap_err();

        assert_eq!(Failure::of(&err), Failure::Interrupted);
        assert!(!output.exists());
    }
}
