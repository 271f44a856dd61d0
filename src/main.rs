use clap::Parser;
use column_builder::config::toml_config::BuildConfig;
use column_builder::core::code::{summarize, CodeSummary, HOVER_HINT};
use column_builder::core::editors::EditorUpdate;
use column_builder::core::registry;
use column_builder::core::state::{Event, SpecificationState};
use column_builder::utils::error::{BuilderError, ErrorSeverity};
use column_builder::utils::{logger, validation::Validate};
use column_builder::{
    CliConfig, CompletionSignal, HttpDatasetService, SubmissionPipeline, SubmitOutcome,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting column-builder CLI");
    tracing::debug!("CLI config: {:?}", cli);

    let dry_run = cli.dry_run;
    let config = match cli.into_build_config().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    display_summary(&config);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be sent");
        return dry_run_check(&config);
    }

    let service = match config.timeout() {
        Some(timeout) => HttpDatasetService::with_timeout(
            &config.service.base_url,
            &config.service.data_id,
            timeout,
        ),
        None => HttpDatasetService::new(&config.service.base_url, &config.service.data_id),
    }
    .unwrap_or_else(|e| fail(&e));

    let mut pipeline =
        SubmissionPipeline::new(service, config.completion_mode(), report_completion);

    pipeline.load_columns().await;
    if let Some(error) = pipeline.state().error() {
        tracing::warn!("Continuing without column metadata: {}", error);
    }

    let cfg = config.column.configuration().unwrap_or_else(|e| fail(&e));
    pipeline.set_name(config.column.name.clone());
    pipeline.select_kind(config.column.kind);
    pipeline.apply_editor_update(EditorUpdate::from_config(cfg));

    match pipeline.submit().await {
        SubmitOutcome::Completed(_) => {
            println!(
                "✅ Column '{}' created ({})",
                config.column.name,
                registry::label_for(config.column.kind)
            );
        }
        SubmitOutcome::Rejected(error) => {
            eprintln!("❌ {}", error);
            std::process::exit(2);
        }
        SubmitOutcome::Failed(error) => {
            eprintln!("❌ {}", error);
            if let Some(traceback) = &error.traceback {
                tracing::debug!("Service traceback:\n{}", traceback);
            }
            std::process::exit(2);
        }
        SubmitOutcome::Ignored => {
            eprintln!("❌ Submission was not attempted");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn report_completion(signal: CompletionSignal) {
    match signal {
        CompletionSignal::ReloadOpenerAndClose => {
            tracing::info!("Popup session finished: opener should reload")
        }
        CompletionSignal::RefreshPanelAndClose => {
            tracing::info!("Panel session finished: data grid should refresh")
        }
    }
}

fn dry_run_check(config: &BuildConfig) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config.column.configuration()?;
    let mut state = SpecificationState::new();
    state.dispatch(Event::NameChanged(config.column.name.clone()));
    state.dispatch(Event::KindSelected(config.column.kind));
    state.dispatch(Event::EditorUpdated(EditorUpdate::from_config(cfg)));

    print_code(state.code_summary());

    match state.validate() {
        Ok(spec) => {
            println!("✅ Specification is valid");
            println!("  cfg: {}", serde_json::to_string(&spec.cfg)?);
            Ok(())
        }
        Err(error) => {
            eprintln!("❌ {}", error);
            std::process::exit(2);
        }
    }
}

fn print_code(summary: CodeSummary) {
    match summary {
        CodeSummary::Empty => {}
        CodeSummary::Lines(lines) => {
            println!("Code:");
            for line in lines {
                println!("  {}", line);
            }
        }
        CodeSummary::Truncated { full, .. } => {
            // no hover in a terminal, print everything
            tracing::debug!("Code preview longer than two lines ({})", HOVER_HINT);
            println!("Code:");
            for line in full.lines() {
                println!("  {}", line);
            }
        }
    }
}

fn display_summary(config: &BuildConfig) {
    println!("📋 Column Summary:");
    println!("  Service: {} (data {})", config.service.base_url, config.service.data_id);
    println!("  Name: {}", config.column.name);
    println!(
        "  Type: {} - {}",
        registry::label_for(config.column.kind),
        registry::description_for(config.column.kind)
    );
    println!("  Completion: {:?}", config.completion_mode());
}

fn fail(e: &BuilderError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
