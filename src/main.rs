use clap::Parser;
use sentiment_etl::config::{AnalyzeArgs, BatchArgs, ColumnsArgs, Command, MonitorArgs, RunArgs};
use sentiment_etl::core::monitor::MonitorEvent;
use sentiment_etl::utils::error::ErrorSeverity;
use sentiment_etl::utils::{logger, validation::Validate};
use sentiment_etl::{
    AnalysisEngine, CliConfig, Dataset, EtlError, LocalStorage, SentimentClassifier,
    SentimentMonitor, SentimentPipeline, SentimentResult, TextRecord, TomlConfig,
};
use std::io::Write;

const ALERT_LINE: &str = "⚠️ Alert: Negative sentiment detected!";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let outcome = match &config.command {
        Command::Analyze(args) => analyze(args),
        Command::Columns(args) => columns(args).await,
        Command::Batch(args) => batch(args).await,
        Command::Run(args) => run_from_toml(args).await,
        Command::Monitor(args) => monitor(args),
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Sentiment analysis failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn analyze(args: &AnalyzeArgs) -> Result<(), EtlError> {
    let scoring = args.scoring.to_config();
    scoring.validate()?;

    let classifier = SentimentClassifier::new(scoring.build_scorer());
    let result = classifier.classify(&TextRecord::Text(args.joined_text()));

    write_analysis(
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
        &result,
        args.json,
    )
}

/// 結果寫到 `out`，負面警示另外寫到 `alerts`
fn write_analysis(
    out: &mut impl Write,
    alerts: &mut impl Write,
    result: &SentimentResult,
    json: bool,
) -> Result<(), EtlError> {
    if json {
        writeln!(out, "{}", serde_json::to_string(result)?)?;
    } else {
        writeln!(out, "{}", result)?;
    }

    if result.label.is_alert() {
        writeln!(alerts, "{}", ALERT_LINE)?;
    }
    Ok(())
}

fn write_event(out: &mut impl Write, event: &MonitorEvent, json: bool) -> Result<(), EtlError> {
    if json {
        writeln!(out, "{}", serde_json::to_string(event)?)?;
        return Ok(());
    }

    let polarity = event
        .result
        .polarity
        .map(|p| format!("{:.2}", p))
        .unwrap_or_else(|| "n/a".to_string());
    writeln!(out, "[{}] {} ({})", event.line_no, event.result.label, polarity)?;
    if event.alert {
        writeln!(out, "{}", ALERT_LINE)?;
    }
    Ok(())
}

async fn columns(args: &ColumnsArgs) -> Result<(), EtlError> {
    let data = tokio::fs::read(&args.input).await?;
    let dataset = Dataset::from_csv_bytes(&data)?;

    for name in dataset.columns() {
        let kind = dataset.column_kind(name)?;
        println!("{}\t{:?}", name, kind);
    }
    Ok(())
}

async fn batch(args: &BatchArgs) -> Result<(), EtlError> {
    args.validate()?;

    let scorer = args.scoring.to_config().build_scorer();
    let pipeline = SentimentPipeline::new(LocalStorage::default(), args.clone(), scorer);
    let engine = AnalysisEngine::new_with_monitoring(pipeline, args.monitor);

    let output_path = engine.run().await?;
    println!("✅ Sentiment analysis completed successfully!");
    println!("📁 Output saved to: {}", output_path);
    Ok(())
}

async fn run_from_toml(args: &RunArgs) -> Result<(), EtlError> {
    tracing::info!("📁 Loading configuration from: {}", args.config);
    let config = TomlConfig::from_file(&args.config)?;
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    tracing::info!("📋 Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        tracing::info!("   {}", description);
    }
    tracing::info!("📥 Input: {} (column '{}')", config.source.path, config.source.column);
    tracing::info!(
        "📤 Output: {} [{}]",
        config.load.output_path,
        config.load.output_formats.join(", ")
    );

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        let data = tokio::fs::read(&config.source.path).await?;
        let dataset = Dataset::from_csv_bytes(&data)?;
        let rows = dataset.column(&config.source.column)?;
        println!(
            "Would classify {} rows of column '{}' from {}",
            rows.len(),
            config.source.column,
            config.source.path
        );
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let scorer = config.scoring.build_scorer();
    let pipeline = SentimentPipeline::new(LocalStorage::default(), config, scorer);
    let engine = AnalysisEngine::new_with_monitoring(pipeline, monitor_enabled);

    let output_path = engine.run().await?;
    println!("✅ Sentiment analysis completed successfully!");
    println!("📁 Output saved to: {}", output_path);
    Ok(())
}

fn monitor(args: &MonitorArgs) -> Result<(), EtlError> {
    let scoring = args.scoring.to_config();
    scoring.validate()?;

    let monitor = SentimentMonitor::new(scoring.build_scorer());
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();

    tracing::info!("🔍 Real-time monitoring started, reading from stdin");
    let summary = monitor.run(stdin.lock(), |event| {
        write_event(&mut stdout, event, args.json)?;
        stdout.flush()?;
        Ok(())
    })?;

    eprintln!(
        "Processed {} lines, {} negative alerts",
        summary.lines, summary.alerts
    );
    Ok(())
}
