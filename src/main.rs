use clap::Parser;
use miette::{IntoDiagnostic, Result};
use paymethods::application::checkout::CheckoutSession;
use paymethods::application::methods::load_payment_methods;
use paymethods::application::registry::PaymentMethodRegistry;
use paymethods::config::CheckoutConfig;
use paymethods::domain::ports::{StateContainerBox, Translate};
use paymethods::infrastructure::events::LoggingEventSink;
use paymethods::infrastructure::in_memory::InMemoryStateContainer;
use paymethods::infrastructure::scripted::ScriptedProcessor;
use paymethods::infrastructure::translator::CatalogTranslator;
use paymethods::interfaces::csv::command_reader::CommandReader;
use paymethods::interfaces::csv::record_writer::RecordWriter;
use paymethods::interfaces::render::{RenderView, TextRenderer};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Checkout commands CSV file (action, method, field, value)
    input: Option<PathBuf>,

    /// JSON checkout configuration (cart, credentials, scripted processor answers)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the registered payment methods instead of running commands
    #[arg(long)]
    list_methods: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CheckoutConfig::load(path).into_diagnostic()?,
        None => CheckoutConfig::default(),
    };

    let stores: StateContainerBox = Arc::new(InMemoryStateContainer::new());
    let mut registry = PaymentMethodRegistry::new();
    load_payment_methods(
        &mut registry,
        stores.as_ref(),
        &config.methods,
        &config.processor,
    )
    .await
    .into_diagnostic()?;

    let session = CheckoutSession::new(
        Arc::new(registry),
        stores,
        Arc::new(ScriptedProcessor::new(config.responses.clone())),
        Arc::new(LoggingEventSink),
        Arc::new(CatalogTranslator::new(config.translations.clone())),
        config.items.clone(),
        config.total().into_diagnostic()?,
    );

    if cli.list_methods {
        return list_methods(&session).await;
    }

    let Some(input) = cli.input else {
        return Err(miette::miette!(
            "a commands file is required unless --list-methods is given"
        ));
    };

    let file = File::open(input).into_diagnostic()?;
    let reader = CommandReader::new(file);
    let mut records = Vec::new();
    for command in reader.commands() {
        match command {
            Ok(command) => match session.handle(command).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => eprintln!("Error processing command: {}", e),
            },
            Err(e) => {
                eprintln!("Error reading command: {}", e);
            }
        }
    }

    let stdout = io::stdout();
    let mut writer = RecordWriter::new(stdout.lock());
    writer.write_records(records).into_diagnostic()?;

    Ok(())
}

async fn list_methods(session: &CheckoutSession) -> Result<()> {
    let translator: &dyn Translate = session.translator();
    let renderer = TextRenderer::new(translator);
    let form_status = session.form_status().await;

    let mut writer = csv::Writer::from_writer(io::stdout().lock());
    writer
        .write_record(["id", "label", "aria_label", "summary", "button"])
        .into_diagnostic()?;
    for method in session.registry().list() {
        let state = session.method_state(&method.id).await.ok();
        let view = RenderView {
            state: state.as_ref(),
            form_status,
            total: session.total(),
        };
        let label = renderer.render(&method.label, &view);
        let aria_label = method.aria_label(translator);
        let summary = renderer.render(&method.inactive_summary, &view);
        let button = renderer.render(&method.submit_control, &view);
        writer
            .write_record([
                method.id.as_str(),
                label.as_str(),
                aria_label.as_str(),
                summary.as_str(),
                button.as_str(),
            ])
            .into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;
    Ok(())
}
