use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use payhook::application::dispatcher::WebhookDispatcher;
use payhook::application::issuer::PeriodicIssuer;
use payhook::application::secrets::resolve_secrets;
use payhook::config::{
    DEFAULT_MAX_BATCH, DEFAULT_MIN_BATCH, DEFAULT_REGION, DispatcherConfig, IssuerSchedule,
};
use payhook::domain::credentials::{Environment, Project, SECRET_NAMES};
use payhook::domain::ports::{PaymentClientBox, PaymentClientFactory, SecretStoreBox};
use payhook::domain::webhook::WebhookRequest;
use payhook::infrastructure::env::EnvSecretStore;
use payhook::infrastructure::file::FileSecretStore;
use payhook::infrastructure::http::HttpPaymentClient;
use payhook::infrastructure::in_memory::InMemoryPaymentClient;
use payhook::interfaces::json::request_reader::RequestReader;
use payhook::interfaces::json::response_writer::ResponseWriter;
use payhook::telemetry::init_tracing;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the webhook dispatcher once and print the response envelope
    Invoke {
        /// Request envelope file, shaped {"body": "<json>"}
        #[arg(long, conflicts_with = "amount")]
        event: Option<PathBuf>,

        /// Build an invoice event carrying this amount
        #[arg(long, allow_negative_numbers = true)]
        amount: Option<Decimal>,

        #[command(flatten)]
        backend: BackendArgs,
    },
    /// Issue batches of synthetic invoices on a schedule
    Issue {
        /// Time between batches
        #[arg(long, default_value = "3h", value_parser = humantime::parse_duration)]
        interval: Duration,

        /// Total time to keep issuing
        #[arg(long, default_value = "24h", value_parser = humantime::parse_duration)]
        duration: Duration,

        #[arg(long, default_value_t = DEFAULT_MIN_BATCH)]
        min_batch: usize,

        #[arg(long, default_value_t = DEFAULT_MAX_BATCH)]
        max_batch: usize,

        #[command(flatten)]
        backend: BackendArgs,
    },
}

#[derive(Args)]
struct BackendArgs {
    /// Region secrets are resolved in
    #[arg(long, env = "PAYHOOK_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// JSON secrets file. If omitted, secrets are read from the environment.
    #[arg(long, env = "PAYHOOK_SECRETS_FILE")]
    secrets_file: Option<PathBuf>,

    /// Record payment calls in memory instead of calling the payment API
    #[arg(long)]
    dry_run: bool,
}

impl BackendArgs {
    fn secret_store(&self) -> SecretStoreBox {
        match &self.secrets_file {
            Some(path) => Box::new(FileSecretStore::new(path)),
            None => Box::new(EnvSecretStore::new()),
        }
    }

    fn client_factory(&self) -> PaymentClientFactory {
        if self.dry_run {
            let client = InMemoryPaymentClient::new();
            Box::new(move |_| Ok(Box::new(client.clone()) as PaymentClientBox))
        } else {
            HttpPaymentClient::factory()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Invoke {
            event,
            amount,
            backend,
        } => {
            let request = match (event, amount) {
                (Some(path), _) => {
                    let file = File::open(path).into_diagnostic()?;
                    RequestReader::new(file).read().into_diagnostic()?
                }
                (None, Some(amount)) => WebhookRequest::with_amount(amount),
                (None, None) => WebhookRequest::without_body(),
            };

            let config = DispatcherConfig::default().with_region(backend.region.clone());
            let dispatcher =
                WebhookDispatcher::new(backend.secret_store(), backend.client_factory(), config);
            let response = dispatcher.handle(request).await;

            let stdout = io::stdout();
            let mut writer = ResponseWriter::new(stdout.lock());
            writer.write_response(&response).into_diagnostic()?;
        }
        Command::Issue {
            interval,
            duration,
            min_batch,
            max_batch,
            backend,
        } => {
            let schedule =
                IssuerSchedule::new(interval, duration, min_batch..=max_batch).into_diagnostic()?;

            let store = backend.secret_store();
            let credentials = resolve_secrets(store.as_ref(), &SECRET_NAMES, &backend.region)
                .await
                .into_diagnostic()?;
            let project =
                Project::from_credentials(Environment::Sandbox, &credentials).into_diagnostic()?;
            let client = (backend.client_factory())(project).into_diagnostic()?;

            let summary = PeriodicIssuer::new(client, schedule, StdRng::from_entropy())
                .run()
                .await
                .into_diagnostic()?;

            println!(
                "Issued {} invoices in {} batches",
                summary.invoices, summary.batches
            );
        }
    }

    Ok(())
}
