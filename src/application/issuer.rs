use crate::config::IssuerSchedule;
use crate::domain::invoice::InvoiceGenerator;
use crate::domain::ports::PaymentClientBox;
use crate::error::Result;
use chrono::Utc;
use rand::Rng;
use tokio::time::{Instant, sleep};
use tracing::info;

/// Totals of one issuer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IssuerSummary {
    pub batches: usize,
    pub invoices: usize,
}

/// Issues batches of synthetic invoices on a fixed schedule.
///
/// The session is opened once by the caller and reused for every batch.
/// Any error from the payment API ends the run.
pub struct PeriodicIssuer<R: Rng> {
    client: PaymentClientBox,
    schedule: IssuerSchedule,
    generator: InvoiceGenerator<R>,
}

impl<R: Rng> PeriodicIssuer<R> {
    pub fn new(client: PaymentClientBox, schedule: IssuerSchedule, rng: R) -> Self {
        Self {
            client,
            schedule,
            generator: InvoiceGenerator::new(rng),
        }
    }

    pub async fn run(mut self) -> Result<IssuerSummary> {
        let deadline = Instant::now() + self.schedule.duration;
        let mut summary = IssuerSummary::default();

        while Instant::now() < deadline {
            let count = self.generator.batch_size(self.schedule.batch_size.clone());
            let batch = self.generator.batch(count, Utc::now());
            let issued = self.client.create_invoices(batch).await?;

            summary.batches += 1;
            summary.invoices += issued.len();
            info!(
                batch = summary.batches,
                invoices = issued.len(),
                "Issued invoice batch"
            );

            sleep(self.schedule.interval).await;
        }

        Ok(summary)
    }
}
