use std::sync::Arc;

use crate::domain::catalog::DatasetKind;
use crate::domain::entities::jockey::JockeyData;
use crate::domain::entities::plot::PlotSpec;
use crate::domain::entities::record::Record;
use crate::usecase::ports::datasource::{DatasetSource, FetchError, PlotSource};

/// All three auction tables, loaded together or not at all.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuctionBundle {
    pub dams: Vec<Record>,
    pub horses: Vec<Record>,
    pub past_auctions: Vec<Record>,
}

impl AuctionBundle {
    pub fn records(&self, kind: DatasetKind) -> &[Record] {
        match kind {
            DatasetKind::Dams => &self.dams,
            DatasetKind::Horses => &self.horses,
            DatasetKind::PastAuctions => &self.past_auctions,
        }
    }
}

pub struct DatasetService {
    source: Arc<dyn DatasetSource>,
    plots: Arc<dyn PlotSource>,
}

impl DatasetService {
    pub fn new(source: Arc<dyn DatasetSource>, plots: Arc<dyn PlotSource>) -> Self {
        Self { source, plots }
    }

    pub async fn load(&self, kind: DatasetKind) -> Result<Vec<Record>, FetchError> {
        let payload = self.source.fetch_dataset(kind).await?;
        let records = kind.schema().ingest(payload)?;
        tracing::info!(dataset = kind.slug(), rows = records.len(), "loaded dataset");
        Ok(records)
    }

    /// Fetches the three datasets concurrently; the first failure fails the bundle.
    pub async fn load_auctions(&self) -> Result<AuctionBundle, FetchError> {
        let (dams, horses, past_auctions) = futures::try_join!(
            self.load(DatasetKind::Dams),
            self.load(DatasetKind::Horses),
            self.load(DatasetKind::PastAuctions),
        )
        .inspect_err(|err| tracing::error!(%err, "failed to load auction datasets"))?;

        Ok(AuctionBundle {
            dams,
            horses,
            past_auctions,
        })
    }

    pub async fn load_jockey_analytics(&self) -> Result<JockeyData, FetchError> {
        let data = self.source.fetch_jockey_analytics().await?;
        tracing::info!(jockeys = data.jockeys.len(), "loaded jockey analytics");
        Ok(data)
    }

    pub async fn generate_plot(&self, prompt: &str) -> Result<PlotSpec, FetchError> {
        let prompt = prompt.trim();
        tracing::info!(chars = prompt.len(), "requesting plot");
        self.plots.generate_plot(prompt).await
    }
}
