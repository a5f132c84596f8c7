use reqwest::Client;
use serde::Deserialize;

use crate::{error::FeedError, models::MetricSnapshot};

/// Pulls full snapshot batches from the upstream market-data collaborator.
#[derive(Clone)]
pub struct SnapshotFeed {
    http: Client,
    url: String,
}

// upstream may send either a bare array or `{ "snapshots": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum FeedBody {
    Bare(Vec<MetricSnapshot>),
    Wrapped { snapshots: Vec<MetricSnapshot> },
}

impl SnapshotFeed {
    pub fn new(url: String) -> Self {
        Self {
            http: Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<Vec<MetricSnapshot>, FeedError> {
        let res = self.http.get(&self.url).send().await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(FeedError::Status { status, body });
        }

        let body = res.json::<FeedBody>().await?;
        Ok(match body {
            FeedBody::Bare(v) => v,
            FeedBody::Wrapped { snapshots } => snapshots,
        })
    }
}
