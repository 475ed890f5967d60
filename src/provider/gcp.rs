//! Google Compute Engine snapshot provider.
//!
//! Thin adapter over the Compute Engine snapshots REST API: paged
//! listing with an optional server-side filter expression, and
//! per-name deletion. Auth uses `GOOGLE_OAUTH_ACCESS_TOKEN` when set,
//! otherwise the GCE instance metadata server.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::provider::SnapshotProvider;
use crate::snapshot::Snapshot;

const COMPUTE_BASE: &str = "https://compute.googleapis.com/compute/v1";
const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";
const TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

pub struct GcpProvider {
    http: reqwest::Client,
    project: String,
    filter: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotListPage {
    #[serde(default)]
    items: Vec<SnapshotResource>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotResource {
    name: String,
    creation_timestamp: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl GcpProvider {
    pub fn new(project: impl Into<String>, filter: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            project: project.into(),
            filter,
        }
    }

    async fn access_token(&self) -> Result<String> {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            return Ok(token);
        }

        let response = self
            .http
            .get(METADATA_TOKEN_URL)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .context("failed to reach the GCE metadata server")?
            .error_for_status()
            .context("metadata token request rejected")?;

        let token: TokenResponse = response
            .json()
            .await
            .context("malformed metadata token response")?;

        Ok(token.access_token)
    }
}

#[async_trait]
impl SnapshotProvider for GcpProvider {
    async fn list_snapshots(&self) -> Result<Vec<Snapshot>> {
        let token = self.access_token().await?;
        let url = format!("{COMPUTE_BASE}/projects/{}/global/snapshots", self.project);

        let mut snapshots = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.http.get(&url).bearer_auth(&token);
            if let Some(filter) = &self.filter {
                request = request.query(&[("filter", filter)]);
            }
            if let Some(page) = &page_token {
                request = request.query(&[("pageToken", page)]);
            }

            let page: SnapshotListPage = request
                .send()
                .await
                .context("snapshot list request failed")?
                .error_for_status()
                .context("snapshot list request rejected")?
                .json()
                .await
                .context("malformed snapshot list response")?;

            for item in page.items {
                let create_time = DateTime::parse_from_rfc3339(&item.creation_timestamp)
                    .with_context(|| {
                        format!("invalid creationTimestamp on snapshot {}", item.name)
                    })?
                    .with_timezone(&Utc);
                snapshots.push(Snapshot::new(item.name, create_time));
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(count = snapshots.len(), project = %self.project, "listed snapshots");
        Ok(snapshots)
    }

    async fn delete_snapshots(&self, names: &[String]) -> Result<()> {
        let token = self.access_token().await?;

        // Sequential, first error aborts the batch; partial-failure
        // semantics are whatever the API returns.
        for name in names {
            let url = format!(
                "{COMPUTE_BASE}/projects/{}/global/snapshots/{name}",
                self.project
            );

            self.http
                .delete(&url)
                .bearer_auth(&token)
                .send()
                .await
                .with_context(|| format!("delete request for snapshot {name} failed"))?
                .error_for_status()
                .with_context(|| format!("delete request for snapshot {name} rejected"))?;

            debug!(name = %name, "snapshot delete accepted");
        }

        Ok(())
    }
}
