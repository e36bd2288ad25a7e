use crate::config::AirtableConfig;
use crate::metrics_defs::{UPSTREAM_DURATION, UPSTREAM_FAILURES, UPSTREAM_REQUESTS};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use url::Url;

#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("no Airtable base configured")]
    BaseNotConfigured,

    #[error("invalid table URL: {0}")]
    InvalidUrl(String),

    #[error("airtable returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("airtable request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One row of the table. Field values stay untyped; the table schema is
/// owned by Airtable and only the configured field names are interpreted.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: serde_json::Map<String, Value>,
    #[serde(rename = "createdTime", skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RecordSet {
    pub records: Vec<Record>,
}

/// Client for a single Airtable table.
///
/// Requests are single-shot: no retries and no client-side timeout, a
/// failure surfaces immediately to the caller.
#[derive(Clone)]
pub struct TableClient {
    client: reqwest::Client,
    table_url: Option<String>,
    api_key: Option<String>,
}

impl TableClient {
    pub fn new(config: &AirtableConfig) -> Self {
        let table_url = config.base_id.as_ref().map(|base| {
            format!(
                "{}/{}/{}",
                config.api_url.trim_end_matches('/'),
                base,
                config.table
            )
        });

        TableClient {
            client: reqwest::Client::new(),
            table_url,
            api_key: config.api_key.clone(),
        }
    }

    /// Lists records, optionally capped with Airtable's `maxRecords`
    /// parameter, parsed into a [`RecordSet`].
    pub async fn list_records(&self, max_records: Option<u32>) -> Result<RecordSet, TableError> {
        let mut url = self.table_url()?;
        if let Some(max) = max_records {
            url.query_pairs_mut()
                .append_pair("maxRecords", &max.to_string());
        }

        let response = self.send("GET", self.authorize(self.client.get(url))).await?;
        Ok(response.json::<RecordSet>().await?)
    }

    /// Fetches a single record and returns the upstream response verbatim,
    /// for inspecting what the table actually contains.
    pub async fn probe_record(&self) -> Result<Value, TableError> {
        let mut url = self.table_url()?;
        url.query_pairs_mut().append_pair("maxRecords", "1");

        let response = self.send("GET", self.authorize(self.client.get(url))).await?;
        Ok(response.json::<Value>().await?)
    }

    /// Forwards a batch update (`{"records": [{"id", "fields"}, ..]}`)
    /// unmodified to the table's PATCH endpoint.
    pub async fn patch_records(&self, body: &Value) -> Result<Value, TableError> {
        let url = self.table_url()?;

        let response = self
            .send("PATCH", self.authorize(self.client.patch(url)).json(body))
            .await?;
        Ok(response.json::<Value>().await?)
    }

    fn table_url(&self) -> Result<Url, TableError> {
        let raw = self
            .table_url
            .as_ref()
            .ok_or(TableError::BaseNotConfigured)?;
        Url::parse(raw).map_err(|e| TableError::InvalidUrl(e.to_string()))
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    async fn send(
        &self,
        method: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, TableError> {
        metrics::counter!(UPSTREAM_REQUESTS.name, "method" => method).increment(1);
        let started = Instant::now();
        let result = request.send().await;
        metrics::histogram!(UPSTREAM_DURATION.name).record(started.elapsed().as_secs_f64());

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                metrics::counter!(UPSTREAM_FAILURES.name).increment(1);
                tracing::error!(method, error = %e, "airtable request failed");
                return Err(e.into());
            }
        };

        if !response.status().is_success() {
            metrics::counter!(UPSTREAM_FAILURES.name).increment(1);
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(method, status, body = %body, "airtable returned an error");
            return Err(TableError::Status { status, body });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AirtableConfig;

    fn test_config(base_id: Option<&str>) -> AirtableConfig {
        AirtableConfig {
            api_url: "http://127.0.0.1:9/v0/".into(),
            base_id: base_id.map(String::from),
            api_key: Some("keyTEST".into()),
            table: "tblTEST".into(),
        }
    }

    #[tokio::test]
    async fn missing_base_fails_before_any_request() {
        let client = TableClient::new(&test_config(None));

        assert!(matches!(
            client.list_records(Some(100)).await.unwrap_err(),
            TableError::BaseNotConfigured
        ));
        assert!(matches!(
            client.patch_records(&serde_json::json!({})).await.unwrap_err(),
            TableError::BaseNotConfigured
        ));
    }

    #[test]
    fn table_url_joins_api_url_base_and_table() {
        let client = TableClient::new(&test_config(Some("appBASE")));

        assert_eq!(
            client.table_url().unwrap().as_str(),
            "http://127.0.0.1:9/v0/appBASE/tblTEST"
        );
    }

    #[test]
    fn record_set_parses_airtable_list_shape() {
        let body = serde_json::json!({
            "records": [
                {
                    "id": "recAAA",
                    "createdTime": "2026-03-01T10:00:00.000Z",
                    "fields": {"Event Name": "Opening Night", "Role": "Usher"}
                },
                {"id": "recBBB", "fields": {}}
            ]
        });

        let set: RecordSet = serde_json::from_value(body).unwrap();
        assert_eq!(set.records.len(), 2);
        assert_eq!(set.records[0].id, "recAAA");
        assert_eq!(set.records[0].fields["Role"], "Usher");
        assert!(set.records[1].created_time.is_none());
    }

    #[test]
    fn record_without_created_time_serializes_without_the_key() {
        let record = Record {
            id: "recAAA".into(),
            fields: serde_json::Map::new(),
            created_time: None,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("createdTime").is_none());
    }
}
