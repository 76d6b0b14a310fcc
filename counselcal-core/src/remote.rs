//! HTTP client for the schedule proxy.
//!
//! The proxy forwards verbatim to the Apps Script endpoint: `GET` returns the
//! full raw collection, `POST` saves a record or deletes by id. A non-2xx
//! status counts as failure regardless of body content. There is no
//! pagination or partial update at this boundary; callers re-fetch the whole
//! collection after every mutation.

use serde_json::json;

use crate::error::{ScheduleError, ScheduleResult};
use crate::record::{RawRecord, ScheduleRecord};

/// The operations the reconciler needs from the proxy.
///
/// Implemented by the real HTTP client and by in-memory fakes in tests.
#[allow(async_fn_in_trait)]
pub trait RemoteApi {
    async fn fetch_all(&self) -> ScheduleResult<Vec<RawRecord>>;
    async fn save(&self, record: &ScheduleRecord) -> ScheduleResult<()>;
    async fn delete(&self, id: &str) -> ScheduleResult<()>;
}

/// Remote proxy client backed by reqwest.
pub struct Remote {
    base_url: String,
    http: reqwest::Client,
}

impl Remote {
    pub fn new(base_url: impl Into<String>) -> Self {
        Remote {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    fn check_status(response: reqwest::Response) -> ScheduleResult<reqwest::Response> {
        if !response.status().is_success() {
            return Err(ScheduleError::Proxy(format!(
                "Proxy returned status {}",
                response.status()
            )));
        }
        Ok(response)
    }
}

impl RemoteApi for Remote {
    async fn fetch_all(&self) -> ScheduleResult<Vec<RawRecord>> {
        // The Apps Script endpoint sits behind aggressive caches; bust them
        // with a timestamp query param and no-store headers.
        let url = format!(
            "{}?t={}",
            self.base_url,
            chrono::Utc::now().timestamp_millis()
        );

        let response = self
            .http
            .get(&url)
            .header("Cache-Control", "no-cache, no-store, must-revalidate")
            .header("Pragma", "no-cache")
            .send()
            .await?;
        let response = Self::check_status(response)?;

        response
            .json::<Vec<RawRecord>>()
            .await
            .map_err(|e| ScheduleError::Proxy(format!("Failed to parse response: {e}")))
    }

    async fn save(&self, record: &ScheduleRecord) -> ScheduleResult<()> {
        let response = self.http.post(&self.base_url).json(record).send().await?;
        Self::check_status(response)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> ScheduleResult<()> {
        let body = json!({ "action": "delete", "id": id });
        let response = self.http.post(&self.base_url).json(&body).send().await?;
        Self::check_status(response)?;
        Ok(())
    }
}
