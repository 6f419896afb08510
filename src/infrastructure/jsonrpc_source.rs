// JSON-RPC data source for an Odoo-style dashboard backend
use crate::application::data_source::DashboardDataSource;
use crate::domain::dashboard::kpi_fields;
use crate::domain::metrics::{MetricSnapshot, SeriesPoint};
use crate::infrastructure::config::BackendSettings;
use crate::infrastructure::rpc_mapper::{
    record_id_from_json, series_from_json, snapshot_from_json, snapshot_from_rows,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

const APPOINTMENT_METHOD: &str = "get_appointment_chart_data";
const REVENUE_METHOD: &str = "get_revenue_chart_data";
const DEPARTMENT_METHOD: &str = "get_department_patient_distribution";

#[derive(Debug)]
pub struct JsonRpcDataSource {
    client: reqwest::Client,
    base_url: String,
    model: String,
    session_id: Option<String>,
    date_range_days: Option<u32>,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    message: String,
    #[serde(default)]
    data: Option<RpcErrorData>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorData {
    #[serde(default)]
    message: Option<String>,
}

impl RpcError {
    fn describe(&self) -> String {
        match self.data.as_ref().and_then(|d| d.message.as_deref()) {
            Some(detail) => format!("{}: {}", self.message, detail),
            None => self.message.clone(),
        }
    }
}

impl JsonRpcDataSource {
    pub fn new(backend: &BackendSettings, date_range_days: Option<u32>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = backend.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: backend.url.trim_end_matches('/').to_string(),
            model: backend.model.clone(),
            session_id: backend.session_id.clone(),
            date_range_days,
            next_id: AtomicU64::new(1),
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/web/dataset/call_kw/{}/{}", self.base_url, self.model, method)
    }

    async fn call_kw(&self, method: &str, args: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "method": "call",
            "id": id,
            "params": {
                "model": self.model,
                "method": method,
                "args": args,
                "kwargs": {},
            },
        });

        tracing::debug!(rpc_id = id, method, "Calling dashboard backend");

        let mut request = self.client.post(self.endpoint(method)).json(&body);
        if let Some(session_id) = &self.session_id {
            request = request.header(reqwest::header::COOKIE, format!("session_id={}", session_id));
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to backend", method))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backend {} failed with status {}: {}", method, status, body);
        }

        let data = response
            .json::<RpcResponse>()
            .await
            .with_context(|| format!("Failed to parse {} response", method))?;

        if let Some(error) = data.error {
            anyhow::bail!("Backend {} error: {}", method, error.describe());
        }

        data.result
            .with_context(|| format!("Backend {} returned no result", method))
    }

    /// Values for the throwaway dashboard record the chart methods run on.
    fn create_values(&self, today: NaiveDate) -> Value {
        let Some(days) = self.date_range_days else {
            return json!({});
        };
        let from = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        json!({
            "date_from": from.format("%Y-%m-%d").to_string(),
            "date_to": today.format("%Y-%m-%d").to_string(),
        })
    }

    /// Chart methods are record methods, so each call creates a transient
    /// dashboard record first and runs the method on it.
    async fn call_on_transient(&self, method: &str) -> Result<Value> {
        let values = self.create_values(Local::now().date_naive());
        let created = self.call_kw("create", json!([values])).await?;
        let record_id = record_id_from_json(&created).context("Unexpected create response")?;
        self.call_kw(method, json!([[record_id]])).await
    }
}

#[async_trait]
impl DashboardDataSource for JsonRpcDataSource {
    async fn get_kpi_snapshot(&self) -> Result<MetricSnapshot> {
        let rows = self
            .call_kw("search_read", json!([[], kpi_fields()]))
            .await?;
        snapshot_from_rows(&rows)
    }

    async fn get_appointment_distribution(&self) -> Result<MetricSnapshot> {
        let data = self.call_on_transient(APPOINTMENT_METHOD).await?;
        snapshot_from_json(&data)
    }

    async fn get_revenue_trend(&self) -> Result<Vec<SeriesPoint>> {
        let data = self.call_on_transient(REVENUE_METHOD).await?;
        series_from_json(&data, "month", "revenue")
    }

    async fn get_department_distribution(&self) -> Result<Vec<SeriesPoint>> {
        let data = self.call_on_transient(DEPARTMENT_METHOD).await?;
        series_from_json(&data, "department", "count")
    }
}
