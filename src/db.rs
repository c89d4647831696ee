//! Database client and startup connectivity probe.
//!
//! The database is a hosted Supabase instance reached over its REST
//! interface. The handle is created once at startup and only its existence
//! is read afterwards; no route in this service issues queries through it.
//!
//! Connectivity is checked exactly once, at process start, by selecting a
//! single row from the `users` table. A failed probe puts the service into
//! degraded mode (reported through the status endpoints) rather than
//! aborting startup, and is never retried for the process lifetime.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;

use crate::config::AppConfig;

/// Timeout for the one-time startup probe
const PROBE_TIMEOUT_SECS: u64 = 10;

/// Table read by the startup probe
const PROBE_TABLE: &str = "users";

/// Handle to the hosted database's REST interface.
#[derive(Debug, Clone)]
pub struct Database {
    http: reqwest::Client,
    url: String,
    key: String,
}

impl Database {
    /// Build a client from configuration.
    ///
    /// Returns `None` when either credential is missing; the caller records
    /// the service as degraded instead of failing.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        let url = config.supabase_url.clone()?;
        let key = config.supabase_key.clone()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .build()
            .ok()?;

        Some(Self { http, url, key })
    }

    /// One-time startup probe: a minimal read against a known table.
    ///
    /// Returns `true` on an HTTP success status, `false` on any failure.
    /// Failures are logged, never propagated; the stored result stays fixed
    /// for the process lifetime even if reachability later changes.
    pub async fn probe(&self) -> bool {
        let endpoint = format!(
            "{}/rest/v1/{}?select=id&limit=1",
            self.url.trim_end_matches('/'),
            PROBE_TABLE
        );

        let result = self
            .http
            .get(&endpoint)
            .header("apikey", &self.key)
            .header(AUTHORIZATION, format!("Bearer {}", self.key))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Database connected");
                true
            }
            Ok(response) => {
                tracing::error!(
                    status = response.status().as_u16(),
                    "Database connection failed"
                );
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "Database connection failed");
                false
            }
        }
    }
}
