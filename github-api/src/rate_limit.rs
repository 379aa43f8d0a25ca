//! Quota bookkeeping based on the `x-ratelimit-*` response headers.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// Remaining-request count under which every response logs a warning.
pub const LOW_WATER_MARK: u64 = 100;

pub(crate) const HEADER_REMAINING: &str = "x-ratelimit-remaining";
pub(crate) const HEADER_LIMIT: &str = "x-ratelimit-limit";
pub(crate) const HEADER_RESET: &str = "x-ratelimit-reset";

/// Quota snapshot observed on a single response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitState {
    pub remaining: u64,
    pub limit: u64,
    /// Epoch seconds at which the quota window resets.
    pub reset_epoch: i64,
}

impl RateLimitState {
    /// Extract the quota from response headers.
    ///
    /// Returns `None` unless all three headers are present and numeric.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let remaining = header_number::<u64>(headers, HEADER_REMAINING)?;
        let limit = header_number::<u64>(headers, HEADER_LIMIT)?;
        let reset_epoch = reset_epoch_from_headers(headers)?;

        Some(Self {
            remaining,
            limit,
            reset_epoch,
        })
    }

    pub fn is_low(&self, low_water_mark: u64) -> bool {
        self.remaining < low_water_mark
    }

    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.reset_epoch, 0)
    }
}

/// Read only the reset header. Its presence on a 403 marks quota exhaustion.
pub fn reset_epoch_from_headers(headers: &HeaderMap) -> Option<i64> {
    header_number::<i64>(headers, HEADER_RESET)
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<T>().ok())
}

/// Render a reset epoch as wall-clock `HH:MM` in the given timezone.
pub fn format_reset_time<Tz>(reset_epoch: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp(reset_epoch, 0) {
        Some(utc) => utc.with_timezone(tz).format("%H:%M").to_string(),
        None => "unknown".to_string(),
    }
}

/// Reset time in the local timezone, as shown to users.
pub fn local_reset_time(reset_epoch: i64) -> String {
    format_reset_time(reset_epoch, &Local)
}

/// Response of the `/rate_limit` endpoint. Calling it does not count against the quota.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitOverview {
    pub resources: RateLimitResources,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitResources {
    pub core: QuotaWindow,
    pub search: QuotaWindow,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct QuotaWindow {
    pub limit: u64,
    pub remaining: u64,
    pub reset: i64,
    #[serde(default)]
    pub used: u64,
}

impl From<QuotaWindow> for RateLimitState {
    fn from(window: QuotaWindow) -> Self {
        Self {
            remaining: window.remaining,
            limit: window.limit,
            reset_epoch: window.reset,
        }
    }
}
