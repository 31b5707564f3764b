use chrono::{DateTime, Duration, Utc};
use chrono_tz::Australia::Sydney;
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

const API_BASE: &str = "https://api.openelectricity.org.au/v4/market/network/NEM";

pub const NETWORK_REGION: &str = "NSW1";
pub const INTERVAL: &str = "5m";
pub const METRIC: &str = "price";
pub const MIN_POINTS: usize = 3;
pub const UNITS: &str = "$ / MWh";

#[derive(Debug, Deserialize)]
pub struct MarketResponse {
    #[serde(default)]
    data: Vec<Series>,
}

#[derive(Debug, Deserialize)]
struct Series {
    #[serde(default)]
    metric: String,
    #[serde(default)]
    results: Vec<SeriesResult>,
}

#[derive(Debug, Deserialize)]
struct SeriesResult {
    #[serde(default)]
    columns: Columns,
    #[serde(default)]
    data: Vec<PriceRow>,
}

#[derive(Debug, Default, Deserialize)]
struct Columns {
    region: Option<String>,
    network_region: Option<String>,
    code: Option<String>,
}

impl Columns {
    // The region code shows up under different names depending on the
    // grouping; first non-empty wins.
    fn region_code(&self) -> Option<&str> {
        [&self.region, &self.network_region, &self.code]
            .into_iter()
            .filter_map(|col| col.as_deref())
            .find(|code| !code.is_empty())
    }
}

/// Rows arrive in three shapes depending on the query: a
/// `[timestamp, value]` pair, an object with a named value field, or a bare
/// number. Anything else lands in `Other` and decodes to `None`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceRow {
    Pair(Vec<Value>),
    Keyed(serde_json::Map<String, Value>),
    Bare(f64),
    Other(Value),
}

impl PriceRow {
    fn value(&self) -> Option<f64> {
        match self {
            PriceRow::Pair(cells) => cells.get(1).and_then(Value::as_f64),
            PriceRow::Keyed(fields) => ["value", "price", "v"]
                .into_iter()
                .find_map(|key| fields.get(key).and_then(Value::as_f64)),
            PriceRow::Bare(value) => Some(*value),
            PriceRow::Other(_) => None,
        }
    }
}

/// Naive (start, end) ISO strings in network local time (AEST/AEDT), ending
/// 30 minutes behind now. The API expects timezone-naive timestamps in the
/// network's local calendar.
pub fn time_window(minutes: i64) -> (String, String) {
    let end = Utc::now().with_timezone(&Sydney) - Duration::minutes(30);
    let start = end - Duration::minutes(minutes);
    (naive_local(start), naive_local(end))
}

fn naive_local(dt: DateTime<Tz>) -> String {
    dt.naive_local().format("%Y-%m-%dT%H:%M:%S").to_string()
}

pub async fn fetch_prices(client: &reqwest::Client, token: &str) -> Result<Vec<f64>, ApiError> {
    let (date_start, date_end) = time_window(45);
    let params = [
        ("metrics", METRIC),
        ("interval", INTERVAL),
        ("network_region", NETWORK_REGION),
        ("primary_grouping", "network_region"),
        ("date_start", date_start.as_str()),
        ("date_end", date_end.as_str()),
    ];

    tracing::debug!("Querying {API_BASE} for {date_start}..{date_end}");

    let response = client
        .get(API_BASE)
        .query(&params)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| ApiError::gateway(format!("Upstream request failed: {e}")))?;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Upstream { status, body });
    }

    let payload: MarketResponse = response
        .json()
        .await
        .map_err(|e| ApiError::gateway(format!("Upstream returned invalid JSON: {e}")))?;

    Ok(extract_prices(&payload))
}

/// All values for the target metric and region, in document order.
pub fn extract_prices(payload: &MarketResponse) -> Vec<f64> {
    let mut values = Vec::new();

    for series in &payload.data {
        if series.metric != METRIC {
            continue;
        }
        for result in &series.results {
            if let Some(code) = result.columns.region_code() {
                if !code.eq_ignore_ascii_case(NETWORK_REGION) {
                    continue;
                }
            }
            values.extend(result.data.iter().filter_map(PriceRow::value));
        }
    }

    values
}
