use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::config::API_TOKEN_VARS;
use crate::error::ApiError;
use crate::openelectricity::{self, INTERVAL, MIN_POINTS, NETWORK_REGION, UNITS};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AveragePriceResponse {
    pub network_region: &'static str,
    pub interval: &'static str,
    pub points_used: usize,
    pub price_points: Vec<f64>,
    pub average_price: f64,
    pub units: &'static str,
}

pub async fn handler(
    State(state): State<AppState>,
) -> Result<Json<AveragePriceResponse>, ApiError> {
    // Credential check comes first so a misconfigured server never talks
    // to the upstream at all.
    let token = state
        .config
        .api_token
        .as_deref()
        .ok_or_else(|| ApiError::config(format!("{} is not set", API_TOKEN_VARS.join(" or "))))?;

    let values = openelectricity::fetch_prices(&state.client, token).await?;
    let (price_points, average_price) = trailing_mean(&values).ok_or_else(|| {
        ApiError::gateway("Upstream response did not contain enough price points")
    })?;

    tracing::info!(
        "Averaged {} points for {NETWORK_REGION}: {average_price:.2} {UNITS}",
        price_points.len()
    );

    Ok(Json(AveragePriceResponse {
        network_region: NETWORK_REGION,
        interval: INTERVAL,
        points_used: price_points.len(),
        price_points,
        average_price,
        units: UNITS,
    }))
}

// Last MIN_POINTS values in document order and their mean; None when the
// payload is too sparse to average.
fn trailing_mean(values: &[f64]) -> Option<(Vec<f64>, f64)> {
    if values.len() < MIN_POINTS {
        return None;
    }
    let last = values[values.len() - MIN_POINTS..].to_vec();
    let mean = last.iter().sum::<f64>() / last.len() as f64;
    Some((last, mean))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::{config::Config, router, AppState};

    #[test]
    fn trailing_mean_takes_last_three() {
        let (points, mean) = trailing_mean(&[10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
        assert_eq!(points, vec![30.0, 40.0, 50.0]);
        assert_eq!(mean, 40.0);
    }

    #[test]
    fn trailing_mean_of_exactly_three() {
        let (points, mean) = trailing_mean(&[98.4, 101.2, 99.0]).unwrap();
        assert_eq!(points, vec![98.4, 101.2, 99.0]);
        assert_eq!(mean, (98.4 + 101.2 + 99.0) / 3.0);
    }

    #[test]
    fn trailing_mean_refuses_sparse_input() {
        assert!(trailing_mean(&[]).is_none());
        assert!(trailing_mean(&[1.0, 2.0]).is_none());
    }

    #[tokio::test]
    async fn missing_token_is_500_without_network() {
        let state = AppState {
            client: reqwest::Client::new(),
            config: Config {
                port: 8000,
                api_token: None,
            },
        };

        let response = router(state)
            .oneshot(
                Request::builder()
                    .uri("/average-price")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json["detail"],
            "OPENELECTRICITY_API_TOKEN or OPEN_ELECTRICITY_API_KEY is not set"
        );
    }
}
