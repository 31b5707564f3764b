use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct InfoResponse {
    pub message: &'static str,
}

pub async fn handler() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: "Use /average-price to fetch the latest NSW average price",
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::{config::Config, router, AppState};

    fn test_state() -> AppState {
        AppState {
            client: reqwest::Client::new(),
            config: Config {
                port: 8000,
                api_token: None,
            },
        }
    }

    #[tokio::test]
    async fn root_points_at_average_price() {
        let response = router(test_state())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json["message"],
            "Use /average-price to fetch the latest NSW average price"
        );
    }
}
