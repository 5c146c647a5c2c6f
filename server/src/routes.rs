use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use predictor::Predictor;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    /// Missing or `null` means no symptoms.
    #[serde(default)]
    pub symptoms: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictResponse {
    pub predicted_disease: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Predict(#[from] predictor::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "prediction failed");
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub fn router(predictor: Arc<Predictor>) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(predictor)
}

async fn predict(
    State(predictor): State<Arc<Predictor>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let symptoms = request.symptoms.unwrap_or_default();
    let disease = predictor.predict(&symptoms)?;
    info!(symptoms = symptoms.len(), disease, "prediction");

    Ok(Json(PredictResponse {
        predicted_disease: disease.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use predictor::{ArtifactPaths, ClassIndex, Classifier, DiseaseLabels, SymptomVocabulary};
    use tower::ServiceExt;

    use super::*;

    fn sample_router() -> Router {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../artifacts");
        let predictor = Predictor::load(&ArtifactPaths::in_dir(dir)).unwrap();
        router(Arc::new(predictor))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_predict_returns_disease() {
        let (status, body) = send(
            sample_router(),
            post_json(r#"{"symptoms": ["Itching", " skin rash "]}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "predicted_disease": "Fungal infection" }));
    }

    #[tokio::test]
    async fn test_unknown_symptoms_are_ignored() {
        let (_, with_unknown) = send(
            sample_router(),
            post_json(r#"{"symptoms": ["high fever", "not_a_real_symptom_xyz"]}"#),
        )
        .await;
        let (_, plain) = send(sample_router(), post_json(r#"{"symptoms": ["high fever"]}"#)).await;
        assert_eq!(with_unknown, plain);
        assert_eq!(plain["predicted_disease"], "Malaria");
    }

    #[tokio::test]
    async fn test_missing_symptoms_field_is_empty_list() {
        let (status, missing) = send(sample_router(), post_json("{}")).await;
        assert_eq!(status, StatusCode::OK);
        let (_, null) = send(sample_router(), post_json(r#"{"symptoms": null}"#)).await;
        let (_, empty) = send(sample_router(), post_json(r#"{"symptoms": []}"#)).await;
        assert_eq!(missing, empty);
        assert_eq!(null, empty);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let (status, _) = send(sample_router(), post_json("{not json")).await;
        assert!(status.is_client_error());

        let (status, _) = send(sample_router(), post_json(r#"{"symptoms": "itching"}"#)).await;
        assert!(status.is_client_error());

        let (status, _) = send(sample_router(), post_json(r#"{"symptoms": [1, 2]}"#)).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_wrong_method_and_path() {
        let request = Request::builder()
            .method("GET")
            .uri("/predict")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(sample_router(), request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        let request = Request::builder()
            .method("POST")
            .uri("/diagnose")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let (status, _) = send(sample_router(), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    struct Rogue;

    impl Classifier for Rogue {
        fn predict(&self, _features: &[f32]) -> ClassIndex {
            42
        }

        fn n_features(&self) -> usize {
            1
        }

        fn classes(&self) -> &[ClassIndex] {
            &[0]
        }
    }

    #[tokio::test]
    async fn test_unlabelled_class_is_server_error() {
        let vocabulary = SymptomVocabulary::new(vec!["cough".to_string()]).unwrap();
        let labels: DiseaseLabels = [(0, "Bronchitis".to_string())].into_iter().collect();
        let predictor = Predictor::new(vocabulary, Box::new(Rogue), labels).unwrap();

        let (status, body) = send(
            router(Arc::new(predictor)),
            post_json(r#"{"symptoms": ["cough"]}"#),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("42"));
    }
}
