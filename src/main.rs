use axum::{Router, extract::Query, response::Json, routing::get};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use ps_core::constants::MOCK_FHIR_BASE;
use ps_core::sources::{filter_records, search_url};
use ps_core::{Bundle, SearchField, SearchQuery, mock_patients};

#[derive(Serialize, ToSchema)]
struct HealthRes {
    ok: bool,
    message: String,
}

/// Search parameters accepted on `/Patient`. The first one present is used.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct PatientSearchParams {
    /// Case-insensitive substring of the patient's full name
    name: Option<String>,
    /// Case-insensitive substring of the patient's identifier
    identifier: Option<String>,
    /// Case-insensitive substring of the patient's phone number
    phone: Option<String>,
    /// Case-insensitive substring of the patient's email address
    email: Option<String>,
}

impl PatientSearchParams {
    fn query(&self) -> Option<SearchQuery> {
        [
            (SearchField::Name, &self.name),
            (SearchField::Identifier, &self.identifier),
            (SearchField::Phone, &self.phone),
            (SearchField::Email, &self.email),
        ]
        .into_iter()
        .find_map(|(field, value)| {
            let value = value.as_deref()?;
            SearchQuery::parse(field.as_str(), value).ok()
        })
    }
}

#[derive(OpenApi)]
#[openapi(paths(health, search_patients), components(schemas(HealthRes)))]
struct ApiDoc;

/// Mock FHIR server for developing against the widget's remote mode
///
/// Serves the built-in mock dataset as `GET /Patient` searchset bundles.
///
/// # Environment Variables
/// - `PS_MOCK_ADDR`: listen address (default: "0.0.0.0:8080")
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("patient_search_run=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("PS_MOCK_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    tracing::info!("++ Starting mock FHIR server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app()).await?;

    Ok(())
}

fn app() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/Patient", get(search_patients))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Mock FHIR server is running".into(),
    })
}

#[utoipa::path(
    get,
    path = "/Patient",
    params(PatientSearchParams),
    responses(
        (status = 200, description = "Searchset bundle of matching Patient resources")
    )
)]
/// Search the mock dataset
///
/// Without a usable search parameter every patient is returned.
async fn search_patients(Query(params): Query<PatientSearchParams>) -> Json<Bundle> {
    Json(search_bundle(&params))
}

fn search_bundle(params: &PatientSearchParams) -> Bundle {
    match params.query() {
        Some(query) => {
            let records = filter_records(mock_patients(), &query);
            tracing::info!(
                field = %query.field(),
                term = query.term().as_str(),
                matches = records.len(),
                "patient search"
            );
            let self_url = search_url(MOCK_FHIR_BASE, &query);
            Bundle::searchset(&records, MOCK_FHIR_BASE, Some(&self_url))
        }
        None => Bundle::searchset(mock_patients(), MOCK_FHIR_BASE, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use ps_core::PatientRecord;
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn name_search_returns_matching_bundle() {
        let (status, body) = get_json("/Patient?name=john").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resourceType"], "Bundle");
        assert_eq!(body["type"], "searchset");
        assert_eq!(body["total"], 2);
        let entries = body["entry"].as_array().unwrap();
        assert_eq!(entries[0]["resource"]["name"][0]["family"], "Doe");
        assert_eq!(entries[1]["resource"]["name"][0]["family"], "Johnson");
    }

    #[tokio::test]
    async fn no_parameter_returns_everyone() {
        let (_, body) = get_json("/Patient").await;
        assert_eq!(body["total"], 10);
    }

    #[test]
    fn first_present_parameter_wins() {
        let params = PatientSearchParams {
            identifier: Some("PAT002".into()),
            email: Some("john".into()),
            ..Default::default()
        };
        let bundle = search_bundle(&params);
        let names: Vec<String> = bundle
            .records()
            .iter()
            .map(PatientRecord::display_name)
            .collect();
        assert_eq!(names, vec!["Jane Smith"]);
    }

    #[test]
    fn self_link_encodes_the_term() {
        let params = PatientSearchParams {
            name: Some("Doe & Sons".into()),
            ..Default::default()
        };
        let bundle = search_bundle(&params);
        assert_eq!(
            bundle.link[0].url,
            "http://fhir-server/Patient?name=Doe%20%26%20Sons"
        );
    }

    #[test]
    fn blank_parameter_is_skipped() {
        let params = PatientSearchParams {
            name: Some("  ".into()),
            phone: Some("0127".into()),
            ..Default::default()
        };
        let bundle = search_bundle(&params);
        assert_eq!(bundle.records().len(), 1);
    }
}
