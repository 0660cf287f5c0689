//! OpenAPI documentation, served at `/api/openapi.json`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use docrelay_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Docrelay API",
        version = "0.1.0",
        description = "Document upload and analysis relay. Forwards documents and questions to the analysis and query services, and serves the analyze page's form actions."
    ),
    paths(
        // Relays
        handlers::analyze_document::analyze_document,
        handlers::query::query,
        // Analyze page
        handlers::analyze_page::load_analyze_page,
        handlers::analyze_page::check_file,
        handlers::analyze_page::upload_document,
        handlers::analyze_page::export_document,
    ),
    components(
        schemas(
            error::ErrorResponse,
            models::AnalysisQuery,
            models::AnalyzePageData,
            models::FileConfig,
            models::UploadedFile,
            models::ValidationResult,
        )
    ),
    tags(
        (name = "relay", description = "Pass-through endpoints for the analysis and query services"),
        (name = "analyze", description = "Analyze page load and form actions"),
    )
)]
pub struct ApiDoc;
