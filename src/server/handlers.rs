use super::types::{DiagnoseRequest, ErrorResponse};
use crate::diagnosis::{DiagnosisRecord, DiagnosisService};
use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DiagnosisService>,
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

fn error_reply(status: StatusCode, error: impl Into<String>) -> ErrorReply {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

/// Decodes the JSON body; an empty body reads as a request without an image.
async fn read_request(request: Request) -> Result<DiagnoseRequest, ErrorReply> {
    // The rebuilt request needs the original extensions to keep the body limit.
    let headers = request.headers().clone();
    let extensions = request.extensions().clone();

    let body = Bytes::from_request(request, &()).await.map_err(|rejection| {
        warn!("Failed to read diagnose request body: {}", rejection.body_text());
        error_reply(rejection.status(), rejection.body_text())
    })?;

    if body.is_empty() {
        return Ok(DiagnoseRequest::default());
    }

    let mut request = Request::new(Body::from(body));
    *request.headers_mut() = headers;
    *request.extensions_mut() = extensions;

    let Json(payload) = Json::<DiagnoseRequest>::from_request(request, &())
        .await
        .map_err(|rejection| {
            warn!("Rejected diagnose request body: {}", rejection.body_text());
            error_reply(rejection.status(), rejection.body_text())
        })?;

    Ok(payload)
}

pub async fn diagnose(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<DiagnosisRecord>, ErrorReply> {
    let request = read_request(request).await?;

    let request_id = Uuid::new_v4();
    let span = info_span!("diagnose", %request_id);

    async move {
        match state.service.diagnose(request.image_base64.as_deref()).await {
            Ok(record) => {
                info!("Diagnosis completed");
                Ok(Json(record))
            }
            Err(e) => {
                let status = e.status_code();
                if status.is_server_error() {
                    error!("Diagnosis failed: {}", e);
                } else {
                    warn!("Diagnosis rejected: {}", e);
                }
                Err(error_reply(
                    status,
                    e.public_message(state.service.expose_raw_output()),
                ))
            }
        }
    }
    .instrument(span)
    .await
}

pub async fn method_not_allowed() -> ErrorReply {
    error_reply(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
