use crate::errors::ApiError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, json};

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(e) => {
                let mut details = Map::new();
                details.insert(e.parameter.clone(), json!([{ "message": e.rule, "value": e.value }]));
                json!({ "title": e.to_string(), "status": status.as_u16(), "details": details })
            }
            // Storage details stay in the server log.
            Self::Storage(_) => json!({
                "title": "Server error while reading todos",
                "status": status.as_u16(),
            }),
        };
        (status, Json(body)).into_response()
    }
}
