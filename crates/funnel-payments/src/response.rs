//! axum integration

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use funnel_core::ErrorBody;

use crate::error::RelayError;

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, Json(ErrorBody::new(self.user_message()))).into_response()
    }
}
