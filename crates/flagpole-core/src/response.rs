use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Success envelope: `{"status": "success", "message"?, "data"?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip)]
    pub code: StatusCode,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: "success",
            message: None,
            data: Some(data),
            code: StatusCode::OK,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn created(mut self) -> Self {
        self.code = StatusCode::CREATED;
        self
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: Some(message.into()),
            data: None,
            code: StatusCode::OK,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_envelope_omits_message() {
        let value = serde_json::to_value(ApiResponse::data(vec![1, 2])).unwrap();
        assert_eq!(value, json!({"status": "success", "data": [1, 2]}));
    }

    #[test]
    fn test_message_envelope_omits_data() {
        let value = serde_json::to_value(ApiResponse::message("Feature flag deleted")).unwrap();
        assert_eq!(
            value,
            json!({"status": "success", "message": "Feature flag deleted"})
        );
    }

    #[test]
    fn test_created_sets_status_code() {
        let response = ApiResponse::data(1).with_message("created").created();
        assert_eq!(response.code, StatusCode::CREATED);
        assert_eq!(response.into_response().status(), StatusCode::CREATED);
    }
}
