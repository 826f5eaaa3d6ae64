use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use shared::errors::ErrorResponse;

/// JSON body extractor whose rejections use the service's error envelope
/// instead of axum's plain-text body. The status code is axum's: 400 for
/// malformed JSON, 415 for a missing content type, 422 for missing or
/// mistyped fields.
pub struct JsonPayload<T>(pub T);

impl<S, T> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let payload = ErrorResponse {
                    status: "error".into(),
                    message: rejection.body_text(),
                };
                (rejection.status(), Json(payload))
            })?;

        Ok(Self(value))
    }
}
