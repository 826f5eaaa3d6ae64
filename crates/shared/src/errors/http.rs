use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum HttpError {
    NotFound,
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound,
                RepositoryError::Sqlx(_) => HttpError::Internal("Repository error".into()),
                RepositoryError::Custom(msg) => HttpError::Internal(msg),
            },
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            // not-found carries no body
            HttpError::NotFound => StatusCode::NOT_FOUND.into_response(),
            HttpError::Internal(message) => {
                let body = Json(ErrorResponse {
                    status: "error".into(),
                    message,
                });

                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
