//! Unified error handling: store failures are classified once into a typed
//! kind and mapped to a single `{ "error": message }` response body.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::mysql::MySqlDatabaseError;

/// MySQL server error numbers the dashboard distinguishes.
const ER_DBACCESS_DENIED: u16 = 1044;
const ER_ACCESS_DENIED: u16 = 1045;
const ER_BAD_DB: u16 = 1049;
const ER_NO_SUCH_TABLE: u16 = 1146;
/// Statement aborted by the server's `max_execution_time`.
const ER_QUERY_TIMEOUT: u16 = 3024;

const TIMEOUT_MESSAGE: &str =
    "Tempo limite de conexão excedido. Verifique se o banco de dados está acessível.";

/// Body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Classified store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Timeout,
    AccessDenied,
    UnknownDatabase,
    MissingTable,
    Other,
}

impl StoreErrorKind {
    pub fn classify(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => Self::Timeout,
            sqlx::Error::Io(e) if e.kind() == std::io::ErrorKind::TimedOut => Self::Timeout,
            sqlx::Error::Database(db) => db
                .try_downcast_ref::<MySqlDatabaseError>()
                .map_or(Self::Other, |e| Self::from_number(e.number())),
            _ => Self::Other,
        }
    }

    /// Classify a MySQL server error number.
    fn from_number(number: u16) -> Self {
        match number {
            ER_ACCESS_DENIED | ER_DBACCESS_DENIED => Self::AccessDenied,
            ER_BAD_DB => Self::UnknownDatabase,
            ER_NO_SUCH_TABLE => Self::MissingTable,
            ER_QUERY_TIMEOUT => Self::Timeout,
            _ => Self::Other,
        }
    }

    /// Fixed message for a classified failure; `None` for [`Self::Other`].
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Timeout => Some(TIMEOUT_MESSAGE),
            Self::AccessDenied => {
                Some("Acesso negado ao banco de dados. Verifique as credenciais.")
            }
            Self::UnknownDatabase => Some("Banco de dados não encontrado."),
            Self::MissingTable => Some("Tabela de cartões não encontrada no banco de dados."),
            Self::Other => None,
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request exceeded the configured query time bound.
    #[error("Query exceeded {0:?}")]
    Timeout(Duration),
}

impl AppError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            AppError::Database(e) => StoreErrorKind::classify(e),
            AppError::Timeout(_) => StoreErrorKind::Timeout,
        }
    }

    /// Human-readable message shown to the dashboard user.
    pub fn user_message(&self) -> String {
        match (self.kind().message(), self) {
            (Some(message), _) => message.to_string(),
            (None, AppError::Database(e)) => format!("Erro: {e}"),
            (None, AppError::Timeout(_)) => TIMEOUT_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        tracing::error!(error = %self, kind = ?kind, "Store request failed");

        let body = ErrorBody {
            error: self.user_message(),
        };
        (kind.status(), Json(body)).into_response()
    }
}
