use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use medimart_engine::{
    CatalogApiError,
    CustomerApiError,
    OrderManagerError,
    PrescriptionApiError,
    RetailerApiError,
};
use thiserror::Error;

/// Every failure that escapes a handler is rendered as the uniform
/// `{"success": false, "message": ...}` payload with a mapped status code, so
/// callers always receive the same shape regardless of what went wrong.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    // Not-found and conflict messages go out verbatim
    #[error("{0}")]
    NoRecordFound(String),
    #[error("{0}")]
    DuplicateRecord(String),
    #[error("{0}")]
    ForbiddenTransition(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::ForbiddenTransition(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateRecord(_) => StatusCode::CONFLICT,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "success": false, "message": self.to_string() }).to_string())
    }
}

impl From<OrderManagerError> for ServerError {
    fn from(e: OrderManagerError) -> Self {
        match e {
            OrderManagerError::OrderNotFound(_) | OrderManagerError::ItemNotFound(_) => {
                Self::NoRecordFound(e.to_string())
            },
            OrderManagerError::MissingOrderId => Self::InvalidRequestBody(e.to_string()),
            OrderManagerError::InvalidStatusTransition { .. } => Self::ForbiddenTransition(e.to_string()),
            OrderManagerError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<CustomerApiError> for ServerError {
    fn from(e: CustomerApiError) -> Self {
        match e {
            CustomerApiError::CustomerNotFound(_) => Self::NoRecordFound(e.to_string()),
            CustomerApiError::EmailInUse(_) => Self::DuplicateRecord(e.to_string()),
            CustomerApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<RetailerApiError> for ServerError {
    fn from(e: RetailerApiError) -> Self {
        match e {
            RetailerApiError::RetailerNotFound(_) => Self::NoRecordFound(e.to_string()),
            RetailerApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<CatalogApiError> for ServerError {
    fn from(e: CatalogApiError) -> Self {
        match e {
            CatalogApiError::MedicineNotFound(_) => Self::NoRecordFound(e.to_string()),
            CatalogApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<PrescriptionApiError> for ServerError {
    fn from(e: PrescriptionApiError) -> Self {
        match e {
            PrescriptionApiError::PrescriptionNotFound(_) => Self::NoRecordFound(e.to_string()),
            PrescriptionApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}
