//! Custom Axum extractors

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::ServerError;
use crate::models::ValidateBody;

/// JSON body extractor that runs boundary validation.
///
/// Both an unparseable/missing body and a failed [`ValidateBody`] check
/// surface as 422 with a `{"detail": ...}` payload, so clients see one
/// error shape for every rejected request body.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + ValidateBody,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ServerError::Validation(e.body_text()))?;

        body.validate()?;
        Ok(Self(body))
    }
}
