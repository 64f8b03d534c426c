//! JSON body extractor that reports the path of a mistyped field.

use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::de::DeserializeOwned;

use crate::error::ServiceError;

/// Like [`web::Json`], but type errors name the offending field.
///
/// Syntax and content-type errors still go through the app's `JsonConfig`.
#[derive(Debug)]
pub struct TypedJson<T>(pub T);

impl<T> TypedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for TypedJson<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: DeserializeOwned + 'static> FromRequest for TypedJson<T> {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Json::<serde_json::Value>::from_request(req, payload);
        Box::pin(async move {
            let web::Json(value) = body.await?;
            serde_path_to_error::deserialize(value)
                .map(TypedJson)
                .map_err(|err| ServiceError::from(err).into())
        })
    }
}
