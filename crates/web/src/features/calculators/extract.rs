use axum::extract::FromRequest;

use crate::error::WebError;

/// JSON body extractor whose rejections render as validation errors.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(WebError))]
pub struct CalculatorJson<T>(pub T);
