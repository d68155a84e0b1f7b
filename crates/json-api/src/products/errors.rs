//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use vitrine_app::domain::{
    media::MediaStoreError,
    products::{FilterError, ProductsServiceError},
};

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::Forbidden => {
            StatusError::forbidden().brief("Product belongs to another user")
        }
        ProductsServiceError::Validation(message) => StatusError::bad_request().brief(message),
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Media(MediaStoreError::InvalidMediaType(content_type)) => {
            StatusError::bad_request().brief(format!("Unsupported image type {content_type:?}"))
        }
        ProductsServiceError::Media(source @ MediaStoreError::MediaTooLarge { .. }) => {
            StatusError::payload_too_large().brief(source.to_string())
        }
        ProductsServiceError::Media(source) => {
            error!("product media failure: {source}");

            StatusError::internal_server_error().brief("Image storage failure")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage failure: {source}");

            StatusError::internal_server_error().brief("Storage failure")
        }
    }
}

pub(crate) fn filter_status_error(error: &FilterError) -> StatusError {
    StatusError::bad_request().brief(error.to_string())
}
