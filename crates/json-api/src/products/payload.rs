//! Product request bodies, accepted as JSON or as multipart form data.

use std::str::FromStr;

use rust_decimal::Decimal;
use salvo::{
    http::{form::FilePart, header::CONTENT_LENGTH},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use vitrine_app::domain::{
    media::{MAX_UPLOAD_BYTES, Upload},
    products::data::{NewProduct, ProductUpdate},
};

use crate::{extensions::*, observability::record_upload};

/// One image at the upload ceiling plus room for the text fields.
pub(crate) const MAX_REQUEST_BYTES: usize = MAX_UPLOAD_BYTES + 256 * 1024;

/// Multipart field carrying the image file.
pub(crate) const IMAGE_FIELD: &str = "image";

/// A price sent either as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum PriceInput {
    Number(serde_json::Number),
    Text(String),
}

impl PriceInput {
    /// `Ok(None)` for blank text, which form clients send for untouched inputs.
    fn into_decimal(self) -> Result<Option<Decimal>, StatusError> {
        let text = match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.trim().to_owned(),
        };

        if text.is_empty() {
            return Ok(None);
        }

        Decimal::from_str(&text)
            .or_else(|_scientific| Decimal::from_scientific(&text))
            .map(Some)
            .or_400("price must be a decimal number")
    }
}

/// Text fields of a product create or update.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ProductFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<PriceInput>,
    pub category: Option<String>,

    #[serde(alias = "image")]
    pub image_url: Option<String>,
}

impl ProductFields {
    pub(crate) fn into_new_product(self) -> Result<NewProduct, StatusError> {
        let price = self
            .price
            .map(PriceInput::into_decimal)
            .transpose()?
            .flatten()
            .ok_or_else(|| StatusError::bad_request().brief("price is required"))?;

        Ok(NewProduct {
            name: self.name.unwrap_or_default(),
            description: self.description,
            price,
            category: self.category.unwrap_or_default(),
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
        })
    }

    pub(crate) fn into_update(self) -> Result<ProductUpdate, StatusError> {
        Ok(ProductUpdate {
            price: self.price.map(PriceInput::into_decimal).transpose()?.flatten(),
            name: self.name,
            description: self.description,
            category: self.category,
            image_url: self.image_url,
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct ProductPayload {
    pub fields: ProductFields,
    pub upload: Option<Upload>,
}

/// Read a product body, rejecting anything larger than [`MAX_REQUEST_BYTES`].
pub(crate) async fn read_payload(req: &mut Request) -> Result<ProductPayload, StatusError> {
    if declared_length(req).is_some_and(|length| length > MAX_REQUEST_BYTES) {
        return Err(StatusError::payload_too_large().brief("Request body is too large"));
    }

    req.set_secure_max_size(MAX_REQUEST_BYTES);

    if is_multipart(req) {
        read_multipart(req).await
    } else {
        let fields = req
            .parse_json::<ProductFields>()
            .await
            .or_400("Invalid product payload")?;

        Ok(ProductPayload {
            fields,
            upload: None,
        })
    }
}

fn declared_length(req: &Request) -> Option<usize> {
    req.headers()
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn is_multipart(req: &Request) -> bool {
    req.content_type()
        .is_some_and(|mime| mime.essence_str() == "multipart/form-data")
}

async fn read_multipart(req: &mut Request) -> Result<ProductPayload, StatusError> {
    let form = req.form_data().await.or_400("Invalid multipart body")?;

    let text = |key: &str| form.fields.get(key).cloned();

    let fields = ProductFields {
        name: text("name"),
        description: text("description"),
        price: text("price").map(PriceInput::Text),
        category: text("category"),
        image_url: text("image_url").or_else(|| text(IMAGE_FIELD)),
    };

    let upload = match form.files.get(IMAGE_FIELD) {
        Some(file) => read_upload(file).await?,
        None => None,
    };

    Ok(ProductPayload { fields, upload })
}

/// Browsers submit an empty, unnamed part when no file was picked.
async fn read_upload(file: &FilePart) -> Result<Option<Upload>, StatusError> {
    let file_name = file.name().unwrap_or_default();

    if file.size() == 0 && file_name.is_empty() {
        return Ok(None);
    }

    if file.size() > MAX_UPLOAD_BYTES as u64 {
        return Err(StatusError::payload_too_large().brief(format!(
            "Image exceeds the {MAX_UPLOAD_BYTES} byte limit"
        )));
    }

    let bytes = tokio::fs::read(file.path())
        .await
        .or_500("failed to read uploaded image")?;

    let content_type = file
        .content_type()
        .map(|mime| mime.essence_str().to_owned())
        .unwrap_or_default();

    record_upload(bytes.len());

    Ok(Some(Upload::new(file_name, content_type, bytes)))
}
