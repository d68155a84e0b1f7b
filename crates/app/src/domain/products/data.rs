//! Products Data

use rust_decimal::Decimal;

use crate::domain::{
    media::{ImageRef, STORED_IMAGE_PREFIX, StoredImagePath},
    products::{errors::ProductsServiceError, records::ProductRecord},
};

/// Largest price the `NUMERIC(12, 2)` column can hold.
const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,

    /// External image; ignored when a file is uploaded alongside.
    pub image_url: Option<String>,
}

/// Product Update Data
///
/// Absent fields are left unchanged. An empty `description` or `image_url`
/// clears the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

/// What happens to a product's image on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ImageChange {
    Keep,
    Clear,
    Set(ImageRef),

    /// A stored path echoed back by the client; only the product's own image is accepted.
    Echo(StoredImagePath),
}

/// Fully validated column values for an insert or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProductWrite {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub image: Option<ImageRef>,
}

impl ProductWrite {
    pub(crate) fn image_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(ImageRef::external_url)
    }

    pub(crate) fn image_path(&self) -> Option<&str> {
        self.image
            .as_ref()
            .and_then(ImageRef::stored_path)
            .map(|path| path.as_str())
    }
}

/// Validated partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidProductUpdate {
    name: Option<String>,
    description: Option<Option<String>>,
    price: Option<Decimal>,
    category: Option<String>,
    pub image: ImageChange,
}

impl ValidProductUpdate {
    /// Overlay the update on the current record.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::Validation`] when the update names a
    /// stored image other than the product's current one.
    pub(crate) fn apply_to(
        self,
        current: &ProductRecord,
    ) -> Result<ProductWrite, ProductsServiceError> {
        let image = match self.image {
            ImageChange::Keep => current.image.clone(),
            ImageChange::Clear => None,
            ImageChange::Set(image) => Some(image),
            ImageChange::Echo(path) if current.stored_image() == Some(&path) => {
                current.image.clone()
            }
            ImageChange::Echo(_) => return Err(foreign_image()),
        };

        Ok(ProductWrite {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            price: self.price.unwrap_or(current.price),
            category: self.category.unwrap_or_else(|| current.category.clone()),
            image,
        })
    }
}

impl NewProduct {
    pub(crate) fn validate(self) -> Result<ProductWrite, ProductsServiceError> {
        Ok(ProductWrite {
            name: required_text("name", &self.name)?,
            description: optional_text(self.description.as_deref()),
            price: valid_price(self.price)?,
            category: required_text("category", &self.category)?,
            image: match external_image(self.image_url.as_deref())? {
                ImageChange::Set(image) => Some(image),
                ImageChange::Keep | ImageChange::Clear => None,
                ImageChange::Echo(_) => return Err(foreign_image()),
            },
        })
    }
}

impl ProductUpdate {
    pub(crate) fn validate(self) -> Result<ValidProductUpdate, ProductsServiceError> {
        Ok(ValidProductUpdate {
            name: self
                .name
                .map(|name| required_text("name", &name))
                .transpose()?,
            description: self
                .description
                .map(|description| optional_text(Some(&description))),
            price: self.price.map(valid_price).transpose()?,
            category: self
                .category
                .map(|category| required_text("category", &category))
                .transpose()?,
            image: match self.image_url {
                None => ImageChange::Keep,
                Some(url) => external_image(Some(&url))?,
            },
        })
    }
}

fn required_text(field: &str, value: &str) -> Result<String, ProductsServiceError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ProductsServiceError::validation(format!("{field} is required")));
    }

    Ok(value.to_owned())
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn valid_price(price: Decimal) -> Result<Decimal, ProductsServiceError> {
    let price = price.round_dp(2);

    if price <= Decimal::ZERO {
        return Err(ProductsServiceError::validation("price must be positive"));
    }

    if price > MAX_PRICE {
        return Err(ProductsServiceError::validation("price is too large"));
    }

    Ok(price)
}

/// Empty clears the image; a stored path is checked later against the record;
/// anything else must be an absolute http(s) URL.
fn external_image(url: Option<&str>) -> Result<ImageChange, ProductsServiceError> {
    match url.map(str::trim) {
        None | Some("") => Ok(ImageChange::Clear),
        Some(url) if url.starts_with(STORED_IMAGE_PREFIX) => StoredImagePath::parse(url)
            .map(ImageChange::Echo)
            .map_err(|_invalid| foreign_image()),
        Some(url) => ImageRef::external(url)
            .map(ImageChange::Set)
            .ok_or_else(|| ProductsServiceError::validation("image_url must be an http(s) URL")),
    }
}

fn foreign_image() -> ProductsServiceError {
    ProductsServiceError::validation(
        "image_url must be an http(s) URL or the product's current image",
    )
}
