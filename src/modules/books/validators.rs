//! Validation chains for the book routes and the request shapes they guard.

use bson::oid::ObjectId;
use once_cell::sync::Lazy;
use serde_json::Value;
use shelf_http::error::AppError;

use super::models::{BookLimits, BookPatch, NewBook};
use crate::extract::FromInput;
use crate::validation::{rules, FieldChain, Input, Validator};

pub const NAME_REQUIRED: &str = "Book name is required";
pub const NAME_LENGTH: &str =
    "Book name must be at least 5 characters long and at most 100 characters long";
pub const PRICE_REQUIRED: &str = "Price is required";
pub const PRICE_RANGE: &str = "Price must be between 1$ and 1000$";
pub const STOCK_REQUIRED: &str = "Count in stock is required";
pub const STOCK_RANGE: &str = "Count in stock must be between 1 and 200";
pub const IMAGE_URL: &str = "Image must be a valid URL";
pub const ID_FORMAT: &str = "Book ID must be a valid ObjectId";

fn id_chain() -> FieldChain {
    FieldChain::param("id").object_id(ID_FORMAT)
}

/// `image` is optional on both paths; when present it must be empty or an http(s) URL.
fn image_chain() -> FieldChain {
    FieldChain::body("image").optional().empty_or_http_url(IMAGE_URL)
}

pub static CREATE_BOOK: Lazy<Validator> = Lazy::new(|| {
    Validator::new(vec![
        FieldChain::body("bookName")
            .not_empty(NAME_REQUIRED)
            .length(BookLimits::NAME_MIN_CHARS, BookLimits::NAME_MAX_CHARS, NAME_LENGTH),
        FieldChain::body("price")
            .not_empty(PRICE_REQUIRED)
            .float(BookLimits::PRICE_MIN, BookLimits::PRICE_MAX, PRICE_RANGE),
        FieldChain::body("countInStock")
            .not_empty(STOCK_REQUIRED)
            .int(BookLimits::STOCK_MIN, BookLimits::STOCK_MAX, STOCK_RANGE),
        image_chain(),
    ])
});

pub static UPDATE_BOOK: Lazy<Validator> = Lazy::new(|| {
    Validator::new(vec![
        id_chain(),
        FieldChain::body("bookName")
            .optional()
            .length(BookLimits::NAME_MIN_CHARS, BookLimits::NAME_MAX_CHARS, NAME_LENGTH),
        FieldChain::body("price")
            .optional()
            .float(BookLimits::PRICE_MIN, BookLimits::PRICE_MAX, PRICE_RANGE),
        FieldChain::body("countInStock")
            .optional()
            .int(BookLimits::STOCK_MIN, BookLimits::STOCK_MAX, STOCK_RANGE),
        image_chain(),
    ])
});

pub static BOOK_ID: Lazy<Validator> = Lazy::new(|| Validator::new(vec![id_chain()]));

fn parse_id(input: &Input) -> Result<ObjectId, AppError> {
    let raw = input.param("id").and_then(Value::as_str).unwrap_or_default();
    ObjectId::parse_str(raw).map_err(|e| AppError::bad_request(e.to_string()))
}

fn text_field(input: &Input, field: &str) -> Option<String> {
    input.body(field).and_then(rules::text)
}

fn float_field(input: &Input, field: &str) -> Option<f64> {
    input.body(field).and_then(rules::as_float)
}

fn int_field(input: &Input, field: &str) -> Option<i64> {
    input.body(field).and_then(rules::as_int)
}

fn missing(field: &str) -> AppError {
    AppError::bad_request(format!("{} is missing after validation", field))
}

/// `POST /books`
#[derive(Debug)]
pub struct CreateBook(pub NewBook);

impl FromInput for CreateBook {
    const BODY: bool = true;

    fn validator() -> &'static Validator {
        &CREATE_BOOK
    }

    fn from_input(input: &Input) -> Result<Self, AppError> {
        Ok(CreateBook(NewBook {
            book_name: text_field(input, "bookName").ok_or_else(|| missing("bookName"))?,
            price: float_field(input, "price").ok_or_else(|| missing("price"))?,
            count_in_stock: int_field(input, "countInStock")
                .ok_or_else(|| missing("countInStock"))?,
            image: text_field(input, "image").unwrap_or_default(),
        }))
    }
}

/// `PUT /books/{id}`
#[derive(Debug)]
pub struct UpdateBook {
    pub id: ObjectId,
    pub patch: BookPatch,
}

impl FromInput for UpdateBook {
    const PARAMS: bool = true;
    const BODY: bool = true;

    fn validator() -> &'static Validator {
        &UPDATE_BOOK
    }

    fn from_input(input: &Input) -> Result<Self, AppError> {
        Ok(UpdateBook {
            id: parse_id(input)?,
            patch: BookPatch {
                book_name: text_field(input, "bookName"),
                price: float_field(input, "price"),
                count_in_stock: int_field(input, "countInStock"),
                image: text_field(input, "image"),
            },
        })
    }
}

/// `GET` and `DELETE /books/{id}`
#[derive(Debug)]
pub struct BookId(pub ObjectId);

impl FromInput for BookId {
    const PARAMS: bool = true;

    fn validator() -> &'static Validator {
        &BOOK_ID
    }

    fn from_input(input: &Input) -> Result<Self, AppError> {
        parse_id(input).map(BookId)
    }
}
