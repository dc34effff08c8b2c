use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field bounds enforced before a book is persisted.
pub struct BookLimits;

impl BookLimits {
    pub const NAME_MIN_CHARS: usize = 5;
    pub const NAME_MAX_CHARS: usize = 100;
    pub const PRICE_MIN: f64 = 1.0;
    pub const PRICE_MAX: f64 = 1000.0;
    pub const STOCK_MIN: i64 = 1;
    pub const STOCK_MAX: i64 = 200;
}

/// A stored book as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// ObjectId as 24 hex characters
    pub id: String,
    pub book_name: String,
    pub price: f64,
    pub count_in_stock: i64,
    /// Cover URL; empty when none was given
    pub image: String,
    pub date_created: DateTime<Utc>,
}

/// Validated fields for a new book.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub book_name: String,
    pub price: f64,
    pub count_in_stock: i64,
    pub image: String,
}

/// Validated partial update; `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPatch {
    pub book_name: Option<String>,
    pub price: Option<f64>,
    pub count_in_stock: Option<i64>,
    pub image: Option<String>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.book_name.is_none()
            && self.price.is_none()
            && self.count_in_stock.is_none()
            && self.image.is_none()
    }

    /// Replace the fields present in the patch. `id` and `date_created` never change.
    pub fn apply(&self, book: &mut Book) {
        if let Some(book_name) = &self.book_name {
            book.book_name = book_name.clone();
        }
        if let Some(price) = self.price {
            book.price = price;
        }
        if let Some(count_in_stock) = self.count_in_stock {
            book.count_in_stock = count_in_stock;
        }
        if let Some(image) = &self.image {
            book.image = image.clone();
        }
    }
}

/// Body of the update and delete confirmations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Book {
        Book {
            id: "65f1c2a9e4b0a1b2c3d4e5f6".to_string(),
            book_name: "The Rust Book".to_string(),
            price: 39.5,
            count_in_stock: 12,
            image: String::new(),
            date_created: DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn book_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["bookName"], json!("The Rust Book"));
        assert_eq!(value["countInStock"], json!(12));
        assert_eq!(value["id"], json!("65f1c2a9e4b0a1b2c3d4e5f6"));
        assert_eq!(value["dateCreated"], json!("2024-03-01T10:00:00Z"));
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut book = sample();
        let before = book.clone();
        BookPatch {
            price: Some(12.0),
            ..BookPatch::default()
        }
        .apply(&mut book);

        assert_eq!(book.price, 12.0);
        assert_eq!(book.book_name, before.book_name);
        assert_eq!(book.count_in_stock, before.count_in_stock);
        assert_eq!(book.date_created, before.date_created);
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(BookPatch::default().is_empty());
        assert!(!BookPatch {
            image: Some(String::new()),
            ..BookPatch::default()
        }
        .is_empty());
    }
}
