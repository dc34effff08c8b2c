//! MongoDB-backed [`BookStore`].

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, DateTime, Document};
use futures::TryStreamExt;
use mongodb::{options::ReturnDocument, Collection};
use serde::{Deserialize, Serialize};
use shelf_db::{Database, DbResult};

use super::models::{Book, BookPatch, NewBook};
use super::store::BookStore;

pub const COLLECTION: &str = "books";

/// Stored shape of a book; `_id` is the ObjectId, `dateCreated` a BSON date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub book_name: String,
    pub price: f64,
    pub count_in_stock: i64,
    #[serde(default)]
    pub image: String,
    pub date_created: DateTime,
}

impl BookDocument {
    pub fn from_new(book: NewBook) -> Self {
        Self {
            id: ObjectId::new(),
            book_name: book.book_name,
            price: book.price,
            count_in_stock: book.count_in_stock,
            image: book.image,
            date_created: DateTime::now(),
        }
    }
}

impl From<BookDocument> for Book {
    fn from(document: BookDocument) -> Self {
        Book {
            id: document.id.to_hex(),
            book_name: document.book_name,
            price: document.price,
            count_in_stock: document.count_in_stock,
            image: document.image,
            date_created: document.date_created.to_chrono(),
        }
    }
}

/// `$set` document holding only the fields present in the patch
pub fn set_document(patch: &BookPatch) -> Document {
    let mut set = Document::new();
    if let Some(book_name) = &patch.book_name {
        set.insert("bookName", book_name.clone());
    }
    if let Some(price) = patch.price {
        set.insert("price", price);
    }
    if let Some(count_in_stock) = patch.count_in_stock {
        set.insert("countInStock", count_in_stock);
    }
    if let Some(image) = &patch.image {
        set.insert("image", image.clone());
    }
    set
}

pub struct MongoBookStore {
    collection: Collection<BookDocument>,
}

impl MongoBookStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn create(&self, book: NewBook) -> DbResult<Book> {
        let document = BookDocument::from_new(book);
        self.collection.insert_one(&document).await?;
        Ok(document.into())
    }

    async fn list(&self) -> DbResult<Vec<Book>> {
        let documents: Vec<BookDocument> = self.collection.find(doc! {}).await?.try_collect().await?;
        Ok(documents.into_iter().map(Book::from).collect())
    }

    async fn get(&self, id: &ObjectId) -> DbResult<Option<Book>> {
        Ok(self
            .collection
            .find_one(doc! { "_id": *id })
            .await?
            .map(Book::from))
    }

    async fn update(&self, id: &ObjectId, patch: BookPatch) -> DbResult<Option<Book>> {
        // `$set` must not be empty; a no-op update is a lookup
        if patch.is_empty() {
            return self.get(id).await;
        }

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": set_document(&patch) })
            .return_document(ReturnDocument::After)
            .await?
            .map(Book::from))
    }

    async fn delete(&self, id: &ObjectId) -> DbResult<Option<Book>> {
        Ok(self
            .collection
            .find_one_and_delete(doc! { "_id": *id })
            .await?
            .map(Book::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_document_contains_only_present_fields() {
        let patch = BookPatch {
            price: Some(15.5),
            image: Some(String::new()),
            ..BookPatch::default()
        };
        let set = set_document(&patch);

        assert_eq!(set.len(), 2);
        assert_eq!(set.get_f64("price").unwrap(), 15.5);
        assert_eq!(set.get_str("image").unwrap(), "");
        assert!(!set.contains_key("bookName"));
    }

    #[test]
    fn document_converts_to_api_book() {
        let document = BookDocument::from_new(NewBook {
            book_name: "Zero To Production".to_string(),
            price: 30.0,
            count_in_stock: 4,
            image: "https://example.com/z2p.png".to_string(),
        });
        let id = document.id;
        let created = document.date_created;

        let book = Book::from(document);
        assert_eq!(book.id, id.to_hex());
        assert_eq!(book.id.len(), 24);
        assert_eq!(book.date_created.timestamp_millis(), created.timestamp_millis());
    }
}
