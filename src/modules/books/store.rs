//! Persistence seam for books.
//!
//! Handlers only see [`BookStore`]; production wires [`super::mongo::MongoBookStore`],
//! tests and offline tooling use [`MemoryBookStore`].

use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use shelf_db::DbResult;
use tokio::sync::RwLock;

use super::models::{Book, BookPatch, NewBook};

/// One store call per operation; no batching, no transactions.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a book, assigning its id and creation time.
    async fn create(&self, book: NewBook) -> DbResult<Book>;

    /// Every stored book.
    async fn list(&self) -> DbResult<Vec<Book>>;

    async fn get(&self, id: &ObjectId) -> DbResult<Option<Book>>;

    /// Apply `patch` and return the updated book, or `None` when the id is unknown.
    async fn update(&self, id: &ObjectId, patch: BookPatch) -> DbResult<Option<Book>>;

    /// Remove and return the book, or `None` when the id is unknown.
    async fn delete(&self, id: &ObjectId) -> DbResult<Option<Book>>;
}

pub type SharedBookStore = Arc<dyn BookStore>;

/// In-process store keeping books in insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryBookStore {
    books: Arc<RwLock<Vec<Book>>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn create(&self, book: NewBook) -> DbResult<Book> {
        let book = Book {
            id: ObjectId::new().to_hex(),
            book_name: book.book_name,
            price: book.price,
            count_in_stock: book.count_in_stock,
            image: book.image,
            date_created: Utc::now(),
        };
        self.books.write().await.push(book.clone());
        Ok(book)
    }

    async fn list(&self) -> DbResult<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn get(&self, id: &ObjectId) -> DbResult<Option<Book>> {
        let id = id.to_hex();
        Ok(self
            .books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned())
    }

    async fn update(&self, id: &ObjectId, patch: BookPatch) -> DbResult<Option<Book>> {
        let id = id.to_hex();
        let mut books = self.books.write().await;
        Ok(books.iter_mut().find(|book| book.id == id).map(|book| {
            patch.apply(book);
            book.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> DbResult<Option<Book>> {
        let id = id.to_hex();
        let mut books = self.books.write().await;
        Ok(books
            .iter()
            .position(|book| book.id == id)
            .map(|index| books.remove(index)))
    }
}
