pub mod books;

use std::sync::Arc;

use shelf_db::Database;
use shelf_kernel::ModuleRegistry;

/// Register all project-specific modules backed by MongoDB
pub fn register_all(registry: &mut ModuleRegistry, database: &Database) {
    registry.register_custom(books::create_module(Arc::new(books::MongoBookStore::new(
        database,
    ))));
}

/// Register all project-specific modules over in-memory stores
pub fn register_in_memory(registry: &mut ModuleRegistry) {
    registry.register_custom(books::create_module(Arc::new(books::MemoryBookStore::new())));
}
