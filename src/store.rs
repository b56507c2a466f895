// Key-value persistence for the saved product slot

use crate::error::StorageError;

pub mod file;
pub mod memory;
pub mod slot;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use slot::{has_saved_product, load_product, save_product, SAVED_PRODUCT_KEY};

/// Minimal string key-value storage, in the spirit of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
