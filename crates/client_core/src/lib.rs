pub mod config;
pub mod error;
pub mod memory_store;
pub mod repository;
pub mod rest_store;
pub mod store;

pub use config::{build_store, load_settings, StoreBackend, StoreSettings};
pub use error::{StoreError, StoreResult};
pub use memory_store::MemoryCollectionStore;
pub use repository::{ResolutionRepository, RESOLUTIONS_TABLE};
pub use rest_store::RestCollectionStore;
pub use store::{CollectionStore, Direction, Filter, OrderBy, SelectQuery};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/repository_tests.rs"]
mod repository_tests;
