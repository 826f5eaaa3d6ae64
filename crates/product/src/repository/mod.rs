mod command;
mod memory;
mod query;

pub use self::command::ProductCommandRepository;
pub use self::memory::InMemoryProductRepository;
pub use self::query::ProductQueryRepository;

use crate::abstract_trait::product::repository::{
    DynProductCommandRepository, DynProductQueryRepository,
};
use shared::config::ConnectionPool;
use std::sync::Arc;

/// Both halves of the product store, bound to one backend.
#[derive(Clone)]
pub struct ProductRepository {
    pub query: DynProductQueryRepository,
    pub command: DynProductCommandRepository,
}

impl ProductRepository {
    pub fn postgres(pool: ConnectionPool) -> Self {
        let query =
            Arc::new(ProductQueryRepository::new(pool.clone())) as DynProductQueryRepository;

        let command =
            Arc::new(ProductCommandRepository::new(pool)) as DynProductCommandRepository;

        Self { query, command }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryProductRepository::new());

        Self {
            query: store.clone() as DynProductQueryRepository,
            command: store as DynProductCommandRepository,
        }
    }
}
