use crate::{di::DependenciesInject, repository::ProductRepository};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .finish()
    }
}

impl AppState {
    pub fn new(repository: ProductRepository) -> Self {
        let mut registry = Registry::default();

        let di_container = DependenciesInject::new(repository, &mut registry);

        Self {
            di_container,
            registry: Arc::new(Mutex::new(registry)),
        }
    }
}
