use devworkspace_client::ClientFactory;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub clients: Arc<dyn ClientFactory>,
    pub routing_class: Arc<str>,
}

impl AppState {
    pub fn new(clients: Arc<dyn ClientFactory>, routing_class: &str) -> Self {
        Self {
            clients,
            routing_class: Arc::from(routing_class),
        }
    }
}
