use std::sync::Arc;

use crate::api::StorefrontApi;
use crate::dispatch::Dispatcher;
use crate::shell::Shell;
use crate::store::Store;

/// Everything a page needs, passed explicitly at mount.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub store: Store,
    pub dispatcher: Dispatcher,
    pub shell: Shell,
}

impl AppContext {
    pub fn new(api: Arc<dyn StorefrontApi>, shell: Shell) -> Self {
        let store = Store::new();
        Self {
            dispatcher: Dispatcher::new(store.clone(), api),
            store,
            shell,
        }
    }
}
