//! Application context shared by every page view.
//!
//! DESIGN
//! ======
//! `AppContext` owns the stores and the API handle, and each page receives
//! it by reference. Clone is cheap; every field is a shared handle.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::net::{ApiClient, ApiResult, FoodApi};
use crate::state::{CartStore, FileTokenStorage, SessionStore};

#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<dyn FoodApi>,
    pub session: SessionStore,
    pub cart: CartStore,
    /// Cosmetic pause applied by pages before results land.
    pub ui_delay: Duration,
}

impl AppContext {
    #[must_use]
    pub fn new(api: Arc<dyn FoodApi>, session: SessionStore, cart: CartStore) -> Self {
        Self { api, session, cart, ui_delay: Duration::ZERO }
    }

    /// Wire the HTTP client and the file-backed session from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        let api = ApiClient::from_config(config)?;
        let session = SessionStore::restore(Arc::new(FileTokenStorage::new(&config.token_file)));
        let mut ctx = Self::new(Arc::new(api), session, CartStore::new());
        ctx.ui_delay = config.ui_delay;
        Ok(ctx)
    }

    /// Sleep for the configured cosmetic delay, if any.
    pub(crate) async fn cosmetic_pause(&self) {
        if !self.ui_delay.is_zero() {
            tokio::time::sleep(self.ui_delay).await;
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("session", &self.session)
            .field("cart", &self.cart)
            .field("ui_delay", &self.ui_delay)
            .finish_non_exhaustive()
    }
}
