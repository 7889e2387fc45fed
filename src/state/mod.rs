//! Shared client-side state.
//!
//! DESIGN
//! ======
//! Only the stores here outlive a single page view. Each store is a
//! cheap-clone handle; pages receive clones through
//! [`crate::app::AppContext`] rather than reaching for globals.

pub mod cart;
pub mod session;
pub mod storage;

pub use cart::{CartItem, CartStore};
pub use session::SessionStore;
pub use storage::{FileTokenStorage, MemoryTokenStorage, StorageError, TokenStorage};
