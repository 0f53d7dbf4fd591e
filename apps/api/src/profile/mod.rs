// Static résumé data: types, loading and the read-only JSON endpoint.

pub mod handlers;
pub mod models;
pub mod store;

pub use store::{ProfileError, ProfileStore};
