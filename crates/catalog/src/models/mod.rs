//! Domain models persisted by the store.

pub mod account;
pub mod favorite;

pub use account::Account;
pub use favorite::Favorite;
