//! Route handlers, one module per area of the backend.

pub(crate) mod accounts;
pub(crate) mod arena;
pub(crate) mod config;
pub(crate) mod crypto;
pub(crate) mod decisions;
pub(crate) mod users;
