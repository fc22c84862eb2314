pub mod api;
pub mod client;

pub use api::{build_request, method_for, parse_rows};
pub use client::KodiJsonRpc;
