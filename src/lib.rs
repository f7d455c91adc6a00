pub mod api;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod extract;
pub mod polyline;
pub mod render;
pub mod server;
