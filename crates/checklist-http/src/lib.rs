#![doc = include_str!("../README.md")]

pub mod client;
pub mod session;

pub use client::HttpBackend;
pub use session::FileSessionStore;
