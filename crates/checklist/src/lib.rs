#![doc = include_str!("../README.md")]

pub mod order;
mod types;

pub use types::{Credentials, TodoItem, TodoList};
