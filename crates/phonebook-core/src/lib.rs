//! Core types and trait definitions for the phonebook.
//!
//! This crate is deliberately free of database dependencies; beyond serde and
//! thiserror it only needs tokio's `watch` channel, which backs
//! [`feed::Feed`]. The storage backend (`phonebook-store-sqlite`) and the
//! repository (`phonebook-repository`) both depend on it.

pub mod color_tag;
pub mod contact;
pub mod error;
pub mod feed;
pub mod mapper;
pub mod seed;
pub mod store;

pub use error::{Error, Result};
