//! Domain logic
//!
//! This module contains domain-specific business logic:
//! - Entities fetched from the remote API
//! - Deduplicating entity collections
//! - Page request/response model
//! - Load-more trigger policies
//! - Rich-text document processing for the composer

pub mod collections;
pub mod entity;
pub mod page;
pub mod richtext;
pub mod trigger;
