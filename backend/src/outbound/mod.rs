//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern: concrete
//! implementations of domain port traits live here, one submodule per
//! infrastructure concern. Adapters are thin translators that convert
//! between domain types and infrastructure-specific representations. They
//! contain no business logic.

pub mod persistence;
