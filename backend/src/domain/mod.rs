//! Domain types, ports, and role-gated services.
//!
//! Everything behind the menu lives here: the entities and their label
//! enums, the shared error taxonomy, the hexagon's ports (each paired with
//! an in-memory implementation), the authentication and session shell, and
//! one service per screen under [`modules`].

pub mod audit;
pub mod audit_trail;
pub mod auth;
pub mod crm;
pub mod error;
pub mod finance;
pub mod inventory;
pub mod labels;
pub mod machinery;
pub mod menu;
pub mod modules;
pub mod org;
pub mod planning;
pub mod ports;
pub mod procurement;
pub mod production;
pub mod project;
pub mod session;
pub mod settings;
pub mod site_ops;
pub mod software;
pub mod user;
pub mod workforce;
pub mod workspace;
