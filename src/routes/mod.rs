//! HTTP routing.
//!
//! ## Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs         - Module exports
//! ├── router.rs      - Router assembly (layers, static files, fallback)
//! └── api_routes.rs  - /api route table, public and protected groups
//! ```

pub mod api_routes;
pub mod router;

pub use router::create_router;
