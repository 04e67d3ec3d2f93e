//! HTTP handlers.
//!
//! One generic set of CRUD handlers serves every collection:
//! - GET /api/{collection} - List records with their count
//! - GET /api/{collection}/:id - Get one record
//! - POST /api/{collection} - Create a record (201)
//! - PUT /api/{collection}/:id - Partially update a record
//! - DELETE /api/{collection}/:id - Delete a record and return it

pub mod collections;
pub mod welcome;

pub use collections::{create, delete, get, list, update};
pub use welcome::welcome;
