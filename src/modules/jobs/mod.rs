//! Job records and their lifecycle.
//!
//! ```text
//!            soft delete              hard delete
//! Active ───────────────▶ Trashed ───────────────▶ (gone)
//!    ▲                       │
//!    └────── restore ────────┘
//! ```
//!
//! | Caller | `?alumni_id=` | Scope |
//! |---|---|---|
//! | admin | given | every job of that alumni |
//! | admin | absent | the one job named in the path, any owner |
//! | user | ignored | the one job named in the path, only if it belongs to the caller's alumni |
//!
//! A transition that changes no record answers 404.

pub mod controller;
pub mod router;
pub mod service;
