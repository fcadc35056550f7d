//! Networking modules for the hosted auth provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` defines the provider seam and sign-in errors, `events` the
//! cancellable event source, `supabase` the concrete provider, and `types`
//! the shared wire schema.

pub mod auth;
pub mod events;
pub mod supabase;
pub mod types;
