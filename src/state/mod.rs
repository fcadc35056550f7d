//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` holds the pure login/onboarding state machine; `gate` binds it to
//! durable storage and is what components reach through context.

pub mod gate;
pub mod session;
