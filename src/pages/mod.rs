//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Public pages (`landing`, `legal`, `login`, `onboarding`) render for every
//! visitor. The remaining pages sit behind the protected shell in `app`.

pub mod community;
pub mod home;
pub mod landing;
pub mod legal;
pub mod login;
pub mod me;
pub mod onboarding;
pub mod reflect;
