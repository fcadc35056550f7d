//! Reusable UI components shared by the protected pages.

pub mod bottom_nav;
pub mod navigation;
