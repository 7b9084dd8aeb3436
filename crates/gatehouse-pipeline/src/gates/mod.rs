//! Built-in login gates.
//!
//! The canonical login pipeline runs these gates in this order:
//!
//! 1. [`user_exists`] - Reject unknown identities
//! 2. [`password_match`] - Reject wrong secrets (requires `user_exists`)
//! 3. [`role_route`] - Choose the landing route and end evaluation

pub mod password_match;
pub mod role_route;
pub mod user_exists;

// Re-export main types
pub use password_match::PasswordMatchGate;
pub use role_route::RoleRouteGate;
pub use user_exists::UserExistsGate;
