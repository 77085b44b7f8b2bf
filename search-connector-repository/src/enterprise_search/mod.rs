//! Enterprise Search (App Search) implementation of the backend interfaces.

mod endpoints;
mod provider;

pub use endpoints::Endpoints;
pub use provider::EnterpriseSearchProvider;
