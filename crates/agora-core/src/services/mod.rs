//! Application services - the use cases exposed to the API layer.

mod auth;
mod guard;
mod post;

pub use auth::{AuthPayload, AuthService};
pub use guard::{Identity, RequestContext, authenticate};
pub use post::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PostService};
