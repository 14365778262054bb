//! Domain entities - the core business objects.

mod comment;
mod like;
mod post;
mod user;

pub use comment::Comment;
pub use like::Like;
pub use post::{Post, PostDetail};
pub use user::User;

use crate::error::DomainError;

/// Reject text that is empty once surrounding whitespace is removed.
pub fn require_text(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidArgument(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert!(require_text("hello", "body").is_ok());
        assert!(require_text("  x ", "body").is_ok());

        let err = require_text(" \t\n", "body").unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(ref msg) if msg.contains("body")));
    }
}
