use crate::{AuthError, Role};

/// Pure role check behind the authorization gate.
///
/// `None` means no identity was established for the request; it is refused
/// like any other insufficient role.
pub fn require_role(actual: Option<Role>, required: Role) -> Result<(), AuthError> {
    match actual {
        Some(role) if role.satisfies(required) => Ok(()),
        _ => Err(AuthError::InsufficientRole),
    }
}
