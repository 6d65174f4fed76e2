use serde::{Deserialize, Serialize};

/// Role carried in identity claims.
///
/// The storefront only distinguishes shoppers from operators; anything the
/// admin may do is a superset of what a customer may do.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Whether this role grants at least the privileges of `required`.
    pub fn satisfies(&self, required: Role) -> bool {
        match required {
            Role::Customer => true,
            Role::Admin => self.is_admin(),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
