use serde::{Deserialize, Serialize};

use storefront_auth::{Role, UserRecord};
use storefront_core::UserId;
use storefront_infra::OrderLine;

// -------------------------
// Request DTOs
// -------------------------

/// Sign-in form (`application/x-www-form-urlencoded`).
#[derive(Debug, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Registration form (`application/x-www-form-urlencoded`).
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderLine>,
}

// -------------------------
// Response DTOs
// -------------------------

/// Public view of a user; the password hash never leaves the store.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&UserRecord> for UserView {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateUserResponse {
    pub message: &'static str,
    pub changed_fields: UserView,
}

impl UpdateUserResponse {
    pub fn new(user: &UserRecord, password_changed: bool) -> Self {
        let message = if password_changed {
            "Password changed successfully"
        } else {
            "No password change"
        };
        Self {
            message,
            changed_fields: UserView::from(user),
        }
    }
}
