use serde::Serialize;

use crate::services::authorization_service::Role;

#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub name: &'static str,
    pub permissions: Vec<&'static str>,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            name: role.as_str(),
            permissions: role.permissions().to_vec(),
        }
    }
}
