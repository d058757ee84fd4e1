//! Catálogo de roles y permisos
//!
//! Los permisos son nombres fijos ("view users", "edit vehicles", ...) y
//! cada rol concede un subconjunto. Las asignaciones usuario → rol viven en
//! el [`RoleStore`](crate::repositories::role_repository::RoleStore); aquí
//! sólo se decide qué concede cada rol.

use serde::Serialize;

use crate::models::UserType;
use crate::utils::errors::{forbidden_error, AppResult};

/// Nombres de permiso
pub mod permissions {
    pub const VIEW_USERS: &str = "view users";
    pub const CREATE_USERS: &str = "create users";
    pub const EDIT_USERS: &str = "edit users";
    pub const DELETE_USERS: &str = "delete users";

    pub const VIEW_DRIVERS: &str = "view drivers";
    pub const EDIT_DRIVERS: &str = "edit drivers";
    pub const DELETE_DRIVERS: &str = "delete drivers";

    pub const VIEW_PRODUCTS: &str = "view products";
    pub const CREATE_PRODUCTS: &str = "create products";
    pub const EDIT_PRODUCTS: &str = "edit products";
    pub const DELETE_PRODUCTS: &str = "delete products";
    pub const EXPORT_PRODUCTS: &str = "export products";

    pub const VIEW_VEHICLES: &str = "view vehicles";
    pub const CREATE_VEHICLES: &str = "create vehicles";
    pub const EDIT_VEHICLES: &str = "edit vehicles";
    pub const DELETE_VEHICLES: &str = "delete vehicles";

    pub const VIEW_ROLES: &str = "view roles";
    pub const CREATE_ROLES: &str = "create roles";
    pub const EDIT_ROLES: &str = "edit roles";
    pub const DELETE_ROLES: &str = "delete roles";

    pub const VIEW_PERMISSIONS: &str = "view permissions";
    pub const CREATE_PERMISSIONS: &str = "create permissions";
    pub const EDIT_PERMISSIONS: &str = "edit permissions";
    pub const DELETE_PERMISSIONS: &str = "delete permissions";

    pub const VIEW_DASHBOARD: &str = "view dashboard";

    pub const ACCESS_DRIVER_PORTAL: &str = "access driver portal";
    pub const VIEW_DRIVER_ROUTES: &str = "view driver routes";
    pub const VIEW_DRIVER_VEHICLE: &str = "view driver vehicle";
    pub const VIEW_DRIVER_TRACKING: &str = "view driver tracking";
    pub const VIEW_DRIVER_SCHEDULE: &str = "view driver schedule";

    pub const ALL: &[&str] = &[
        VIEW_USERS,
        CREATE_USERS,
        EDIT_USERS,
        DELETE_USERS,
        VIEW_DRIVERS,
        EDIT_DRIVERS,
        DELETE_DRIVERS,
        VIEW_PRODUCTS,
        CREATE_PRODUCTS,
        EDIT_PRODUCTS,
        DELETE_PRODUCTS,
        EXPORT_PRODUCTS,
        VIEW_VEHICLES,
        CREATE_VEHICLES,
        EDIT_VEHICLES,
        DELETE_VEHICLES,
        VIEW_ROLES,
        CREATE_ROLES,
        EDIT_ROLES,
        DELETE_ROLES,
        VIEW_PERMISSIONS,
        CREATE_PERMISSIONS,
        EDIT_PERMISSIONS,
        DELETE_PERMISSIONS,
        VIEW_DASHBOARD,
        ACCESS_DRIVER_PORTAL,
        VIEW_DRIVER_ROUTES,
        VIEW_DRIVER_VEHICLE,
        VIEW_DRIVER_TRACKING,
        VIEW_DRIVER_SCHEDULE,
    ];
}

use permissions::*;

const ADMIN_GRANTS: &[&str] = &[
    VIEW_DASHBOARD,
    VIEW_USERS,
    CREATE_USERS,
    EDIT_USERS,
    DELETE_USERS,
    VIEW_DRIVERS,
    EDIT_DRIVERS,
    DELETE_DRIVERS,
    VIEW_PRODUCTS,
    CREATE_PRODUCTS,
    EDIT_PRODUCTS,
    DELETE_PRODUCTS,
    EXPORT_PRODUCTS,
    VIEW_VEHICLES,
    CREATE_VEHICLES,
    EDIT_VEHICLES,
    DELETE_VEHICLES,
    VIEW_ROLES,
    VIEW_PERMISSIONS,
];

const MANAGER_GRANTS: &[&str] = &[
    VIEW_DASHBOARD,
    VIEW_USERS,
    EDIT_USERS,
    VIEW_DRIVERS,
    EDIT_DRIVERS,
    VIEW_PRODUCTS,
    CREATE_PRODUCTS,
    EDIT_PRODUCTS,
    EXPORT_PRODUCTS,
    VIEW_VEHICLES,
    CREATE_VEHICLES,
    EDIT_VEHICLES,
];

const DRIVER_GRANTS: &[&str] = &[
    VIEW_DASHBOARD,
    ACCESS_DRIVER_PORTAL,
    VIEW_DRIVER_ROUTES,
    VIEW_DRIVER_VEHICLE,
    VIEW_DRIVER_TRACKING,
    VIEW_DRIVER_SCHEDULE,
];

const EMPLOYEE_GRANTS: &[&str] = &[VIEW_DASHBOARD, VIEW_PRODUCTS, VIEW_VEHICLES];

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Manager,
    Driver,
    Employee,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Manager,
        Role::Driver,
        Role::Employee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super-admin",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Driver => "driver",
            Role::Employee => "employee",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "super-admin" => Some(Role::SuperAdmin),
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "driver" => Some(Role::Driver),
            "employee" => Some(Role::Employee),
            _ => None,
        }
    }

    /// Permisos que concede el rol
    pub fn permissions(&self) -> &'static [&'static str] {
        match self {
            Role::SuperAdmin => permissions::ALL,
            Role::Admin => ADMIN_GRANTS,
            Role::Manager => MANAGER_GRANTS,
            Role::Driver => DRIVER_GRANTS,
            Role::Employee => EMPLOYEE_GRANTS,
        }
    }

    pub fn grants(&self, permission: &str) -> bool {
        self.permissions().contains(&permission)
    }
}

/// Rol que corresponde a un tipo de usuario
pub fn role_for_user_type(user_type: UserType) -> Role {
    match user_type {
        UserType::Admin => Role::Admin,
        UserType::Driver => Role::Driver,
        UserType::Manager => Role::Manager,
        UserType::Employee => Role::Employee,
    }
}

/// Verifica si algún rol concede el permiso
pub fn has_permission(roles: &[Role], permission: &str) -> bool {
    roles.iter().any(|role| role.grants(permission))
}

/// Exigir un permiso; 403 si ningún rol lo concede
pub fn authorize(user_id: i64, roles: &[Role], permission: &str) -> AppResult<()> {
    if has_permission(roles, permission) {
        Ok(())
    } else {
        tracing::warn!("🚫 User {} lacks permission '{}'", user_id, permission);
        Err(forbidden_error(permission, "missing permission"))
    }
}
