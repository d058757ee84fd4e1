//! DTOs de usuarios
//!
//! Alta y edición comparten reglas; en la edición la contraseña es
//! opcional. Cuando `user_type = driver` se exigen además los datos de
//! conductor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dto::{blank_to_none, merge_errors, require, Labeled};
use crate::listing::{Page, QueryParams};
use crate::models::{BloodGroup, NewUser, User, UserChanges, UserStatus, UserType};
use crate::utils::validation::{validate_enum, validate_not_blank, PHONE_REGEX};

fn validate_user_type(value: &str) -> Result<(), ValidationError> {
    validate_enum(value, &UserType::ALL)
}

fn validate_user_status(value: &str) -> Result<(), ValidationError> {
    validate_enum(value, &UserStatus::ALL)
}

fn validate_blood_group(value: &str) -> Result<(), ValidationError> {
    validate_enum(value, &BloodGroup::ALL)
}

/// Request para crear un usuario
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(max = 255))]
    pub username: Option<String>,
    #[validate(length(min = 8), must_match = "password_confirmation")]
    pub password: String,
    pub password_confirmation: String,
    #[validate(length(max = 20), regex = "PHONE_REGEX")]
    pub official_phone: Option<String>,
    #[validate(length(max = 20), regex = "PHONE_REGEX")]
    pub personal_phone: Option<String>,
    #[validate(length(max = 20), regex = "PHONE_REGEX")]
    pub emergency_phone: Option<String>,
    #[validate(custom = "validate_user_type")]
    pub user_type: Option<String>,
    #[validate(custom = "validate_blood_group")]
    pub blood_group: Option<String>,
    #[validate(custom = "validate_user_status")]
    pub status: String,
    #[validate(length(max = 255))]
    pub image: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 20))]
    pub whatsapp_id: Option<String>,
    #[validate(length(max = 255))]
    pub driving_license_no: Option<String>,
    #[validate(length(max = 255))]
    pub nid_number: Option<String>,
    #[validate(length(max = 500))]
    pub present_address: Option<String>,
    #[validate(length(max = 500))]
    pub permanent_address: Option<String>,
    #[validate(length(max = 255))]
    pub emergency_contact_name: Option<String>,
    #[validate(length(max = 20), regex = "PHONE_REGEX")]
    pub emergency_contact_phone: Option<String>,
    #[validate(length(max = 100))]
    pub emergency_contact_relation: Option<String>,
    #[validate(range(min = 1))]
    pub department_id: Option<i64>,
}

/// Request para actualizar un usuario; sin `password` se conserva la actual
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
    #[validate(length(max = 255))]
    pub username: Option<String>,
    #[validate(length(min = 8), must_match = "password_confirmation")]
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    #[validate(length(max = 20), regex = "PHONE_REGEX")]
    pub official_phone: Option<String>,
    #[validate(length(max = 20), regex = "PHONE_REGEX")]
    pub personal_phone: Option<String>,
    #[validate(length(max = 20), regex = "PHONE_REGEX")]
    pub emergency_phone: Option<String>,
    #[validate(custom = "validate_user_type")]
    pub user_type: Option<String>,
    #[validate(custom = "validate_blood_group")]
    pub blood_group: Option<String>,
    #[validate(custom = "validate_user_status")]
    pub status: String,
    #[validate(length(max = 255))]
    pub image: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 20))]
    pub whatsapp_id: Option<String>,
    #[validate(length(max = 255))]
    pub driving_license_no: Option<String>,
    #[validate(length(max = 255))]
    pub nid_number: Option<String>,
    #[validate(length(max = 500))]
    pub present_address: Option<String>,
    #[validate(length(max = 500))]
    pub permanent_address: Option<String>,
    #[validate(length(max = 255))]
    pub emergency_contact_name: Option<String>,
    #[validate(length(max = 20), regex = "PHONE_REGEX")]
    pub emergency_contact_phone: Option<String>,
    #[validate(length(max = 100))]
    pub emergency_contact_relation: Option<String>,
    #[validate(range(min = 1))]
    pub department_id: Option<i64>,
}

/// Datos de conductor obligatorios cuando `user_type = driver`
fn driver_rules(
    errors: &mut ValidationErrors,
    user_type: Option<&str>,
    fields: [(&'static str, Option<&str>, &str); 6],
) {
    if user_type != Some(UserType::Driver.as_str()) {
        return;
    }
    for (field, value, label) in fields {
        require(errors, field, value, label);
    }
}

macro_rules! normalize_optional_fields {
    ($request:ident) => {
        $request.username = blank_to_none($request.username);
        $request.official_phone = blank_to_none($request.official_phone);
        $request.personal_phone = blank_to_none($request.personal_phone);
        $request.emergency_phone = blank_to_none($request.emergency_phone);
        $request.user_type = blank_to_none($request.user_type);
        $request.blood_group = blank_to_none($request.blood_group);
        $request.image = blank_to_none($request.image);
        $request.address = blank_to_none($request.address);
        $request.whatsapp_id = blank_to_none($request.whatsapp_id);
        $request.driving_license_no = blank_to_none($request.driving_license_no);
        $request.nid_number = blank_to_none($request.nid_number);
        $request.present_address = blank_to_none($request.present_address);
        $request.permanent_address = blank_to_none($request.permanent_address);
        $request.emergency_contact_name = blank_to_none($request.emergency_contact_name);
        $request.emergency_contact_phone = blank_to_none($request.emergency_contact_phone);
        $request.emergency_contact_relation = blank_to_none($request.emergency_contact_relation);
    };
}

macro_rules! driver_fields {
    ($request:ident) => {
        [
            ("driving_license_no", $request.driving_license_no.as_deref(), "driving license number"),
            ("nid_number", $request.nid_number.as_deref(), "NID number"),
            ("present_address", $request.present_address.as_deref(), "present address"),
            ("permanent_address", $request.permanent_address.as_deref(), "permanent address"),
            ("emergency_contact_name", $request.emergency_contact_name.as_deref(), "emergency contact name"),
            ("emergency_contact_phone", $request.emergency_contact_phone.as_deref(), "emergency contact phone"),
        ]
    };
}

impl CreateUserRequest {
    /// Los campos opcionales vacíos cuentan como ausentes
    pub fn normalized(mut self) -> Self {
        normalize_optional_fields!(self);
        self
    }

    /// Reglas del derive más las de conductor
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let request = self;
        merge_errors(self.validate(), |errors| {
            driver_rules(errors, request.user_type.as_deref(), driver_fields!(request))
        })
    }

    pub fn into_new_user(self, password_hash: String, now: DateTime<Utc>) -> NewUser {
        NewUser {
            name: self.name.trim().to_string(),
            username: self.username,
            email: Some(self.email),
            password: password_hash,
            official_phone: self.official_phone,
            personal_phone: self.personal_phone,
            emergency_phone: self.emergency_phone,
            user_type: self.user_type.as_deref().and_then(UserType::from_str),
            status: UserStatus::from_str(&self.status).unwrap_or(UserStatus::Active),
            blood_group: self.blood_group.as_deref().and_then(BloodGroup::from_str),
            image: self.image,
            address: self.address,
            whatsapp_id: self.whatsapp_id,
            driving_license_no: self.driving_license_no,
            nid_number: self.nid_number,
            present_address: self.present_address,
            permanent_address: self.permanent_address,
            emergency_contact_name: self.emergency_contact_name,
            emergency_contact_phone: self.emergency_contact_phone,
            emergency_contact_relation: self.emergency_contact_relation,
            department_id: self.department_id,
            email_verified_at: Some(now),
        }
    }
}

impl UpdateUserRequest {
    /// Los campos opcionales vacíos cuentan como ausentes, contraseña incluida
    pub fn normalized(mut self) -> Self {
        normalize_optional_fields!(self);
        self.password = blank_to_none(self.password);
        self.password_confirmation = blank_to_none(self.password_confirmation);
        self
    }

    pub fn check(&self) -> Result<(), ValidationErrors> {
        let request = self;
        merge_errors(self.validate(), |errors| {
            driver_rules(errors, request.user_type.as_deref(), driver_fields!(request))
        })
    }

    /// `password_hash` es `None` cuando el request no trae contraseña
    pub fn into_changes(self, password_hash: Option<String>) -> UserChanges {
        UserChanges {
            name: self.name.trim().to_string(),
            username: self.username,
            email: Some(self.email),
            password: password_hash,
            official_phone: self.official_phone,
            personal_phone: self.personal_phone,
            emergency_phone: self.emergency_phone,
            user_type: self.user_type.as_deref().and_then(UserType::from_str),
            status: UserStatus::from_str(&self.status).unwrap_or(UserStatus::Active),
            blood_group: self.blood_group.as_deref().and_then(BloodGroup::from_str),
            image: self.image,
            address: self.address,
            whatsapp_id: self.whatsapp_id,
            driving_license_no: self.driving_license_no,
            nid_number: self.nid_number,
            present_address: self.present_address,
            permanent_address: self.permanent_address,
            emergency_contact_name: self.emergency_contact_name,
            emergency_contact_phone: self.emergency_contact_phone,
            emergency_contact_relation: self.emergency_contact_relation,
            department_id: self.department_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserFilterOptions {
    pub user_types: Vec<String>,
    pub statuses: Vec<&'static str>,
    pub blood_groups: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct UserStats {
    pub total: u64,
    pub active: u64,
    pub drivers: u64,
    pub admins: u64,
}

/// Payload del índice de usuarios (y de conductores)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIndexResponse {
    pub users: Page<User>,
    pub filter_options: UserFilterOptions,
    pub stats: UserStats,
    pub query_params: QueryParams,
}

/// Opciones de los formularios de alta y edición
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFormOptions {
    pub user_types: Vec<&'static str>,
    pub blood_groups: Vec<&'static str>,
    pub statuses: Vec<Labeled<&'static str>>,
}

impl UserFormOptions {
    pub fn new() -> Self {
        Self {
            user_types: UserType::ALL.to_vec(),
            blood_groups: BloodGroup::ALL.to_vec(),
            statuses: [UserStatus::Active, UserStatus::Inactive, UserStatus::Suspended]
                .iter()
                .map(|status| Labeled {
                    label: status.label(),
                    value: status.as_str(),
                })
                .collect(),
        }
    }
}

impl Default for UserFormOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct UserEditResponse {
    pub user: User,
    #[serde(flatten)]
    pub options: UserFormOptions,
}
