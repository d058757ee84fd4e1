//! Modelo de User
//!
//! Mapea la tabla `users`. Los campos de conductor sólo se exigen cuando
//! `user_type = driver` (ver `dto::user_dto`). El hash de la contraseña
//! nunca se serializa.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};

use crate::listing::{FilterColumn, FilterKind, ListSchema, Listable, SortDirection, Value};

/// Tipo de usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Admin,
    Driver,
    Manager,
    Employee,
}

impl UserType {
    pub const ALL: [&'static str; 4] = ["admin", "driver", "manager", "employee"];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "admin",
            UserType::Driver => "driver",
            UserType::Manager => "manager",
            UserType::Employee => "employee",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserType::Admin),
            "driver" => Some(UserType::Driver),
            "manager" => Some(UserType::Manager),
            "employee" => Some(UserType::Employee),
            _ => None,
        }
    }
}

/// Estado de la cuenta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    pub const ALL: [&'static str; 3] = ["active", "inactive", "suspended"];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Suspended => "suspended",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(UserStatus::Active),
            "inactive" => Some(UserStatus::Inactive),
            "suspended" => Some(UserStatus::Suspended),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::Suspended => "Suspended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    pub const ALL: [&'static str; 8] = ["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "A+" => Some(BloodGroup::APositive),
            "A-" => Some(BloodGroup::ANegative),
            "B+" => Some(BloodGroup::BPositive),
            "B-" => Some(BloodGroup::BNegative),
            "AB+" => Some(BloodGroup::AbPositive),
            "AB-" => Some(BloodGroup::AbNegative),
            "O+" => Some(BloodGroup::OPositive),
            "O-" => Some(BloodGroup::ONegative),
            _ => None,
        }
    }
}

/// User - mapea a la tabla users
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password: String,
    pub official_phone: Option<String>,
    pub personal_phone: Option<String>,
    pub emergency_phone: Option<String>,
    pub user_type: Option<UserType>,
    pub status: UserStatus,
    pub blood_group: Option<BloodGroup>,
    pub image: Option<String>,
    pub address: Option<String>,
    pub whatsapp_id: Option<String>,
    pub driving_license_no: Option<String>,
    pub nid_number: Option<String>,
    pub present_address: Option<String>,
    pub permanent_address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub emergency_contact_relation: Option<String>,
    pub department_id: Option<i64>,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Campos escribibles de un usuario nuevo (contraseña ya hasheada)
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
    pub official_phone: Option<String>,
    pub personal_phone: Option<String>,
    pub emergency_phone: Option<String>,
    pub user_type: Option<UserType>,
    pub status: UserStatus,
    pub blood_group: Option<BloodGroup>,
    pub image: Option<String>,
    pub address: Option<String>,
    pub whatsapp_id: Option<String>,
    pub driving_license_no: Option<String>,
    pub nid_number: Option<String>,
    pub present_address: Option<String>,
    pub permanent_address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub emergency_contact_relation: Option<String>,
    pub department_id: Option<i64>,
    pub email_verified_at: Option<DateTime<Utc>>,
}

/// Cambios de una actualización; `password: None` conserva la actual
#[derive(Debug, Clone, PartialEq)]
pub struct UserChanges {
    pub name: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub official_phone: Option<String>,
    pub personal_phone: Option<String>,
    pub emergency_phone: Option<String>,
    pub user_type: Option<UserType>,
    pub status: UserStatus,
    pub blood_group: Option<BloodGroup>,
    pub image: Option<String>,
    pub address: Option<String>,
    pub whatsapp_id: Option<String>,
    pub driving_license_no: Option<String>,
    pub nid_number: Option<String>,
    pub present_address: Option<String>,
    pub permanent_address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub emergency_contact_relation: Option<String>,
    pub department_id: Option<i64>,
}

pub static USER_SCHEMA: ListSchema = ListSchema {
    table: "users",
    primary_key: "id",
    searchable: &[
        "name",
        "email",
        "username",
        "official_phone",
        "personal_phone",
        "user_type",
        "address",
    ],
    sortable: &[
        "id",
        "name",
        "email",
        "official_phone",
        "user_type",
        "status",
        "blood_group",
        "created_at",
    ],
    filterable: &[
        FilterColumn { name: "user_type", kind: FilterKind::OneOf(&UserType::ALL) },
        FilterColumn { name: "status", kind: FilterKind::OneOf(&UserStatus::ALL) },
        FilterColumn { name: "blood_group", kind: FilterKind::OneOf(&BloodGroup::ALL) },
    ],
    default_sort: "created_at",
    default_direction: SortDirection::Desc,
    default_per_page: 10,
    max_per_page: 100,
};

impl Listable for User {
    fn id(&self) -> i64 {
        self.id
    }

    fn value(&self, column: &str) -> Value {
        match column {
            "id" => Value::Int(self.id),
            "name" => Value::from(self.name.as_str()),
            "username" => Value::from(self.username.clone()),
            "email" => Value::from(self.email.clone()),
            "official_phone" => Value::from(self.official_phone.clone()),
            "personal_phone" => Value::from(self.personal_phone.clone()),
            "user_type" => Value::from(self.user_type.map(|t| t.as_str())),
            "status" => Value::from(self.status.as_str()),
            "blood_group" => Value::from(self.blood_group.map(|b| b.as_str())),
            "address" => Value::from(self.address.clone()),
            "department_id" => Value::from(self.department_id),
            "created_at" => Value::from(self.created_at),
            "updated_at" => Value::from(self.updated_at),
            _ => Value::Null,
        }
    }
}

impl User {
    pub fn is_driver(&self) -> bool {
        self.user_type == Some(UserType::Driver)
    }
}

fn decode_error(column: &str, raw: &str) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: format!("unexpected value '{}'", raw).into(),
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let user_type = row
            .try_get::<Option<String>, _>("user_type")?
            .map(|raw| UserType::from_str(&raw).ok_or_else(|| decode_error("user_type", &raw)))
            .transpose()?;
        let status_raw: String = row.try_get("status")?;
        let status =
            UserStatus::from_str(&status_raw).ok_or_else(|| decode_error("status", &status_raw))?;
        let blood_group = row
            .try_get::<Option<String>, _>("blood_group")?
            .map(|raw| BloodGroup::from_str(&raw).ok_or_else(|| decode_error("blood_group", &raw)))
            .transpose()?;

        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            official_phone: row.try_get("official_phone")?,
            personal_phone: row.try_get("personal_phone")?,
            emergency_phone: row.try_get("emergency_phone")?,
            user_type,
            status,
            blood_group,
            image: row.try_get("image")?,
            address: row.try_get("address")?,
            whatsapp_id: row.try_get("whatsapp_id")?,
            driving_license_no: row.try_get("driving_license_no")?,
            nid_number: row.try_get("nid_number")?,
            present_address: row.try_get("present_address")?,
            permanent_address: row.try_get("permanent_address")?,
            emergency_contact_name: row.try_get("emergency_contact_name")?,
            emergency_contact_phone: row.try_get("emergency_contact_phone")?,
            emergency_contact_relation: row.try_get("emergency_contact_relation")?,
            department_id: row.try_get("department_id")?,
            email_verified_at: row.try_get("email_verified_at")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
