use chrono::{DateTime, Utc};

use crate::listing::{ListSchema, Value};
use crate::models::{NewUser, User, UserChanges, USER_SCHEMA};
use crate::repositories::store::{Assignments, Resource};

/// Campos comunes a alta y edición, en el orden de la tabla
macro_rules! user_profile_assignments {
    ($record:expr) => {
        vec![
            ("name", Value::from($record.name.as_str())),
            ("username", Value::from($record.username.clone())),
            ("email", Value::from($record.email.clone())),
            ("official_phone", Value::from($record.official_phone.clone())),
            ("personal_phone", Value::from($record.personal_phone.clone())),
            ("emergency_phone", Value::from($record.emergency_phone.clone())),
            ("user_type", Value::from($record.user_type.map(|t| t.as_str()))),
            ("status", Value::from($record.status.as_str())),
            ("blood_group", Value::from($record.blood_group.map(|b| b.as_str()))),
            ("image", Value::from($record.image.clone())),
            ("address", Value::from($record.address.clone())),
            ("whatsapp_id", Value::from($record.whatsapp_id.clone())),
            ("driving_license_no", Value::from($record.driving_license_no.clone())),
            ("nid_number", Value::from($record.nid_number.clone())),
            ("present_address", Value::from($record.present_address.clone())),
            ("permanent_address", Value::from($record.permanent_address.clone())),
            ("emergency_contact_name", Value::from($record.emergency_contact_name.clone())),
            ("emergency_contact_phone", Value::from($record.emergency_contact_phone.clone())),
            (
                "emergency_contact_relation",
                Value::from($record.emergency_contact_relation.clone()),
            ),
            ("department_id", Value::from($record.department_id)),
        ]
    };
}

impl Assignments for NewUser {
    fn assignments(&self) -> Vec<(&'static str, Value)> {
        let mut assignments = user_profile_assignments!(self);
        assignments.push(("password", Value::from(self.password.as_str())));
        assignments.push(("email_verified_at", Value::from(self.email_verified_at)));
        assignments
    }
}

impl Assignments for UserChanges {
    fn assignments(&self) -> Vec<(&'static str, Value)> {
        let mut assignments = user_profile_assignments!(self);
        if let Some(password) = &self.password {
            assignments.push(("password", Value::from(password.as_str())));
        }
        assignments
    }
}

impl Resource for User {
    type New = NewUser;
    type Changes = UserChanges;

    const NAME: &'static str = "User";
    const UNIQUE: &'static [&'static str] = &["username", "email"];

    fn schema() -> &'static ListSchema {
        &USER_SCHEMA
    }

    fn create(id: i64, new: NewUser, now: DateTime<Utc>) -> Self {
        User {
            id,
            name: new.name,
            username: new.username,
            email: new.email,
            password: new.password,
            official_phone: new.official_phone,
            personal_phone: new.personal_phone,
            emergency_phone: new.emergency_phone,
            user_type: new.user_type,
            status: new.status,
            blood_group: new.blood_group,
            image: new.image,
            address: new.address,
            whatsapp_id: new.whatsapp_id,
            driving_license_no: new.driving_license_no,
            nid_number: new.nid_number,
            present_address: new.present_address,
            permanent_address: new.permanent_address,
            emergency_contact_name: new.emergency_contact_name,
            emergency_contact_phone: new.emergency_contact_phone,
            emergency_contact_relation: new.emergency_contact_relation,
            department_id: new.department_id,
            email_verified_at: new.email_verified_at,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: UserChanges, now: DateTime<Utc>) {
        self.name = changes.name;
        self.username = changes.username;
        self.email = changes.email;
        if let Some(password) = changes.password {
            self.password = password;
        }
        self.official_phone = changes.official_phone;
        self.personal_phone = changes.personal_phone;
        self.emergency_phone = changes.emergency_phone;
        self.user_type = changes.user_type;
        self.status = changes.status;
        self.blood_group = changes.blood_group;
        self.image = changes.image;
        self.address = changes.address;
        self.whatsapp_id = changes.whatsapp_id;
        self.driving_license_no = changes.driving_license_no;
        self.nid_number = changes.nid_number;
        self.present_address = changes.present_address;
        self.permanent_address = changes.permanent_address;
        self.emergency_contact_name = changes.emergency_contact_name;
        self.emergency_contact_phone = changes.emergency_contact_phone;
        self.emergency_contact_relation = changes.emergency_contact_relation;
        self.department_id = changes.department_id;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UserStatus, UserType};

    fn changes(password: Option<&str>) -> UserChanges {
        UserChanges {
            name: "Emma Employee".to_string(),
            username: Some("employee1".to_string()),
            email: Some("emma.employee@example.com".to_string()),
            password: password.map(str::to_string),
            official_phone: None,
            personal_phone: None,
            emergency_phone: None,
            user_type: Some(UserType::Employee),
            status: UserStatus::Active,
            blood_group: None,
            image: None,
            address: None,
            whatsapp_id: None,
            driving_license_no: None,
            nid_number: None,
            present_address: None,
            permanent_address: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            emergency_contact_relation: None,
            department_id: None,
        }
    }

    #[test]
    fn update_without_password_leaves_it_out() {
        let columns: Vec<_> = changes(None).assignments().into_iter().map(|(c, _)| c).collect();
        assert!(!columns.contains(&"password"));

        let columns: Vec<_> =
            changes(Some("$2b$hash")).assignments().into_iter().map(|(c, _)| c).collect();
        assert!(columns.contains(&"password"));
    }

    #[test]
    fn enums_are_written_as_text() {
        let assignments = changes(None).assignments();
        let user_type = assignments.iter().find(|(c, _)| *c == "user_type").map(|(_, v)| v);
        assert_eq!(user_type, Some(&Value::from("employee")));
    }
}
