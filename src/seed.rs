//! Datos de demostración
//!
//! Crea el administrador, conductores, managers y empleados de ejemplo,
//! algunos vehículos y un catálogo de productos. Cada usuario se crea sólo
//! si su email no existe, así que se puede ejecutar en cada arranque.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::listing::Value;
use crate::models::{BloodGroup, NewProduct, NewUser, NewVehicle, ProductStatus, UserStatus, UserType};
use crate::services::authorization_service::{role_for_user_type, Role};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub const DEMO_PASSWORD: &str = "12345678";
pub const ADMIN_EMAIL: &str = "admin@example.com";

struct DemoUser {
    name: &'static str,
    email: &'static str,
    username: &'static str,
    phone: &'static str,
    user_type: UserType,
    blood_group: BloodGroup,
    status: UserStatus,
    address: &'static str,
}

const DEMO_USERS: [DemoUser; 9] = [
    DemoUser {
        name: "System Administrator",
        email: ADMIN_EMAIL,
        username: "admin",
        phone: "+1234567890",
        user_type: UserType::Admin,
        blood_group: BloodGroup::OPositive,
        status: UserStatus::Active,
        address: "123 Admin Street, Admin City",
    },
    DemoUser {
        name: "John Driver",
        email: "driver@example.com",
        username: "driver1",
        phone: "+1234567891",
        user_type: UserType::Driver,
        blood_group: BloodGroup::APositive,
        status: UserStatus::Active,
        address: "456 Driver Lane, Driver City",
    },
    DemoUser {
        name: "Sarah Wilson",
        email: "sarah.driver@example.com",
        username: "driver2",
        phone: "+1234567892",
        user_type: UserType::Driver,
        blood_group: BloodGroup::BPositive,
        status: UserStatus::Active,
        address: "789 Transport Ave, Transport City",
    },
    DemoUser {
        name: "Mike Johnson",
        email: "mike.driver@example.com",
        username: "driver3",
        phone: "+1234567893",
        user_type: UserType::Driver,
        blood_group: BloodGroup::AbPositive,
        status: UserStatus::Active,
        address: "321 Delivery Road, Delivery Town",
    },
    DemoUser {
        name: "Alice Manager",
        email: "alice.manager@example.com",
        username: "manager1",
        phone: "+1234567894",
        user_type: UserType::Manager,
        blood_group: BloodGroup::ONegative,
        status: UserStatus::Active,
        address: "555 Management Blvd, Manager City",
    },
    DemoUser {
        name: "Bob Supervisor",
        email: "bob.supervisor@example.com",
        username: "manager2",
        phone: "+1234567895",
        user_type: UserType::Manager,
        blood_group: BloodGroup::ANegative,
        status: UserStatus::Active,
        address: "777 Supervisor St, Supervisor Town",
    },
    DemoUser {
        name: "Emma Employee",
        email: "emma.employee@example.com",
        username: "employee1",
        phone: "+1234567896",
        user_type: UserType::Employee,
        blood_group: BloodGroup::BNegative,
        status: UserStatus::Active,
        address: "999 Employee Road, Employee City",
    },
    DemoUser {
        name: "David Worker",
        email: "david.worker@example.com",
        username: "employee2",
        phone: "+1234567897",
        user_type: UserType::Employee,
        blood_group: BloodGroup::AbNegative,
        status: UserStatus::Inactive,
        address: "999 Employee Road, Employee City",
    },
    DemoUser {
        name: "Lisa Staff",
        email: "lisa.staff@example.com",
        username: "employee3",
        phone: "+1234567898",
        user_type: UserType::Employee,
        blood_group: BloodGroup::OPositive,
        status: UserStatus::Suspended,
        address: "999 Employee Road, Employee City",
    },
];

// (marca, modelo, color, matrícula, proveedor, activo)
const DEMO_VEHICLES: [(&str, &str, &str, &str, Option<&str>, bool); 5] = [
    ("Toyota", "Hiace", "White", "DHK-1001", Some("Navana Motors"), true),
    ("Toyota", "Corolla", "Silver", "DHK-1002", None, true),
    ("Nissan", "Urvan", "White", "DHK-1003", Some("Rancon Motors"), true),
    ("Isuzu", "D-Max", "Blue", "DHK-1004", None, false),
    ("Mitsubishi", "L200", "Black", "DHK-1005", Some("Rangs Motors"), true),
];

const PRODUCT_CATEGORIES: [&str; 5] =
    ["Electronics", "Furniture", "Office Supplies", "Tools", "Packaging"];
const PRODUCT_ITEMS: [&str; 6] = ["Standard", "Compact", "Premium", "Heavy Duty", "Eco", "Pro"];

/// Resumen de lo creado en una ejecución
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub vehicles: usize,
    pub products: usize,
}

pub async fn seed_demo_data(state: &AppState) -> AppResult<SeedReport> {
    let report = SeedReport {
        users: seed_users(state).await?,
        vehicles: seed_vehicles(state).await?,
        products: seed_products(state).await?,
    };

    tracing::info!(
        "🌱 Demo data ready: {} users, {} vehicles, {} products created",
        report.users,
        report.vehicles,
        report.products
    );
    Ok(report)
}

async fn seed_users(state: &AppState) -> AppResult<usize> {
    let password = bcrypt::hash(DEMO_PASSWORD, state.config.bcrypt_cost)
        .map_err(|e| AppError::Hash(e.to_string()))?;
    let mut created = 0;

    for demo in &DEMO_USERS {
        if state.users.exists("email", Value::from(demo.email), None).await? {
            continue;
        }

        let user = state
            .users
            .insert(NewUser {
                name: demo.name.to_string(),
                username: Some(demo.username.to_string()),
                email: Some(demo.email.to_string()),
                password: password.clone(),
                official_phone: Some(demo.phone.to_string()),
                personal_phone: None,
                emergency_phone: None,
                user_type: Some(demo.user_type),
                status: demo.status,
                blood_group: Some(demo.blood_group),
                image: None,
                address: Some(demo.address.to_string()),
                whatsapp_id: Some(demo.phone.to_string()),
                driving_license_no: None,
                nid_number: None,
                present_address: None,
                permanent_address: None,
                emergency_contact_name: None,
                emergency_contact_phone: None,
                emergency_contact_relation: None,
                department_id: None,
                email_verified_at: Some(Utc::now()),
            })
            .await?;

        let role = if demo.email == ADMIN_EMAIL {
            Role::SuperAdmin
        } else {
            role_for_user_type(demo.user_type)
        };
        state.roles.sync(user.id, role).await?;
        created += 1;
    }

    Ok(created)
}

async fn seed_vehicles(state: &AppState) -> AppResult<usize> {
    let mut created = 0;

    for (brand, model, color, registration_number, vendor, is_active) in DEMO_VEHICLES {
        let taken = state
            .vehicles
            .exists("registration_number", Value::from(registration_number), None)
            .await?;
        if taken {
            continue;
        }

        state
            .vehicles
            .insert(NewVehicle {
                brand: brand.to_string(),
                model: model.to_string(),
                color: color.to_string(),
                registration_number: registration_number.to_string(),
                vendor: vendor.map(str::to_string),
                is_active,
            })
            .await?;
        created += 1;
    }

    Ok(created)
}

/// El catálogo sólo se genera sobre una tabla vacía
async fn seed_products(state: &AppState) -> AppResult<usize> {
    if state.products.count().await? > 0 {
        return Ok(0);
    }

    let products = demo_products();
    let created = products.len();
    for product in products {
        state.products.insert(product).await?;
    }
    Ok(created)
}

fn demo_products() -> Vec<NewProduct> {
    let statuses = [ProductStatus::Active, ProductStatus::Active, ProductStatus::Inactive, ProductStatus::Pending];
    let mut products = Vec::new();

    for (c, category) in PRODUCT_CATEGORIES.iter().enumerate() {
        for (i, item) in PRODUCT_ITEMS.iter().enumerate() {
            let n = c * PRODUCT_ITEMS.len() + i;
            products.push(NewProduct {
                name: format!("{} {}", item, category.trim_end_matches('s')),
                description: Some(format!("{} item from the {} range", item, category.to_lowercase())),
                price: Decimal::new(999 + (n as i64) * 1250, 2),
                category: category.to_string(),
                status: statuses[n % statuses.len()],
            });
        }
    }

    products
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_products_cover_every_category_and_status() {
        let products = demo_products();
        assert_eq!(products.len(), PRODUCT_CATEGORIES.len() * PRODUCT_ITEMS.len());
        for category in PRODUCT_CATEGORIES {
            assert!(products.iter().any(|p| p.category == category));
        }
        for status in [ProductStatus::Active, ProductStatus::Inactive, ProductStatus::Pending] {
            assert!(products.iter().any(|p| p.status == status));
        }
        assert!(products.iter().all(|p| p.price >= Decimal::ZERO));
    }

    #[test]
    fn only_the_first_demo_user_is_the_administrator() {
        assert_eq!(DEMO_USERS[0].email, ADMIN_EMAIL);
        assert_eq!(
            DEMO_USERS.iter().filter(|u| u.user_type == UserType::Admin).count(),
            1
        );
    }
}
