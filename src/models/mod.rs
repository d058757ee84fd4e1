//! Modelos del sistema
//!
//! Registros tipados que mapean las tablas PostgreSQL, con su esquema de
//! listado y las variantes `New*` / `*Changes` para escritura.

pub mod product;
pub mod user;
pub mod vehicle;

pub use product::{NewProduct, Product, ProductChanges, ProductStatus, PRODUCT_SCHEMA};
pub use user::{BloodGroup, NewUser, User, UserChanges, UserStatus, UserType, USER_SCHEMA};
pub use vehicle::{NewVehicle, Vehicle, VehicleChanges, VEHICLE_SCHEMA};
