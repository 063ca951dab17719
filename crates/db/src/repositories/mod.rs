//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Steps that must share a transaction take
//! `&mut Transaction` instead.

pub mod account_repo;
pub mod brand_repo;
pub mod customer_repo;
pub mod dashboard_repo;
pub mod device_auth_repo;
pub mod device_repo;
pub mod identity_repo;
pub mod item_type_repo;
pub mod profile_repo;
pub mod repair_category_repo;
pub mod repair_item_repo;
pub mod repair_repo;
pub mod session_repo;
pub mod settings_repo;
pub mod showroom_repo;

pub use account_repo::AccountRepo;
pub use brand_repo::BrandRepo;
pub use customer_repo::CustomerRepo;
pub use dashboard_repo::DashboardRepo;
pub use device_auth_repo::DeviceAuthRepo;
pub use device_repo::DeviceRepo;
pub use identity_repo::IdentityRepo;
pub use item_type_repo::ItemTypeRepo;
pub use profile_repo::ProfileRepo;
pub use repair_category_repo::RepairCategoryRepo;
pub use repair_item_repo::RepairItemRepo;
pub use repair_repo::RepairRepo;
pub use session_repo::SessionRepo;
pub use settings_repo::SettingsRepo;
pub use showroom_repo::ShowroomRepo;
