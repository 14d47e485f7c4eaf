pub mod approval_repo;
pub use approval_repo::ApprovalRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod location_repo;
pub use location_repo::LocationRepository;
pub mod transaction_repo;
pub use transaction_repo::TransactionRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
