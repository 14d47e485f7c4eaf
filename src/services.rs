pub mod approval_service;
pub mod auth;
pub mod dashboard_service;
pub mod inventory_service;
pub mod location_service;
pub mod report_service;
pub mod transaction_service;
pub mod user_service;

pub use approval_service::ApprovalService;
pub use auth::AuthService;
pub use dashboard_service::DashboardService;
pub use inventory_service::InventoryService;
pub use location_service::LocationService;
pub use report_service::ReportService;
pub use transaction_service::TransactionService;
pub use user_service::UserService;
