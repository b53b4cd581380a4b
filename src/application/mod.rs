pub mod coordinator;
pub mod store;

pub use coordinator::DashboardCoordinator;
pub use store::StateStore;
