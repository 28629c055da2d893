pub mod dashboard;
pub mod session;
pub mod store;

pub use dashboard::{ChartPoint, DashboardView, FrostQuery, MapPoint};
pub use session::ExploreSession;
pub use store::DataStore;
