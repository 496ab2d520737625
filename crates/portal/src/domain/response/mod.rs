mod api;
mod page;
mod session;

pub use self::api::ApiResponse;
pub use self::page::{DashboardPage, ListingsPage, ViewerSummary};
pub use self::session::{AnalyticsResponse, MeResponse, SessionStatusResponse};
