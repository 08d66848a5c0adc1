pub mod api;
pub mod bootstrap;
pub mod effects;
pub mod guard;
pub mod reporting_tasks;
pub mod router;
pub mod simulated;
pub mod status_listing;
pub mod store;

pub use api::*;
pub use bootstrap::*;
pub use effects::*;
pub use guard::*;
pub use reporting_tasks::*;
pub use router::*;
pub use simulated::*;
pub use status_listing::*;
pub use store::*;
