pub mod calculations;
pub mod catalog;
pub mod models;
pub mod notify;
pub mod session;
pub mod workflow;

pub use catalog::{Catalog, CatalogError, QueryCriteria, SortMode};
pub use models::*;
pub use notify::{Notification, NotificationKind, NotificationSink, TracingSink};
pub use session::{AuthStatus, EntryError};
pub use workflow::{Workflow, WorkflowError};
