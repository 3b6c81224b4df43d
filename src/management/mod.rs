mod flow;
mod reconcile;
mod session;

pub use reconcile::SyncOptions;
pub use reconcile::SyncPlan;
pub use reconcile::SyncReport;
pub use reconcile::reconcile;
pub use reconcile::resolve_playlist;
pub use session::Session;
pub use flow::SyncFlow;
