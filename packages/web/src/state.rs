use std::sync::Arc;

use api::auth::SessionCodec;
use sqlx::SqlitePool;

/// Shared by every handler. Both members are immutable after startup.
#[derive(Clone, Debug)]
pub struct AppState {
    pub pool: SqlitePool,
    pub sessions: Arc<SessionCodec>,
}

impl AppState {
    pub fn new(pool: SqlitePool, sessions: SessionCodec) -> Self {
        Self {
            pool,
            sessions: Arc::new(sessions),
        }
    }
}
