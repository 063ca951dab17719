//! Shared query parameter types for API handlers.

use repairdesk_core::types::DbId;
use serde::Deserialize;

/// Query parameters for catalog lists that hide inactive rows by default.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// `?showroom_id=` filter. Only admins may choose; other callers are pinned
/// to their own showroom.
#[derive(Debug, Default, Deserialize)]
pub struct ShowroomFilter {
    pub showroom_id: Option<DbId>,
}
