/// All primary keys are PostgreSQL UUIDs (the identity id doubles as the profile id).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
