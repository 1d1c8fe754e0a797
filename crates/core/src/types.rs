/// Server-generated primary keys (workouts, intervals, timers, completion records).
pub type DbId = uuid::Uuid;

/// User ids are issued by the external identity provider and stored verbatim.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
