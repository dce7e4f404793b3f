// Chat log rows are keyed app-side with UUIDv7 so that primary-key order
// follows insertion time without relying on `created_at`.

use uuid::Uuid;

/// Generate a new UUIDv7 (timestamp-sortable).
pub fn uuidv7() -> Uuid {
    Uuid::now_v7()
}
