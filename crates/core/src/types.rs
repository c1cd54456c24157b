/// All primary keys are SQLite `INTEGER PRIMARY KEY AUTOINCREMENT` values.
pub type DbId = i64;

/// Reserved id carried by the synthesized example category and resource.
///
/// Store-generated ids start at 1, so a negative id can never collide.
pub const PLACEHOLDER_ID: DbId = -1;

/// Returns `true` if `id` is the reserved placeholder id.
pub fn is_placeholder_id(id: DbId) -> bool {
    id == PLACEHOLDER_ID
}
