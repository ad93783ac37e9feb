use crate::shared::forms::EntityFormDef;

/// Surrogate key assigned by the persistence layer
pub type RecordId = i64;

/// Trait for an aggregate root
///
/// Static metadata every entity of the tracker carries.
pub trait AggregateRoot {
    // ============================================================================
    // Class metadata
    // ============================================================================

    /// Aggregate index, e.g. "a001"
    fn aggregate_index() -> &'static str;

    /// Collection name, also the API endpoint, e.g. "resumes"
    fn collection_name() -> &'static str;

    /// Singular UI name, e.g. "Resume"
    fn element_name() -> &'static str;

    /// Plural UI name, e.g. "Resumes"
    fn list_name() -> &'static str;

    /// Form declaration used by the entity editor
    fn form_definition() -> EntityFormDef;

    // ============================================================================
    // Defaults
    // ============================================================================

    /// Full system name, also the table name, e.g. "a001_resumes"
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
