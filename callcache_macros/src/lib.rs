mod entity;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(CacheEntity)] derive macro
// ============================================================================

/// Derive macro for the `CacheEntity` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, CacheEntity)]
/// #[entity(kind = "machine")]
/// struct Machine {
///     #[entity(key)]
///     pub system_id: String,
///     pub hostname: String,
/// }
/// ```
///
/// - `#[entity(kind = "...")]` sets the entity-type name used by query keys
///   and push subjects. If omitted, defaults to the snake_case struct name.
/// - `#[entity(key)]` marks the primary-key field; its type becomes
///   `CacheEntity::Key`. If omitted, defaults to a field named `id`.
#[proc_macro_derive(CacheEntity, attributes(entity))]
pub fn derive_cache_entity(input: TokenStream) -> TokenStream {
    entity::derive_cache_entity(input)
}
