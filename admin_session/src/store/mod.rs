mod cached;
mod errors;
mod supabase;
mod types;

pub use cached::CachedSessionStore;
pub use errors::StoreError;
pub use supabase::SupabaseAuthClient;
pub use types::{AuthBackend, SessionChange, SessionStore};
