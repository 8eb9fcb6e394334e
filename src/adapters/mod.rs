// Adapters layer: concrete implementations for external systems.

pub mod headless;
pub mod oembed;
pub mod supabase;

pub use headless::{BrowserAction, HeadlessBrowser};
pub use oembed::ThumbnailResolver;
pub use supabase::SupabaseStore;
