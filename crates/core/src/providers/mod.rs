pub mod query;
pub mod traits;

// Endpoint implementations
pub mod ipapi;
pub mod open_meteo;
pub mod supabase;
