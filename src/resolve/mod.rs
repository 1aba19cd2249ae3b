//! Turning location and weather inputs into entry records.
//!
//! Both resolvers sit between the pure entry core and the external
//! collaborators in `providers`, and own the recovery rules: a geocoding
//! "no result" becomes a placeholder address, and any weather failure
//! becomes an entry without weather.

pub mod location;
pub mod weather;

pub use location::resolve_location;
pub use weather::resolve_weather;
