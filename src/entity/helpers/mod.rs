//! Data-model operations over the entities: create, lookup, listing,
//! partial update and cascading delete.
//!
//! Every function takes the connection explicitly and returns `Ok(None)`
//! (or `Ok(false)` for deletes) when the addressed row does not exist, so
//! callers can tell "missing" apart from a store failure.

pub mod favorites;
pub mod people;
pub mod planets;
pub mod users;
pub mod vehicles;

pub use favorites::{FavoritePeopleView, FavoritePlanetView, UserFavorites};
pub use people::PeopleFields;
pub use planets::PlanetFields;
pub use users::{UserFields, UserView};
pub use vehicles::VehicleFields;
