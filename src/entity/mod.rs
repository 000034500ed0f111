pub mod favorite_people;
pub mod favorite_planet;
pub mod helpers;
pub mod people;
pub mod planet;
pub mod user;
pub mod vehicle;
