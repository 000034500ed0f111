//! REST backend over users, people, vehicles, planets and the favorites
//! linking users to people and planets.

pub mod cli;
pub mod data;
pub mod entity;
pub mod server;
