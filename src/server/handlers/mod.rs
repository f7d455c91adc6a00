pub mod locations;
pub mod plans;
pub mod routes;
