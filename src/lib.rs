pub mod ephemeris;
pub mod geocode;
pub mod geodesy;
pub mod ingest;
pub mod location;
pub mod web;
