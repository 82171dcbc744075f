pub mod epochs;
