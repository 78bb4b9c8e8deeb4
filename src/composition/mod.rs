pub mod dsl;
