pub mod cartoon;
pub mod filters;
