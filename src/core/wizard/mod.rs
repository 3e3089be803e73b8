pub mod reducer;
pub mod state;
pub mod steps;
pub mod validate;
