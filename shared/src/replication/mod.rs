pub mod diff_handler;
pub mod diff_mask;
pub mod property;
pub mod property_mutate;
