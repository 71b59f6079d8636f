pub mod attraction;
pub mod trip;
pub mod user;
