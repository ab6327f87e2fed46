pub mod drugs;
pub mod health;
pub mod interactions;
