/// API route modules
pub mod cart;
pub mod catalog;
pub mod designers;
pub mod health;
pub mod items;
