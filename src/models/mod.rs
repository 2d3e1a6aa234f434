//! Data models for the recipe document.

pub mod recipe;

pub use recipe::Recipe;
