//! Meal module: repository contract, in-memory store, ownership, and business service.

pub mod inmemory;
pub mod repository;
pub mod security;
pub mod seed;
pub mod service;
pub mod util;

pub use inmemory::InMemoryMealRepository;
pub use repository::MealRepository;
pub use security::{OwnershipChecker, SecurityContext};
pub use service::MealService;
