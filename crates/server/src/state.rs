use std::sync::Arc;

use configs::MealsConfig;
use service::meal::{seed, InMemoryMealRepository, MealService, SecurityContext};

/// Shared handler state; one store per process.
#[derive(Clone)]
pub struct ServerState {
    pub meals: MealService<InMemoryMealRepository>,
    pub security: Arc<SecurityContext>,
}

impl ServerState {
    pub fn new(cfg: &MealsConfig) -> Self {
        let security = Arc::new(SecurityContext::new(cfg.auth_user_id, cfg.calories_per_day));
        let repo = if cfg.seed {
            InMemoryMealRepository::with_seed(security.clone(), seed::meals())
        } else {
            InMemoryMealRepository::new(security.clone())
        };
        let meals = MealService::new(Arc::new(repo), Arc::clone(&security));
        Self { meals, security }
    }
}
