use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::meal::{seed, InMemoryMealRepository, MealRepository, MealService, SecurityContext};

fn bench_store(c: &mut Criterion) {
    let ctx = Arc::new(SecurityContext::new(seed::USER_ID, 2000));
    let repo = Arc::new(InMemoryMealRepository::with_seed(ctx.clone(), seed::meals()));
    let svc = MealService::new(repo.clone(), ctx);
    let template = seed::meals().remove(0);

    c.bench_function("meal_save_new", |b| {
        b.iter(|| {
            let _ = repo.save(template.clone()).unwrap();
        });
    });

    c.bench_function("meal_get_all_tos", |b| {
        b.iter(|| svc.get_all());
    });
}

criterion_group!(benches, bench_store);
criterion_main!(benches);
