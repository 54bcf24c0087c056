use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use demandrs::features::build_features;
use demandrs::{ForecastConfig, InventoryRecord, SalesRecord};

fn synthetic_dataset(materials: usize, days: usize) -> (Vec<SalesRecord>, Vec<InventoryRecord>) {
    let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
    let mut sales = Vec::with_capacity(materials * days);
    let mut inventory = Vec::with_capacity(materials * days / 7);

    for m in 0..materials {
        let material_id = format!("M{:04}", m);
        for i in 0..days {
            let date = start + Duration::days(i as i64);
            sales.push(SalesRecord::new(
                material_id.clone(),
                date,
                10.0 + ((i * 7 + m) % 13) as f64,
            ));
            if i % 7 == 0 {
                inventory.push(InventoryRecord::new(
                    material_id.clone(),
                    date,
                    500.0 + (i % 100) as f64,
                ));
            }
        }
    }
    (sales, inventory)
}

fn bench_build_features(c: &mut Criterion) {
    let (sales, inventory) = synthetic_dataset(50, 365);
    let config = ForecastConfig::default();

    c.bench_function("build_features_50x365", |b| {
        b.iter(|| {
            build_features(black_box(&sales), black_box(&inventory), black_box(&config)).unwrap()
        })
    });
}

criterion_group!(benches, bench_build_features);
criterion_main!(benches);
