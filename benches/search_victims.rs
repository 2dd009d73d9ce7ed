//! Benchmarks name search across a populated registry.

#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, Criterion};
use relief::{Config, Registry};

/// Builds a registry with `sites` locations holding `per_site` victims each.
fn preseed_registry(sites: usize, per_site: usize) -> Registry {
    let today = chrono::Local::now()
        .date_naive()
        .format("%Y-%m-%d")
        .to_string();

    let mut registry = Registry::new(Config::default());
    for site in 0..sites {
        let location = registry.add_location(format!("Shelter {site}"), format!("{site} High St"));
        for victim in 0..per_site {
            let id = registry
                .admit_victim(&format!("Resident{victim}"), &today, Some(location))
                .unwrap();
            registry
                .victim_mut(id)
                .unwrap()
                .set_last_name(format!("Family{site}"));
        }
    }
    registry
}

fn search_victims(c: &mut Criterion) {
    let registry = preseed_registry(20, 250);

    c.bench_function("search 5000 victims, hit", |b| {
        b.iter(|| registry.search_victims("resident42"));
    });

    c.bench_function("search 5000 victims, miss", |b| {
        b.iter(|| registry.search_victims("nobody by this name"));
    });
}

criterion_group!(benches, search_victims);
criterion_main!(benches);
