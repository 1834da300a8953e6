// Criterion benchmarks for Amora Suggest

use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use amora_suggest::core::{
    distance::{calculate_bounding_box, haversine_distance},
    RankingEngine,
};
use amora_suggest::models::UserProfile;
use std::collections::HashSet;

const INTEREST_POOL: &[&str] = &[
    "hiking", "jazz", "cooking", "films", "yoga", "coffee", "travel", "books",
];

fn create_candidate(id: usize, lat: f64, lon: f64) -> UserProfile {
    let interests: Vec<String> = INTEREST_POOL
        .iter()
        .skip(id % 4)
        .take(3)
        .map(|i| i.to_string())
        .collect();

    UserProfile {
        id: id.to_string(),
        name: format!("User {}", id),
        gender: Some(if id % 2 == 0 { "female" } else { "male" }.to_string()),
        bio: if id % 3 == 0 {
            Some("Hello there".to_string())
        } else {
            None
        },
        photos: if id % 2 == 0 {
            vec!["photo.jpg".to_string()]
        } else {
            vec![]
        },
        birthday: None,
        interests,
        coordinates: Some([lon, lat]),
        share_location: true,
        address: None,
        city: None,
        country: None,
        created_at: Some(Utc::now() - Duration::days((id % 90) as i64)),
    }
}

fn create_requester() -> UserProfile {
    let mut requester = create_candidate(0, 40.7128, -74.0060);
    requester.id = "requester".to_string();
    requester.interests = vec!["hiking".to_string(), "jazz".to_string(), "cooking".to_string()];
    requester
}

fn candidate_pool(count: usize) -> Vec<UserProfile> {
    (0..count)
        .map(|i| {
            let lat_offset = (i as f64 * 0.001) % 0.5;
            let lon_offset = (i as f64 * 0.001) % 0.5;
            create_candidate(i + 1, 40.7128 + lat_offset, -74.0060 + lon_offset)
        })
        .collect()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(40.72),
                black_box(-74.01),
            )
        });
    });
}

fn bench_bounding_box(c: &mut Criterion) {
    c.bench_function("bounding_box_calculation", |b| {
        b.iter(|| {
            calculate_bounding_box(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(50.0),
            )
        });
    });
}

fn bench_suggested(c: &mut Criterion) {
    let engine = RankingEngine::with_defaults();
    let requester = create_requester();
    let swiped = HashSet::new();

    let mut group = c.benchmark_group("suggested");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates = candidate_pool(*candidate_count);

        group.bench_with_input(
            BenchmarkId::new("rank", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    engine.suggested(
                        black_box(&requester),
                        black_box(candidates.clone()),
                        black_box(&swiped),
                        black_box(20),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_smart(c: &mut Criterion) {
    let engine = RankingEngine::with_defaults();
    let requester = create_requester();
    let swiped = HashSet::new();
    let now = Utc::now();

    let mut group = c.benchmark_group("smart");

    for candidate_count in [10, 100, 1000].iter() {
        let candidates = candidate_pool(*candidate_count);

        group.bench_with_input(
            BenchmarkId::new("rank", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    engine.smart(
                        black_box(&requester),
                        black_box(candidates.clone()),
                        black_box(&swiped),
                        black_box(now),
                        black_box(20),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_nearby_with_exclusions(c: &mut Criterion) {
    let engine = RankingEngine::with_defaults();
    let requester = create_requester();
    let candidates = candidate_pool(500);

    // Half the pool is already swiped
    let swiped: HashSet<String> = (1..=250).map(|i| i.to_string()).collect();

    c.bench_function("nearby_500_candidates_250_swiped", |b| {
        b.iter(|| {
            engine.nearby(
                black_box(&requester),
                black_box(candidates.clone()),
                black_box(&swiped),
                black_box(None),
                black_box(None),
                black_box(20),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_bounding_box,
    bench_suggested,
    bench_smart,
    bench_nearby_with_exclusions
);

criterion_main!(benches);
