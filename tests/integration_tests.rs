// Integration tests for Amora Suggest

use amora_suggest::core::{
    distance::{calculate_bounding_box, haversine_distance},
    RankingEngine,
};
use amora_suggest::models::UserProfile;
use chrono::{Duration, Utc};
use std::collections::HashSet;

fn create_test_profile(id: &str, interests: &[&str], lat: f64, lon: f64) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        name: format!("User {}", id),
        gender: Some("female".to_string()),
        bio: Some("Hello there".to_string()),
        photos: vec!["photo-1.jpg".to_string()],
        birthday: None,
        interests: interests.iter().map(|i| i.to_string()).collect(),
        coordinates: Some([lon, lat]),
        share_location: true,
        address: None,
        city: None,
        country: None,
        created_at: Some(Utc::now()),
    }
}

#[test]
fn test_integration_end_to_end_suggested() {
    let engine = RankingEngine::with_defaults();
    let requester = create_test_profile("me", &["hiking", "jazz"], 40.7128, -74.0060); // New York
    let swiped: HashSet<String> = ["already-seen".to_string()].into_iter().collect();

    // Create diverse candidates
    let candidates = vec![
        create_test_profile("1", &["hiking", "jazz"], 40.72, -74.01), // Best match
        create_test_profile("2", &["hiking"], 40.73, -74.02),         // Partial match
        create_test_profile("3", &["cooking"], 40.71, -74.00),        // No shared interests
        create_test_profile("4", &["hiking"], 41.5, -74.0),           // Too far (~90 km)
        create_test_profile("already-seen", &["hiking", "jazz"], 40.72, -74.01), // Swiped
        create_test_profile("me", &["hiking", "jazz"], 40.7128, -74.0060), // Self
    ];

    let result = engine.suggested(&requester, candidates, &swiped, 10);

    let ids: Vec<&str> = result.iter().map(|s| s.profile.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);

    // Results sorted by score descending
    for window in result.windows(2) {
        assert!(window[0].score >= window[1].score, "Results not sorted by score");
    }

    // Scores follow the shared-interest formula with the proximity bonus
    assert_eq!(result[0].score, 2.0 * 10.0 + 100.0);
    assert_eq!(result[1].score, 1.0 * 10.0 + 100.0);
    assert_eq!(result[0].match_percentage, 100);
    assert_eq!(result[1].match_percentage, 50);
}

#[test]
fn test_integration_smart_prefers_complete_recent_profiles() {
    let engine = RankingEngine::with_defaults();
    let requester = create_test_profile("me", &["hiking", "jazz"], 40.7128, -74.0060);
    let now = Utc::now();

    let mut complete = create_test_profile("complete", &["hiking", "jazz"], 40.72, -74.01);
    complete.created_at = Some(now - Duration::days(1));

    let mut sparse = create_test_profile("sparse", &["hiking"], 40.73, -74.02);
    sparse.bio = None;
    sparse.photos = vec![];
    sparse.created_at = Some(now - Duration::days(120));

    let result = engine.smart(
        &requester,
        vec![sparse, complete],
        &HashSet::new(),
        now,
        10,
    );

    assert_eq!(result[0].profile.id, "complete");

    for s in &result {
        let scores = s.scores.expect("smart results carry sub-scores");
        assert!((scores.total - (scores.interest + scores.profile + scores.activity)).abs() < 1e-9);
        assert!(scores.total > 30.0, "Score floor not applied");
        assert!(s.distance.is_some());
    }
}

#[test]
fn test_integration_suggestion_wire_format() {
    let engine = RankingEngine::with_defaults();
    let requester = create_test_profile("me", &["hiking", "jazz"], 40.7128, -74.0060);
    let now = Utc::now();

    let candidate = create_test_profile("c", &["hiking"], 40.72, -74.01);
    let result = engine.smart(&requester, vec![candidate], &HashSet::new(), now, 10);
    assert_eq!(result.len(), 1);

    let json = serde_json::to_value(&result[0]).unwrap();

    // Flattened profile fields plus camelCase scoring fields
    assert_eq!(json["id"], "c");
    assert_eq!(json["commonInterestsCount"], 1);
    assert_eq!(json["matchPercentage"], 50);
    assert_eq!(json["distanceUnit"], "km");
    assert!(json["scores"]["total"].is_number());
    assert!(json["isNearby"].is_boolean());
    assert!(json["isActive"].is_boolean());
    // Shared location is exposed as a location block
    assert_eq!(json["location"]["coordinates"][1], 40.72);
}

#[test]
fn test_distance_accuracy() {
    // Test known distances
    let nyc_lat = 40.7128;
    let nyc_lon = -74.0060;

    // Distance to same point should be 0
    let distance = haversine_distance(nyc_lat, nyc_lon, nyc_lat, nyc_lon);
    assert!((distance).abs() < 0.01);

    // Distance to nearby point
    let distance = haversine_distance(nyc_lat, nyc_lon, 40.72, -74.01);
    assert!(distance > 0.0 && distance < 2.0, "Expected ~1km, got {}", distance);

    // Distance to LA (approximately 3944 km)
    let la_lat = 34.0522;
    let la_lon = -118.2437;
    let distance = haversine_distance(nyc_lat, nyc_lon, la_lat, la_lon);
    assert!((distance - 3944.0).abs() < 100.0, "Expected ~3944km, got {}", distance);
}

#[test]
fn test_bounding_box_filtering() {
    let center_lat = 40.7128;
    let center_lon = -74.0060;
    let radius_km = 10.0;

    let bbox = calculate_bounding_box(center_lat, center_lon, radius_km);

    // A point inside the radius is inside the box
    let inside_lat = 40.71;
    let inside_lon = -74.0;
    assert!(inside_lat > bbox.min_lat && inside_lat < bbox.max_lat);
    assert!(inside_lon > bbox.min_lon && inside_lon < bbox.max_lon);

    let distance_to_inside = haversine_distance(center_lat, center_lon, inside_lat, inside_lon);
    assert!(distance_to_inside < radius_km, "Test point should be within radius");

    // Points far outside fall out of the box
    assert!(50.0 > bbox.max_lat);
    assert!(-80.0 < bbox.min_lon);
}

#[test]
fn test_max_limit_enforcement() {
    let engine = RankingEngine::with_defaults();
    let requester = create_test_profile("me", &["hiking"], 40.7128, -74.0060);

    let candidates: Vec<UserProfile> = (0..50)
        .map(|i| {
            create_test_profile(
                &i.to_string(),
                &["hiking"],
                40.72 + (i as f64 * 0.0001),
                -74.01,
            )
        })
        .collect();

    let result = engine.suggested(&requester, candidates, &HashSet::new(), 10);
    assert!(result.len() <= 10, "Should not exceed limit of 10");
}
