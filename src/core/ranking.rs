use crate::core::distance::{haversine_distance, round_km};
use crate::core::scoring::{
    activity_score, common_interest_count, interest_score, match_percentage, proximity_bonus,
    profile_completeness_score, ACTIVE_THRESHOLD, NEARBY_KM, SHARED_INTEREST_POINTS,
    SMART_SCORE_FLOOR,
};
use crate::models::{ScoreBreakdown, SuggestedProfile, UserProfile};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::cmp::Ordering;

/// Candidate ranking engine
///
/// Pure in-memory ranking over candidate profiles already materialized from
/// the directory. Every policy enforces the same exclusion rule: a returned
/// candidate is never the requester and never someone the requester has
/// already swiped on, regardless of decision.
///
/// # Policies
/// * `nearby` - location-filtered, directory order preserved
/// * `suggested` - shared-interest score with a flat proximity bonus
/// * `smart` - interest + profile completeness + activity recency
/// * `within_radius` - nearby variant centered on an arbitrary point
#[derive(Debug, Clone, Copy)]
pub struct RankingEngine {
    /// Default radius for the nearby policy (km)
    nearby_radius_km: f64,
    /// Radius constraint applied when a requester shares a location (km)
    proximity_radius_km: f64,
}

impl RankingEngine {
    pub fn new(nearby_radius_km: f64, proximity_radius_km: f64) -> Self {
        Self {
            nearby_radius_km,
            proximity_radius_km,
        }
    }

    pub fn with_defaults() -> Self {
        Self {
            nearby_radius_km: 10.0,
            proximity_radius_km: 50.0,
        }
    }

    pub fn nearby_radius_km(&self) -> f64 {
        self.nearby_radius_km
    }

    pub fn proximity_radius_km(&self) -> f64 {
        self.proximity_radius_km
    }

    /// Policy A: profiles near the requester, directory order preserved
    ///
    /// A requester without a shareable location degrades to the unfiltered
    /// variant: exclusion set and optional interest filter only.
    pub fn nearby(
        &self,
        requester: &UserProfile,
        candidates: Vec<UserProfile>,
        swiped: &HashSet<String>,
        interest_filters: Option<&[String]>,
        max_distance_km: Option<f64>,
        limit: usize,
    ) -> Vec<UserProfile> {
        let max_km = max_distance_km.unwrap_or(self.nearby_radius_km);

        match requester.shared_point() {
            Some((lat, lon)) => candidates
                .into_iter()
                .filter(|c| !self.is_excluded(requester, c, swiped))
                .filter(|c| c.share_location)
                .filter(|c| {
                    c.point()
                        .is_some_and(|(clat, clon)| {
                            haversine_distance(lat, lon, clat, clon) <= max_km
                        })
                })
                .filter(|c| matches_interest_filter(c, interest_filters))
                .take(limit)
                .collect(),
            None => candidates
                .into_iter()
                .filter(|c| !self.is_excluded(requester, c, swiped))
                .filter(|c| matches_interest_filter(c, interest_filters))
                .take(limit)
                .collect(),
        }
    }

    /// Policy B: rank by shared-interest overlap with a flat proximity bonus
    ///
    /// A requester with no interests falls back to the nearby candidate set
    /// with zero scores. A requester with a shareable location additionally
    /// constrains candidates to the proximity radius; an absent location
    /// silently skips that constraint.
    pub fn suggested(
        &self,
        requester: &UserProfile,
        candidates: Vec<UserProfile>,
        swiped: &HashSet<String>,
        limit: usize,
    ) -> Vec<SuggestedProfile> {
        let interests = &requester.interests;

        if interests.is_empty() {
            return self
                .nearby(requester, candidates, swiped, None, None, limit)
                .iter()
                .map(SuggestedProfile::unscored)
                .collect();
        }

        let constraint = requester.shared_point();

        let mut scored: Vec<(UserProfile, usize, f64)> = candidates
            .into_iter()
            .filter(|c| !self.is_excluded(requester, c, swiped))
            .filter(|c| self.within_proximity(c, constraint))
            .filter(|c| !c.interests.is_empty())
            .filter_map(|c| {
                let common = common_interest_count(interests, &c.interests);
                if common == 0 {
                    return None;
                }
                let score = common as f64 * SHARED_INTEREST_POINTS + proximity_bonus(&c);
                Some((c, common, score))
            })
            .collect();

        // Score descending, newer profiles first on ties
        scored.sort_by(|a, b| {
            b.2.partial_cmp(&a.2)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.0.created_at.cmp(&a.0.created_at))
        });
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(candidate, common, score)| SuggestedProfile {
                common_interests_count: common,
                match_percentage: match_percentage(common, interests.len()),
                score,
                ..SuggestedProfile::unscored(&candidate)
            })
            .collect()
    }

    /// Policy C: multi-factor smart suggestions
    ///
    /// Combines interest overlap, profile completeness, and activity recency;
    /// only candidates with a total above the score floor are returned.
    pub fn smart(
        &self,
        requester: &UserProfile,
        candidates: Vec<UserProfile>,
        swiped: &HashSet<String>,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Vec<SuggestedProfile> {
        let constraint = requester.shared_point();
        let requester_point = requester.point();

        let mut scored: Vec<(UserProfile, ScoreBreakdown, usize)> = candidates
            .into_iter()
            .filter(|c| !self.is_excluded(requester, c, swiped))
            .filter(|c| self.within_proximity(c, constraint))
            .filter_map(|c| {
                let interest = interest_score(&requester.interests, &c.interests);
                let profile = profile_completeness_score(&c);
                let activity = activity_score(c.created_at, now);
                let total = interest + profile + activity;

                if total <= SMART_SCORE_FLOOR {
                    return None;
                }

                let common = common_interest_count(&requester.interests, &c.interests);
                let breakdown = ScoreBreakdown {
                    interest,
                    profile,
                    activity,
                    total,
                };
                Some((c, breakdown, common))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.total
                .partial_cmp(&a.1.total)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.0.created_at.cmp(&a.0.created_at))
        });
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(candidate, breakdown, common)| {
                let distance = match (requester_point, candidate.point()) {
                    (Some((rlat, rlon)), Some((clat, clon))) => {
                        Some(round_km(haversine_distance(rlat, rlon, clat, clon)))
                    }
                    _ => None,
                };

                SuggestedProfile {
                    common_interests_count: common,
                    match_percentage: match_percentage(common, requester.interests.len()),
                    distance,
                    score: breakdown.total,
                    scores: Some(breakdown),
                    is_nearby: Some(distance.is_some_and(|d| d <= NEARBY_KM)),
                    is_active: Some(breakdown.activity > ACTIVE_THRESHOLD),
                    ..SuggestedProfile::unscored(&candidate)
                }
            })
            .collect()
    }

    /// Policy A variant centered on an arbitrary point instead of the
    /// requester's own location
    ///
    /// Returned candidates carry a distance from the center and zero scores.
    pub fn within_radius(
        &self,
        requester: &UserProfile,
        center: (f64, f64),
        candidates: Vec<UserProfile>,
        swiped: &HashSet<String>,
        radius_km: f64,
        limit: usize,
    ) -> Vec<SuggestedProfile> {
        let (lat, lon) = center;

        candidates
            .into_iter()
            .filter(|c| !self.is_excluded(requester, c, swiped))
            .filter(|c| c.share_location)
            .filter_map(|c| {
                let (clat, clon) = c.point()?;
                let distance = haversine_distance(lat, lon, clat, clon);
                if distance <= radius_km {
                    Some((c, distance))
                } else {
                    None
                }
            })
            .take(limit)
            .map(|(candidate, distance)| SuggestedProfile {
                distance: Some(round_km(distance)),
                ..SuggestedProfile::unscored(&candidate)
            })
            .collect()
    }

    /// Nearby pool annotated with interest-match info, best matches first
    pub fn with_match_info(
        &self,
        requester: &UserProfile,
        candidates: Vec<UserProfile>,
        swiped: &HashSet<String>,
        limit: usize,
    ) -> Vec<SuggestedProfile> {
        let pool = self.nearby(requester, candidates, swiped, None, None, limit * 2);

        let mut annotated: Vec<SuggestedProfile> = pool
            .iter()
            .map(|candidate| {
                let common = common_interest_count(&requester.interests, &candidate.interests);
                SuggestedProfile {
                    common_interests_count: common,
                    match_percentage: match_percentage(common, requester.interests.len()),
                    ..SuggestedProfile::unscored(candidate)
                }
            })
            .collect();

        annotated.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        annotated.truncate(limit);
        annotated
    }

    fn is_excluded(
        &self,
        requester: &UserProfile,
        candidate: &UserProfile,
        swiped: &HashSet<String>,
    ) -> bool {
        candidate.id == requester.id || swiped.contains(&candidate.id)
    }

    /// Proximity constraint applied when the requester shares a location
    fn within_proximity(&self, candidate: &UserProfile, constraint: Option<(f64, f64)>) -> bool {
        let Some((lat, lon)) = constraint else {
            return true;
        };

        candidate.share_location
            && candidate.point().is_some_and(|(clat, clon)| {
                haversine_distance(lat, lon, clat, clon) <= self.proximity_radius_km
            })
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn matches_interest_filter(candidate: &UserProfile, filters: Option<&[String]>) -> bool {
    match filters {
        Some(tags) if !tags.is_empty() => {
            candidate.interests.iter().any(|i| tags.contains(i))
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn profile(id: &str, interests: &[&str]) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            name: format!("User {}", id),
            gender: Some("female".to_string()),
            bio: None,
            photos: vec![],
            birthday: None,
            interests: interests.iter().map(|i| i.to_string()).collect(),
            coordinates: None,
            share_location: false,
            address: None,
            city: None,
            country: None,
            created_at: Some(Utc::now()),
        }
    }

    fn located(id: &str, interests: &[&str], lat: f64, lon: f64) -> UserProfile {
        let mut p = profile(id, interests);
        p.coordinates = Some([lon, lat]);
        p.share_location = true;
        p
    }

    fn swiped(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_nearby_filters_by_distance_and_preserves_order() {
        let engine = RankingEngine::with_defaults();
        let requester = located("me", &[], 10.77, 106.7);

        let candidates = vec![
            located("close-1", &[], 10.78, 106.7),  // ~1 km
            located("close-2", &[], 10.76, 106.71), // ~1.5 km
            located("far", &[], 11.5, 106.7),       // ~80 km
        ];

        let result = engine.nearby(&requester, candidates, &swiped(&[]), None, None, 10);
        let ids: Vec<&str> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["close-1", "close-2"]);
    }

    #[test]
    fn test_nearby_degrades_without_location() {
        let engine = RankingEngine::with_defaults();
        let requester = profile("me", &["hiking"]);

        let candidates = vec![
            profile("a", &["hiking"]),
            profile("b", &["jazz"]),
            located("c", &["hiking"], 10.77, 106.7),
        ];

        let filters = vec!["hiking".to_string()];
        let result = engine.nearby(&requester, candidates, &swiped(&[]), Some(&filters), None, 10);
        let ids: Vec<&str> = result.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_exclusion_applies_to_all_policies() {
        let engine = RankingEngine::with_defaults();
        let requester = profile("me", &["hiking"]);
        let already_swiped = swiped(&["seen"]);

        let make_candidates = || {
            vec![
                profile("me", &["hiking"]),   // self, must never appear
                profile("seen", &["hiking"]), // swiped, must never appear
                profile("fresh", &["hiking"]),
            ]
        };

        let nearby = engine.nearby(&requester, make_candidates(), &already_swiped, None, None, 10);
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].id, "fresh");

        let suggested = engine.suggested(&requester, make_candidates(), &already_swiped, 10);
        assert_eq!(suggested.len(), 1);
        assert_eq!(suggested[0].profile.id, "fresh");

        let smart = engine.smart(&requester, make_candidates(), &already_swiped, Utc::now(), 10);
        assert!(smart.iter().all(|s| s.profile.id == "fresh"));
    }

    #[test]
    fn test_suggested_scores_and_orders() {
        let engine = RankingEngine::with_defaults();
        let requester = profile("me", &["hiking", "jazz"]);

        let candidates = vec![
            profile("one-shared", &["hiking", "cooking"]),
            profile("two-shared", &["hiking", "jazz"]),
            located("one-shared-located", &["jazz"], 10.77, 106.7),
            profile("none-shared", &["cooking"]),
        ];

        let result = engine.suggested(&requester, candidates, &swiped(&[]), 10);

        // proximity bonus (100) beats an extra shared interest (10)
        let ids: Vec<&str> = result.iter().map(|s| s.profile.id.as_str()).collect();
        assert_eq!(ids, vec!["one-shared-located", "two-shared", "one-shared"]);

        assert_eq!(result[0].score, 110.0);
        assert_eq!(result[1].score, 20.0);
        assert_eq!(result[2].score, 10.0);
        assert_eq!(result[1].match_percentage, 100);
        assert_eq!(result[2].match_percentage, 50);
    }

    #[test]
    fn test_suggested_without_interests_falls_back_unscored() {
        let engine = RankingEngine::with_defaults();
        let requester = profile("me", &[]);

        let candidates = vec![profile("a", &["hiking"]), profile("b", &[])];
        let result = engine.suggested(&requester, candidates, &swiped(&[]), 10);

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|s| s.score == 0.0 && s.match_percentage == 0));
    }

    #[test]
    fn test_suggested_proximity_constraint_when_shared() {
        let engine = RankingEngine::with_defaults();
        let requester = located("me", &["hiking"], 10.77, 106.7);

        let candidates = vec![
            located("near", &["hiking"], 10.8, 106.7),
            located("far", &["hiking"], 15.0, 106.7), // ~470 km
            profile("unlocated", &["hiking"]),        // no shareable location
        ];

        let result = engine.suggested(&requester, candidates, &swiped(&[]), 10);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].profile.id, "near");
    }

    #[test]
    fn test_smart_total_is_sum_and_floor_applies() {
        let engine = RankingEngine::with_defaults();
        let requester = profile("me", &["hiking", "jazz"]);
        let now = Utc::now();

        let mut strong = profile("strong", &["hiking", "jazz"]);
        strong.bio = Some("hello".to_string());
        strong.photos = vec!["p.jpg".to_string()];
        strong.created_at = Some(now - Duration::days(14));

        // ancient empty profile: activity 100 - 5*(700/7) = -400, total < 30
        let mut stale = profile("stale", &[]);
        stale.gender = None;
        stale.created_at = Some(now - Duration::days(700));

        let result = engine.smart(&requester, vec![strong, stale], &swiped(&[]), now, 10);

        assert_eq!(result.len(), 1);
        let s = &result[0];
        assert_eq!(s.profile.id, "strong");

        let scores = s.scores.expect("smart results carry sub-scores");
        // gender +10, bio +10, photos +20
        assert!((scores.interest - 30.0).abs() < 1e-9);
        assert!((scores.profile - 40.0).abs() < 1e-9);
        assert!((scores.activity - 90.0).abs() < 0.01);
        assert!((scores.total - (scores.interest + scores.profile + scores.activity)).abs() < 1e-9);
        assert_eq!(s.is_active, Some(true));
    }

    #[test]
    fn test_smart_distance_and_nearby_flag() {
        let engine = RankingEngine::with_defaults();
        let requester = located("me", &["hiking"], 10.77, 106.7);
        let now = Utc::now();

        let mut coincident = located("twin", &["hiking"], 10.77, 106.7);
        coincident.created_at = Some(now);

        let result = engine.smart(&requester, vec![coincident], &swiped(&[]), now, 10);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].distance, Some(0.0));
        assert_eq!(result[0].is_nearby, Some(true));
    }

    #[test]
    fn test_smart_without_location_keeps_all_candidates() {
        let engine = RankingEngine::with_defaults();
        let requester = profile("me", &["hiking"]);
        let now = Utc::now();

        let mut far = located("far", &["hiking"], 48.85, 2.35);
        far.created_at = Some(now);

        let result = engine.smart(&requester, vec![far], &swiped(&[]), now, 10);
        assert_eq!(result.len(), 1);
        // no distance without requester coordinates
        assert_eq!(result[0].distance, None);
        assert_eq!(result[0].is_nearby, Some(false));
    }

    #[test]
    fn test_within_radius_zero_scores_with_distance() {
        let engine = RankingEngine::with_defaults();
        let requester = profile("me", &[]);

        let candidates = vec![
            located("inside", &[], 10.78, 106.7),
            located("outside", &[], 11.5, 106.7),
        ];

        let result = engine.within_radius(
            &requester,
            (10.77, 106.7),
            candidates,
            &swiped(&[]),
            5.0,
            50,
        );

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].profile.id, "inside");
        assert!(result[0].distance.is_some());
        assert_eq!(result[0].score, 0.0);
        assert_eq!(result[0].match_percentage, 0);
    }

    #[test]
    fn test_with_match_info_sorts_by_percentage() {
        let engine = RankingEngine::with_defaults();
        let requester = profile("me", &["hiking", "jazz"]);

        let candidates = vec![
            profile("half", &["hiking"]),
            profile("full", &["hiking", "jazz"]),
            profile("none", &["cooking"]),
        ];

        let result = engine.with_match_info(&requester, candidates, &swiped(&[]), 10);
        let ids: Vec<&str> = result.iter().map(|s| s.profile.id.as_str()).collect();
        assert_eq!(ids, vec!["full", "half", "none"]);
        assert_eq!(result[0].match_percentage, 100);
        assert_eq!(result[1].match_percentage, 50);
    }

    #[test]
    fn test_limit_respected_everywhere() {
        let engine = RankingEngine::with_defaults();
        let requester = profile("me", &["hiking"]);
        let now = Utc::now();

        let candidates: Vec<UserProfile> = (0..30)
            .map(|i| {
                let mut p = profile(&format!("c{}", i), &["hiking"]);
                p.photos = vec!["p.jpg".to_string()];
                p.created_at = Some(now - Duration::days(i));
                p
            })
            .collect();

        assert!(engine.suggested(&requester, candidates.clone(), &swiped(&[]), 5).len() <= 5);
        assert!(engine.smart(&requester, candidates.clone(), &swiped(&[]), now, 5).len() <= 5);
        assert!(engine.nearby(&requester, candidates, &swiped(&[]), None, None, 5).len() <= 5);
    }

    #[test]
    fn test_idempotent_ordering() {
        let engine = RankingEngine::with_defaults();
        let requester = profile("me", &["hiking", "jazz"]);
        let now = Utc::now();

        let candidates: Vec<UserProfile> = (0..10)
            .map(|i| {
                let mut p = profile(&format!("c{}", i), &["hiking"]);
                p.created_at = Some(now - Duration::days(i % 3));
                p
            })
            .collect();

        let first = engine.smart(&requester, candidates.clone(), &swiped(&[]), now, 10);
        let second = engine.smart(&requester, candidates, &swiped(&[]), now, 10);

        let first_ids: Vec<&str> = first.iter().map(|s| s.profile.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|s| s.profile.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }
}
