use crate::models::UserProfile;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Points per shared interest under the suggested policy
pub const SHARED_INTEREST_POINTS: f64 = 10.0;
/// Flat bonus for a candidate with a shareable location (independent of distance)
pub const PROXIMITY_BONUS: f64 = 100.0;
/// Points per shared interest under the smart policy
pub const SMART_INTEREST_POINTS: f64 = 15.0;
/// Default activity score when a profile carries no creation timestamp
pub const DEFAULT_ACTIVITY_SCORE: f64 = 50.0;
/// Activity decay in points per elapsed week since profile creation
pub const ACTIVITY_DECAY_PER_WEEK: f64 = 5.0;
/// Smart candidates must exceed this total score to be returned
pub const SMART_SCORE_FLOOR: f64 = 30.0;
/// Activity score above which a candidate is reported as active
pub const ACTIVE_THRESHOLD: f64 = 70.0;
/// Distance at or under which a candidate is reported as nearby
pub const NEARBY_KM: f64 = 10.0;

/// Number of distinct interests shared between two tag lists
///
/// Set-intersection semantics: duplicate tags count once.
pub fn common_interest_count(requester: &[String], candidate: &[String]) -> usize {
    let requester_tags: HashSet<&str> = requester.iter().map(String::as_str).collect();
    let candidate_tags: HashSet<&str> = candidate.iter().map(String::as_str).collect();
    candidate_tags.intersection(&requester_tags).count()
}

/// Percentage of the requester's interests the candidate shares
///
/// Always in [0, 100]; 0 when the requester has no interests.
#[inline]
pub fn match_percentage(common: usize, requester_interest_count: usize) -> u32 {
    if requester_interest_count == 0 {
        return 0;
    }
    (common as f64 / requester_interest_count as f64 * 100.0).round() as u32
}

/// Pairwise match rate between two users' interest lists
///
/// `round(common / max(|a|, |b|) * 100)`; 0 if either list is empty.
pub fn match_rate(a: &[String], b: &[String]) -> u32 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let common = common_interest_count(a, b);
    let max_possible = a.len().max(b.len());
    (common as f64 / max_possible as f64 * 100.0).round() as u32
}

/// Interest component of the smart score
///
/// 0 when the requester has no interests, else 15 points per shared interest.
#[inline]
pub fn interest_score(requester_interests: &[String], candidate_interests: &[String]) -> f64 {
    if requester_interests.is_empty() {
        return 0.0;
    }
    common_interest_count(requester_interests, candidate_interests) as f64 * SMART_INTEREST_POINTS
}

/// Flat bonus for candidates with coordinates and sharing enabled
#[inline]
pub fn proximity_bonus(candidate: &UserProfile) -> f64 {
    if candidate.has_shareable_location() {
        PROXIMITY_BONUS
    } else {
        0.0
    }
}

/// Profile completeness component of the smart score
///
/// Fixed bonuses, maximum 65:
///   +10 non-empty gender, +10 non-empty bio, +20 at least one photo,
///   +10 birthday present, +15 coordinates with sharing enabled
pub fn profile_completeness_score(candidate: &UserProfile) -> f64 {
    let mut score = 0.0;

    if candidate.gender.as_deref().is_some_and(|g| !g.is_empty()) {
        score += 10.0;
    }
    if candidate.bio.as_deref().is_some_and(|b| !b.is_empty()) {
        score += 10.0;
    }
    if candidate.has_photos() {
        score += 20.0;
    }
    if candidate.birthday.is_some() {
        score += 10.0;
    }
    if candidate.has_shareable_location() {
        score += 15.0;
    }

    score
}

/// Activity component of the smart score
///
/// `100 - 5 * (age_in_days / 7)` with fractional days; decays 5 points per
/// elapsed week since creation and is unbounded below. Profiles with no
/// creation timestamp default to 50.
pub fn activity_score(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(created) = created_at else {
        return DEFAULT_ACTIVITY_SCORE;
    };

    let age_days = (now - created).num_milliseconds() as f64 / (1000.0 * 60.0 * 60.0 * 24.0);
    100.0 - ACTIVITY_DECAY_PER_WEEK * (age_days / 7.0)
}
