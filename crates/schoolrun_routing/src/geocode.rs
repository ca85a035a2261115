use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::GeocodeError,
    gazetteer::{Gazetteer, Place, normalize_key},
    geopoint::GeoPoint,
    router_params::RouterParams,
};

/// Words shorter than this never count towards the word overlap.
const MIN_WORD_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Unmatched queries resolve to the default location plus jitter.
    #[default]
    Jittered,
    /// Unmatched queries fail with [`GeocodeError::NoMatch`].
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeocodeMatch {
    Exact { place: String },
    Fuzzy { place: String, key: String, score: f64 },
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct Geocoded {
    pub point: GeoPoint,
    pub matched: GeocodeMatch,
}

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= MIN_WORD_LEN)
        .collect()
}

/// Similarity of an already-normalized query against one gazetteer key.
///
/// Containment in either direction adds `shorter / longer` (by character
/// count). Word overlap adds the share of matching words over the larger of
/// the two word counts.
pub fn score_key(query: &str, key: &str) -> f64 {
    let mut score = 0.0;

    if !query.is_empty() && (key.contains(query) || query.contains(key)) {
        let query_len = query.chars().count() as f64;
        let key_len = key.chars().count() as f64;
        score += query_len.min(key_len) / query_len.max(key_len);
    }

    let query_words = words(query);
    let key_words = words(key);
    let total = query_words.len().max(key_words.len());
    if total > 0 {
        let matched = query_words
            .iter()
            .filter(|word| key_words.contains(word))
            .count();
        score += matched as f64 / total as f64;
    }

    score
}

/// Highest scoring key. On equal scores the first-defined key is kept.
pub fn best_match<'a>(gazetteer: &'a Gazetteer, query: &str) -> Option<(&'a str, &'a Place, f64)> {
    let mut best: Option<(&str, &Place, f64)> = None;

    for (key, place) in gazetteer.keys() {
        let score = score_key(query, key);
        match best {
            Some((_, _, best_score)) if score <= best_score => {}
            _ => best = Some((key, place, score)),
        }
    }

    best
}

pub fn geocode<R: Rng + ?Sized>(
    gazetteer: &Gazetteer,
    query: &str,
    params: &RouterParams,
    rng: &mut R,
) -> Result<Geocoded, GeocodeError> {
    let normalized = normalize_key(query);
    if normalized.is_empty() {
        return Err(GeocodeError::InvalidQuery);
    }

    if let Some(place) = gazetteer.exact(&normalized) {
        debug!("Geocode \"{}\": exact match {}", query, place.name);
        return Ok(Geocoded {
            point: place.point,
            matched: GeocodeMatch::Exact {
                place: place.name.clone(),
            },
        });
    }

    if let Some((key, place, score)) = best_match(gazetteer, &normalized) {
        if score > params.match_threshold {
            debug!(
                "Geocode \"{}\": fuzzy match {} via \"{}\" (score {:.3})",
                query, place.name, key, score
            );
            return Ok(Geocoded {
                point: place.point,
                matched: GeocodeMatch::Fuzzy {
                    place: place.name.clone(),
                    key: key.to_string(),
                    score,
                },
            });
        }
    }

    match params.fallback_policy {
        FallbackPolicy::Reject => Err(GeocodeError::NoMatch(query.trim().to_string())),
        FallbackPolicy::Jittered => {
            warn!(
                "Geocode \"{}\": no match, falling back to default location",
                query
            );
            let jitter = params.fallback_jitter;
            let point = params.default_location.offset(
                rng.random_range(-jitter..=jitter),
                rng.random_range(-jitter..=jitter),
            );

            Ok(Geocoded {
                point,
                matched: GeocodeMatch::Fallback,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};

    use super::*;

    #[test]
    fn test_score_containment_and_words() {
        // 9 / 20 for containment, 1 / 3 for words
        let score = score_key("docklands", "uel docklands campus");
        assert!((score - (9.0 / 20.0 + 1.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_score_ignores_short_words() {
        assert_eq!(score_key("of", "university of east london"), 2.0 / 25.0);
        assert_eq!(score_key("xyz abc", "se1 9sp"), 0.0);
    }

    #[test]
    fn test_tie_keeps_first_defined() {
        let gazetteer = Gazetteer::new(vec![
            Place {
                name: "north gate".to_string(),
                aliases: vec![],
                point: GeoPoint::new(51.0, 0.0),
            },
            Place {
                name: "south gate".to_string(),
                aliases: vec![],
                point: GeoPoint::new(52.0, 0.0),
            },
        ])
        .unwrap();

        let (key, place, _) = best_match(&gazetteer, "gate").unwrap();
        assert_eq!(key, "north gate");
        assert_eq!(place.point, GeoPoint::new(51.0, 0.0));
    }

    #[test]
    fn test_fuzzy_match() {
        let mut rng = SmallRng::seed_from_u64(0);
        let geocoded = geocode(
            Gazetteer::builtin(),
            "Docklands campus",
            &RouterParams::default(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(geocoded.point, GeoPoint::new(51.5077, 0.0650));
        assert!(matches!(
            geocoded.matched,
            GeocodeMatch::Fuzzy { ref place, .. } if place == "uel docklands campus"
        ));
    }

    #[test]
    fn test_empty_query() {
        let mut rng = SmallRng::seed_from_u64(0);
        let result = geocode(
            Gazetteer::builtin(),
            "   ",
            &RouterParams::default(),
            &mut rng,
        );
        assert_eq!(result, Err(GeocodeError::InvalidQuery));
    }

    #[test]
    fn test_reject_policy() {
        let mut rng = SmallRng::seed_from_u64(0);
        let params = RouterParams {
            fallback_policy: FallbackPolicy::Reject,
            ..RouterParams::default()
        };

        let result = geocode(Gazetteer::builtin(), "Atlantis", &params, &mut rng);
        assert_eq!(result, Err(GeocodeError::NoMatch("Atlantis".to_string())));
    }
}
