use std::{fs::File, io::BufReader, path::Path, sync::LazyLock};

use fxhash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::GazetteerError, geopoint::GeoPoint, meters::Meters};

/// A named place. Every key (the name and each alias) resolves to `point`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(flatten)]
    pub point: GeoPoint,
}

impl Place {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

// name, aliases, lat, lng
const BUILTIN_PLACES: &[(&str, &[&str], f64, f64)] = &[
    ("london bridge", &["london bridge station", "se1 9sp"], 51.5079, -0.0877),
    ("tower bridge", &[], 51.5055, -0.0754),
    ("central london", &["charing cross", "trafalgar square", "wc2n 5dn"], 51.5074, -0.1278),
    ("westminster", &["sw1a 0aa"], 51.4995, -0.1248),
    ("waterloo", &["waterloo station", "se1 8sw"], 51.5031, -0.1132),
    ("king's cross", &["kings cross", "n1c 4ah"], 51.5308, -0.1238),
    ("liverpool street", &["ec2m 7pp"], 51.5178, -0.0823),
    ("canary wharf", &["e14 5ab"], 51.5054, -0.0235),
    ("greenwich", &["se10 9nf"], 51.4826, -0.0077),
    ("stratford", &["stratford station", "e15 1az"], 51.5416, -0.0033),
    ("uel stratford campus", &["university of east london stratford", "e15 4lz"], 51.5383, 0.0045),
    ("royal docks", &["royal victoria", "e16 1xl"], 51.5091, 0.0175),
    ("beckton", &["e6 6lh"], 51.5145, 0.0610),
    ("uel docklands campus", &["university of east london", "uel docklands", "e16 2rd"], 51.5077, 0.0650),
    ("east ham", &["e6 2ns"], 51.5390, 0.0515),
    ("barking", &["barking station", "ig11 8tu"], 51.5396, 0.0810),
    ("ilford", &["ig1 1ua"], 51.5590, 0.0741),
    ("dagenham heathway", &["rm9 5ad"], 51.5417, 0.1477),
    ("rm10 9qb", &["dagenham east", "dagenham"], 51.5450, 0.1640),
    ("barking riverside", &["ig11 0fj"], 51.5190, 0.1140),
    ("romford", &["romford station", "rm1 1sx"], 51.5750, 0.1830),
];

static BUILTIN: LazyLock<Gazetteer> = LazyLock::new(|| {
    let places = BUILTIN_PLACES
        .iter()
        .map(|&(name, aliases, lat, lng)| Place {
            name: name.to_string(),
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
            point: GeoPoint::new(lat, lng),
        })
        .collect();

    Gazetteer::from_trusted(places)
});

/// Read-only table of known places, kept in definition order.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    places: Vec<Place>,
    index: FxHashMap<String, usize>,
}

impl Gazetteer {
    pub fn builtin() -> &'static Gazetteer {
        &BUILTIN
    }

    /// Builds a gazetteer from arbitrary places. Keys are lowercased and must be unique,
    /// points must be valid WGS84 coordinates.
    pub fn new(places: Vec<Place>) -> Result<Self, GazetteerError> {
        let mut normalized = Vec::with_capacity(places.len());
        let mut index = FxHashMap::default();

        for place in places {
            if !place.point.is_valid() {
                return Err(GazetteerError::InvalidCoordinate {
                    name: place.name,
                    lat: place.point.lat,
                    lng: place.point.lng,
                });
            }

            let place = Place {
                name: normalize_key(&place.name),
                aliases: place.aliases.iter().map(|alias| normalize_key(alias)).collect(),
                point: place.point,
            };

            for key in place.keys() {
                if key.is_empty() {
                    return Err(GazetteerError::EmptyKey);
                }
                if index.insert(key.to_string(), normalized.len()).is_some() {
                    return Err(GazetteerError::DuplicateKey(key.to_string()));
                }
            }

            normalized.push(place);
        }

        Ok(Self {
            places: normalized,
            index,
        })
    }

    fn from_trusted(places: Vec<Place>) -> Self {
        let mut index = FxHashMap::default();
        for (place_index, place) in places.iter().enumerate() {
            for key in place.keys() {
                index.entry(key.to_string()).or_insert(place_index);
            }
        }

        Self { places, index }
    }

    /// The built-in places followed by the places listed in a JSON file.
    pub fn builtin_with_file<P: AsRef<Path>>(path: P) -> Result<Self, GazetteerError> {
        let file = File::open(path.as_ref())?;
        let extra: Vec<Place> = serde_json::from_reader(BufReader::new(file))?;

        debug!(
            "Loaded {} extra places from {}",
            extra.len(),
            path.as_ref().display()
        );

        let mut places = Gazetteer::builtin().places.clone();
        places.extend(extra);
        Gazetteer::new(places)
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Every key with its place, in definition order: a place's name comes before its aliases.
    pub fn keys(&self) -> impl Iterator<Item = (&str, &Place)> {
        self.places
            .iter()
            .flat_map(|place| place.keys().map(move |key| (key, place)))
    }

    pub fn exact(&self, key: &str) -> Option<&Place> {
        self.index.get(key).map(|&index| &self.places[index])
    }

    pub fn place(&self, name: &str) -> Option<&Place> {
        self.exact(&normalize_key(name))
    }

    /// Closest place within `max_distance`. Ties go to the first-defined place.
    pub fn nearest_place(&self, point: &GeoPoint, max_distance: Meters) -> Option<&Place> {
        let mut best: Option<(&Place, Meters)> = None;

        for place in &self.places {
            let distance = place.point.haversine_distance(point);
            if distance > max_distance {
                continue;
            }

            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((place, distance)),
            }
        }

        best.map(|(place, _)| place)
    }
}

pub(crate) fn normalize_key(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
