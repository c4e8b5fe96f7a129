use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cafe,
    Restaurant,
    Attraction,
    Nature,
    Shopping,
    Other,
}

/// A place candidate as returned by the extraction model, before geocoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPlace {
    pub name: String,
    pub category: Category,
    pub confidence: f64,
}

impl ExtractedPlace {
    /// Checks the fields the typed parse cannot enforce.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is empty".into());
        }

        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!("confidence {} outside [0, 1]", self.confidence));
        }

        Ok(())
    }

    /// Key used for local deduplication.
    pub fn dedup_key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolvedPlace {
    pub id: Uuid,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub category: Category,
    pub confidence: f64,
}

impl ResolvedPlace {
    pub fn new(place: ExtractedPlace, coordinates: Coordinates) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: place.name,
            lat: coordinates.lat,
            lng: coordinates.lng,
            category: place.category,
            confidence: place.confidence,
        }
    }
}

#[test]
fn category_wire_names() {
    let names = ["cafe", "restaurant", "attraction", "nature", "shopping", "other"];
    let categories: Vec<Category> = serde_json::from_value(serde_json::json!(names)).unwrap();

    assert_eq!(categories[0], Category::Cafe);
    assert_eq!(categories[5], Category::Other);
    assert_eq!(
        serde_json::to_value(&categories).unwrap(),
        serde_json::json!(names)
    );

    assert!(serde_json::from_str::<Category>(r#""museum""#).is_err());
}

#[test]
fn validate_rejects_bad_entries() {
    let place = ExtractedPlace {
        name: "Blue Bottle".into(),
        category: Category::Cafe,
        confidence: 0.9,
    };
    assert!(place.validate().is_ok());

    let blank = ExtractedPlace {
        name: "   ".into(),
        ..place.clone()
    };
    assert!(blank.validate().is_err());

    let too_confident = ExtractedPlace {
        confidence: 1.5,
        ..place.clone()
    };
    assert!(too_confident.validate().is_err());

    let nan = ExtractedPlace {
        confidence: f64::NAN,
        ..place
    };
    assert!(nan.validate().is_err());
}

#[test]
fn resolved_places_get_fresh_ids() {
    let place = ExtractedPlace {
        name: "Yosemite".into(),
        category: Category::Nature,
        confidence: 0.8,
    };
    let coordinates = Coordinates {
        lat: 37.8651,
        lng: -119.5383,
    };

    let a = ResolvedPlace::new(place.clone(), coordinates);
    let b = ResolvedPlace::new(place, coordinates);

    assert_ne!(a.id, b.id);
    assert_eq!(a.name, "Yosemite");
    assert_eq!(a.lat, 37.8651);
    assert_eq!(a.category, Category::Nature);
}
