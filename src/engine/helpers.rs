use std::collections::HashSet;

use crate::entities::ExtractedPlace;

/// Drops places whose trimmed, lowercased name was already seen. Order of
/// first occurrences is kept.
pub fn dedup_places(places: Vec<ExtractedPlace>) -> Vec<ExtractedPlace> {
    let mut seen = HashSet::new();

    places
        .into_iter()
        .filter(|place| seen.insert(place.dedup_key()))
        .collect()
}

#[test]
fn dedup_keeps_first_occurrence() {
    use crate::entities::Category;

    let place = |name: &str, category| ExtractedPlace {
        name: name.into(),
        category,
        confidence: 0.5,
    };

    let places = dedup_places(vec![
        place("Blue Bottle", Category::Cafe),
        place("Yosemite", Category::Nature),
        place(" blue bottle ", Category::Restaurant),
        place("Ferry Building", Category::Shopping),
    ]);

    let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Blue Bottle", "Yosemite", "Ferry Building"]);
    assert_eq!(places[0].category, Category::Cafe);
}
