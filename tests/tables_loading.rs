//! Loading tables and catalogs from files.

use std::io::Write;
use tempfile::NamedTempFile;
use waylay::{
    calculate_encounter_probabilities, compute_xp_bounds, roll_encounter_distance, Catalog,
    Difficulty, EncounterContext, Road, Tables, TimeOfDay, TravelMedium, TravelPace, WaylayError,
    WaylayResult,
};

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_house_rules_override_some_tables() -> WaylayResult<()> {
    let file = write_temp(
        r#"{
            "encounter_probabilities": {
                "salt flats": {
                    "day":   {"combat": 0.1, "non_combat": 0.1, "hazard": 0.3},
                    "night": {"combat": 0.3, "non_combat": 0.0, "hazard": 0.3}
                }
            },
            "pace_modifiers": {
                "fast": {
                    "day":   {"combat": 0.05, "non_combat": 0.0, "hazard": 0.1, "percent_type": 1},
                    "night": {"combat": 0.05, "non_combat": 0.0, "hazard": 0.1, "percent_type": 1}
                }
            },
            "xp_thresholds": [
                {"char_level": 1, "easy": 30, "medium": 60, "hard": 90, "deadly": 120}
            ]
        }"#,
    );
    let tables = Tables::load(file.path())?;

    let context = EncounterContext::new()
        .with_biome("Salt Flats")
        .with_time_of_day(TimeOfDay::Night)
        .with_travel_pace(TravelPace::Fast);
    let set = calculate_encounter_probabilities(&tables, &context);
    assert!((set.combat - 0.35).abs() < 1e-12);
    assert!((set.hazard - 0.4).abs() < 1e-12);
    assert!((set.total - 0.75).abs() < 1e-12);

    // The replaced pace table has no slow row, so slow travel is unmodified
    let slow = calculate_encounter_probabilities(
        &tables,
        &context.clone().with_travel_pace(TravelPace::Slow),
    );
    assert!((slow.combat - 0.3).abs() < 1e-12);

    // Road modifiers were not overridden
    assert!(tables.road_modifiers.contains_key(&Road::Royalway));

    // Any level reads the single row; trivial falls back to medium
    let budget = compute_xp_bounds(&tables.xp_thresholds, 9.0, 2, Difficulty::Trivial);
    assert_eq!(budget.lower_bound, 120);
    assert_eq!(budget.upper_bound, 120);
    Ok(())
}

#[test]
fn test_distance_override() -> WaylayResult<()> {
    let file = write_temp(
        r#"{"distances": {"Waterborne": {"number_of_dice": 1, "number_of_sides": 1, "multiplier": 500}}}"#,
    );
    let tables = Tables::load(file.path())?;
    let mut rng = rand::thread_rng();
    assert_eq!(
        roll_encounter_distance(&tables.distances, None, Some(TravelMedium::Sea), &mut rng),
        500
    );
    // Land travel has no entries left and falls back to 2d6 x 10
    let land = roll_encounter_distance(&tables.distances, Some("tundra"), None, &mut rng);
    assert!((20..=120).contains(&land));
    Ok(())
}

#[test]
fn test_catalog_file() -> WaylayResult<()> {
    let file = write_temp(
        r#"[
            {"name": "Wyvern", "cr": 6, "habitat": ["Hill", "Mountain"], "url": "https://example.org/wyvern"},
            {"name": "Kobold", "cr": 0.125, "cr_text": "1/8", "leaders": ["Wyvern"]}
        ]"#,
    );
    let catalog = Catalog::load(file.path())?;
    assert_eq!(catalog.len(), 2);
    let kobold = catalog.get("KOBOLD").unwrap();
    assert_eq!(kobold.cr_text.as_deref(), Some("1/8"));
    assert_eq!(kobold.relationships.leaders, vec!["Wyvern".to_string()]);
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let result = Tables::load("/nonexistent/waylay/tables.json");
    assert!(matches!(result, Err(WaylayError::Io(_))));
}

#[test]
fn test_malformed_catalog_is_serde_error() {
    let file = write_temp(r#"[{"name": "Nameless"}]"#);
    let result = Catalog::load(file.path());
    assert!(matches!(result, Err(WaylayError::Serde(_))));
}
