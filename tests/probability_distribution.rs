//! Journey odds and encounter distances with the default tables.

use waylay::{
    calculate_encounter_probabilities, calculate_encounter_probability_distribution, create_rng,
    DistanceRoller, EncounterContext, GenerationConfig, Generator, Road, Tables, TimeOfDay,
    TravelInstance, TravelMedium, TravelPace, WaylayResult,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_highway_at_fast_pace() {
    let tables = Tables::default();
    let context = EncounterContext::new()
        .with_biome("Tundra")
        .with_road(Road::Highway)
        .with_travel_pace(TravelPace::Fast);

    // Road first, then pace on the road-adjusted odds
    let set = calculate_encounter_probabilities(&tables, &context);
    assert!(close(set.combat, 0.21 * 0.65 * 1.2));
    assert!(close(set.non_combat, 0.03 * 1.2 * 0.8));
    assert!(close(set.hazard, 0.05 * 0.8 * 1.2));
    assert!(close(set.total, set.combat + set.non_combat + set.hazard));
}

#[test]
fn test_unknown_biome_has_no_encounters() {
    let tables = Tables::default();
    let context = EncounterContext::new().with_biome("astral sea");
    let set = calculate_encounter_probabilities(&tables, &context);
    assert_eq!(set.total, 0.0);

    let journey = [TravelInstance::new(context, 3)];
    let distribution = calculate_encounter_probability_distribution(&journey, &tables);
    assert_eq!(distribution.cumulative[0].probability, 1.0);
    assert!(distribution.cumulative[1..].iter().all(|c| c.probability == 0.0));
}

#[test]
fn test_journey_distribution_is_decreasing() {
    let tables = Tables::default();
    let day = EncounterContext::new().with_biome("tundra");
    let night = day.clone().with_time_of_day(TimeOfDay::Night);
    let journey = [TravelInstance::new(day, 3), TravelInstance::new(night, 3)];

    let distribution = calculate_encounter_probability_distribution(&journey, &tables);
    assert_eq!(distribution.total_rolls, 6);
    assert_eq!(distribution.combat.len(), 7);

    // Mean combat chance is (0.21 + 0.24) / 2
    let p: f64 = 0.225;
    assert!(close(distribution.combat[0].probability, (1.0 - p).powi(6)));
    assert!(close(distribution.combat[1].probability, 1.0 - (1.0 - p).powi(6)));
    assert!(close(distribution.combat[6].probability, p.powi(6)));

    let tail = &distribution.combat[1..];
    assert!(tail.windows(2).all(|w| w[0].probability >= w[1].probability));
}

#[test]
fn test_journey_from_json() -> WaylayResult<()> {
    let journey: Vec<TravelInstance> = serde_json::from_str(
        r#"[
            {"biome": "tundra", "road": "highway", "quantity": 2},
            {"biome": "tundra", "time_of_day": "night"}
        ]"#,
    )?;
    let distribution = calculate_encounter_probability_distribution(&journey, &Tables::default());
    assert_eq!(distribution.total_rolls, 3);
    assert_eq!(distribution.hazard.len(), 4);
    Ok(())
}

#[test]
fn test_distance_roller_stays_in_range() -> WaylayResult<()> {
    let tables = Tables::default();
    let forest = EncounterContext::new().with_biome("temperate conifer forests");
    let roller = DistanceRoller::new(&tables.distances, &forest);
    assert_eq!(roller.dice().to_string(), "2d8 x 10");

    for seed in 0..50 {
        let config = GenerationConfig::new(seed);
        let feet = roller.generate(&config, &mut create_rng(&config))?;
        assert!((20..=160).contains(&feet));
        assert_eq!(feet % 10, 0);
    }
    Ok(())
}

#[test]
fn test_sea_travel_overrides_biome() -> WaylayResult<()> {
    let tables = Tables::default();
    let context = EncounterContext::new()
        .with_biome("tundra")
        .with_travel_medium(TravelMedium::Sea);
    let roller = DistanceRoller::new(&tables.distances, &context);
    assert_eq!(roller.dice().to_string(), "8d6 x 10");

    let config = GenerationConfig::for_testing(5);
    let feet = roller.generate(&config, &mut create_rng(&config))?;
    assert!((80..=480).contains(&feet));
    Ok(())
}
