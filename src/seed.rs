use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::info;

use crate::store::{StoreError, TripStore};
use crate::trip::NewTrip;

// ─── Name pools ──────────────────────────────────────────────────

static PLACES: &[&str] = &[
    "Kyoto",
    "Lisbon",
    "Reykjavik",
    "Cusco",
    "Hanoi",
    "Marrakesh",
    "Queenstown",
    "Tbilisi",
    "Ladakh",
    "Zanzibar",
    "Hampi",
    "Porto",
];

static HOTELS: &[&str] = &[
    "Riverside Inn",
    "The Old Mill",
    "Harbour View",
    "Mountain Lodge",
    "Casa Azul",
    "Sunset Hostel",
    "Garden Suites",
    "Station Hotel",
];

static TRIP_TYPES: &[&str] = &["backpacking", "leisure", "business"];

static MOODS: &[&str] = &[
    "unforgettable",
    "relaxing",
    "exhausting but worth it",
    "full of surprises",
    "too short",
];

// ─── Public entry point ──────────────────────────────────────────

/// Insert `count` sample trips. Deterministic RNG so re-runs produce the
/// same data (ids and timestamps still differ).
pub async fn seed(store: &dyn TripStore, count: usize) -> Result<usize, StoreError> {
    let start = Instant::now();
    info!(count, "seeding sample trips");

    let mut rng = StdRng::seed_from_u64(42);
    for i in 0..count {
        store.insert(sample_trip(&mut rng, i)).await?;
    }

    info!(
        count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "seed complete"
    );
    Ok(count)
}

fn sample_trip(rng: &mut StdRng, i: usize) -> NewTrip {
    let place = PLACES[rng.gen_range(0..PLACES.len())];
    let also = PLACES[rng.gen_range(0..PLACES.len())];
    let hotel = HOTELS[rng.gen_range(0..HOTELS.len())];
    let trip_type = TRIP_TYPES[rng.gen_range(0..TRIP_TYPES.len())];
    let mood = MOODS[rng.gen_range(0..MOODS.len())];
    let day = rng.gen_range(1..=20u32);
    let nights = rng.gen_range(2..=8u32);

    NewTrip {
        trip_name: format!("{place} #{}", i + 1),
        start_date_of_journey: format!("2024-03-{day:02}"),
        end_date_of_journey: format!("2024-03-{:02}", day + nights),
        name_of_hotels: hotel.to_string(),
        places_visited: format!("{place}, {also}"),
        total_cost: rng.gen_range(150..=5_000u32) as f64,
        trip_type: trip_type.to_string(),
        experience: format!("{nights} nights in {place}, {mood}."),
        image: format!("https://picsum.photos/seed/trip{}/640/360", i + 1),
        short_description: format!("A {trip_type} trip to {place}."),
        featured: rng.gen_bool(0.2),
    }
}
