use serde::{Deserialize, Serialize};

// ─── Domain types ────────────────────────────────────────────────

/// A stored trip. Field names follow the JSON the web client speaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(rename = "_id")]
    pub id: String,
    pub trip_name: String,
    pub start_date_of_journey: String,
    pub end_date_of_journey: String,
    pub name_of_hotels: String,
    pub places_visited: String,
    pub total_cost: f64,
    pub trip_type: String,
    pub experience: String,
    pub image: String,
    pub short_description: String,
    pub featured: bool,
    pub created_at: String,
}

/// Body of `POST /trip`. Every field is optional; missing ones default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTrip {
    pub trip_name: String,
    pub start_date_of_journey: String,
    pub end_date_of_journey: String,
    pub name_of_hotels: String,
    pub places_visited: String,
    pub total_cost: f64,
    pub trip_type: String,
    pub experience: String,
    pub image: String,
    pub short_description: String,
    pub featured: bool,
}

impl Trip {
    /// Assign an id and creation timestamp to a new trip.
    pub fn from_new(new: NewTrip) -> Self {
        Self {
            id: format!("trp_{}", &uuid::Uuid::new_v4().simple().to_string()[..8]),
            trip_name: new.trip_name,
            start_date_of_journey: new.start_date_of_journey,
            end_date_of_journey: new.end_date_of_journey,
            name_of_hotels: new.name_of_hotels,
            places_visited: new.places_visited,
            total_cost: new.total_cost,
            trip_type: new.trip_type,
            experience: new.experience,
            image: new.image,
            short_description: new.short_description,
            featured: new.featured,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
