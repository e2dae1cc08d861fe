//! Prompt construction for the travel plan model call
//!
//! `build_prompt` is a pure function of the trip request: identical input
//! yields byte-identical output. The emitted text instructs the model to
//! tag every place name as `[Name](maps)`, which is the contract consumed
//! by the linkifier.

use crate::models::TripRequest;

/// Mandated output sections, in the order the model is asked to emit them
pub const SECTION_HEADERS: [&str; 8] = [
    "Daily Itinerary",
    "Must-See Attractions",
    "Where to Stay",
    "Best Time to Visit",
    "Local Food to Try",
    "Cultural Tips",
    "How to Get Around",
    "Budget Estimate",
];

/// Build the instruction text for one plan generation call
#[must_use]
pub fn build_prompt(request: &TripRequest) -> String {
    let traveller_noun = if request.party_size == 1 {
        "person"
    } else {
        "people"
    };

    let date_info = request
        .date_range()
        .map(|(start, end)| format!("\nTravel dates: From {start} to {end}"))
        .unwrap_or_default();

    format!(
        r"Create a detailed {num_days}-day travel guide for {destination} for {party_size} {traveller_noun}.{date_info}
Trip details: {description}

Format the response with the following sections, using exact headers:

1. {itinerary}
For each day, use this format:
Day X (include actual date if provided)
• Morning (9:00): Activity/Place
• Afternoon (14:00): Activity/Place
• Evening (19:00): Activity/Place
Include [Location Name](maps) for each place mentioned.

2. {attractions}
List key attractions with their exact Google Maps names:
• [Attraction Name](maps) - Brief description
• [Attraction Name](maps) - Brief description

3. {stay}
• Recommended areas: [District/Area Name](maps)
• Specific hotel suggestions in each area
• Price ranges per night

4. {best_time}
• Seasonal recommendations
• Weather considerations
• Special events or festivals

5. {food}
• Must-try dishes
• [Restaurant/Food District Name](maps) - Specialties
• Price ranges for meals

6. {culture}
• Local customs
• Etiquette guidelines
• Important phrases

7. {transport}
• Public transportation options
• [Transportation Hub Names](maps)
• Cost estimates for different modes

8. {budget}
• Accommodation: Price range
• Daily meals: Price range
• Activities: Price range
• Transportation: Price range
• Total estimated budget

Keep it practical and organized with bullet points.
For each location mentioned, use the exact name as it would appear on Google Maps using the [Name](maps) format.
Consider the specific dates when suggesting activities and making recommendations.",
        num_days = request.num_days,
        destination = request.destination,
        party_size = request.party_size,
        description = request.description,
        itinerary = SECTION_HEADERS[0],
        attractions = SECTION_HEADERS[1],
        stay = SECTION_HEADERS[2],
        best_time = SECTION_HEADERS[3],
        food = SECTION_HEADERS[4],
        culture = SECTION_HEADERS[5],
        transport = SECTION_HEADERS[6],
        budget = SECTION_HEADERS[7],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn paris_request() -> TripRequest {
        TripRequest::new("Paris", 2, 3)
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let request = paris_request();
        assert_eq!(build_prompt(&request), build_prompt(&request));
    }

    #[test]
    fn test_build_prompt_contains_all_headers_once_in_order() {
        let prompt = build_prompt(&paris_request());

        let mut last_index = 0;
        for header in SECTION_HEADERS {
            assert_eq!(
                prompt.matches(header).count(),
                1,
                "header '{header}' should appear exactly once"
            );
            let index = prompt.find(header).unwrap();
            assert!(index > last_index, "header '{header}' out of order");
            last_index = index;
        }
    }

    #[rstest]
    #[case(1, "for 1 person.")]
    #[case(2, "for 2 people.")]
    #[case(6, "for 6 people.")]
    fn test_traveller_noun_agreement(#[case] party_size: u32, #[case] expected: &str) {
        let request = TripRequest::new("Rome", party_size, 4);
        assert!(build_prompt(&request).contains(expected));
    }

    #[test]
    fn test_summary_line_names_destination_and_days() {
        let prompt = build_prompt(&paris_request());
        assert!(prompt.starts_with("Create a detailed 3-day travel guide for Paris for 2 people."));
    }

    #[test]
    fn test_date_line_requires_both_dates() {
        let mut request = paris_request();
        request.start_date = NaiveDate::from_ymd_opt(2025, 6, 1);
        assert!(!build_prompt(&request).contains("Travel dates:"));

        request.end_date = NaiveDate::from_ymd_opt(2025, 6, 4);
        assert!(
            build_prompt(&request).contains("Travel dates: From 2025-06-01 to 2025-06-04")
        );
    }

    #[test]
    fn test_description_is_embedded() {
        let mut request = paris_request();
        request.description = "Family trip with kids, budget-friendly".to_string();
        let prompt = build_prompt(&request);
        assert!(prompt.contains("Trip details: Family trip with kids, budget-friendly"));
    }

    #[test]
    fn test_placeholder_convention_is_verbatim() {
        let prompt = build_prompt(&paris_request());
        assert!(prompt.contains("[Name](maps)"));
        assert!(prompt.contains("• Morning (9:00): Activity/Place"));
        assert!(prompt.contains("• Afternoon (14:00): Activity/Place"));
        assert!(prompt.contains("• Evening (19:00): Activity/Place"));
    }
}
