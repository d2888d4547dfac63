//! Serde roundtrip and JsonSchema validation tests for all entity types.

use std::collections::BTreeMap;

use chrono::DateTime;
use conflux_core::{AcceptanceStatistics, Category, Conference, ConferenceSeries, Event};
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_conference() -> Conference {
    Conference {
        link: "https://sp2024.ieee-security.org".to_string(),
        location: "San Francisco, CA, USA".to_string(),
        timeline: vec![
            Event {
                date: DateTime::parse_from_rfc3339("2023-12-06T23:59:59-12:00").unwrap(),
                description: "Paper submission".to_string(),
            },
            Event {
                date: DateTime::parse_from_rfc3339("2024-05-20T00:00:00+00:00").unwrap(),
                description: "Conference start".to_string(),
            },
        ],
    }
}

roundtrip_and_validate!(category_roundtrip, Category, Category::Security);

roundtrip_and_validate!(
    statistics_roundtrip,
    AcceptanceStatistics,
    AcceptanceStatistics {
        accepted: 94,
        submitted: 421,
    }
);

roundtrip_and_validate!(
    event_roundtrip,
    Event,
    Event {
        date: DateTime::parse_from_rfc3339("2024-01-15T23:59:59-12:00").unwrap(),
        description: "Notification".to_string(),
    }
);

roundtrip_and_validate!(conference_roundtrip, Conference, sample_conference());

roundtrip_and_validate!(
    series_roundtrip,
    ConferenceSeries,
    ConferenceSeries {
        name: "S&P".to_string(),
        category: Category::Security,
        description: "IEEE Symposium on Security and Privacy".to_string(),
        rankings: BTreeMap::from([
            ("ccf".to_string(), "A".to_string()),
            ("core".to_string(), "A*".to_string()),
        ]),
        conferences: BTreeMap::from([(2024, sample_conference())]),
        acceptance_statistics: BTreeMap::from([(
            2024,
            AcceptanceStatistics {
                accepted: 94,
                submitted: 421,
            },
        )]),
    }
);

#[test]
fn year_keys_serialize_as_strings() {
    let series = ConferenceSeries {
        name: "FSE".to_string(),
        category: Category::Engineering,
        description: "Foundations of Software Engineering".to_string(),
        rankings: BTreeMap::new(),
        conferences: BTreeMap::new(),
        acceptance_statistics: BTreeMap::from([(
            2020,
            AcceptanceStatistics {
                accepted: 10,
                submitted: 50,
            },
        )]),
    };
    let value = serde_json::to_value(&series).unwrap();
    assert!(value["acceptance_statistics"]["2020"].is_object());
}
