use serde::Serialize;

use crate::entities::LocationType;

/// Options handed to the place autocomplete widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceFilter {
    pub types: Vec<&'static str>,
    pub country: String,
}

impl PlaceFilter {
    pub fn for_location_type(location_type: LocationType, country: &str) -> Self {
        let types = match location_type {
            LocationType::Airport => vec!["airport"],
            LocationType::Location => vec!["establishment", "geocode"],
        };

        Self {
            types,
            country: country.to_lowercase(),
        }
    }
}
