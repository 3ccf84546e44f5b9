//! The fixed catalog of disaster event codes.

use std::fmt;

/// A known disaster event code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Tsunami,
    Earthquake,
    TropicalCyclone,
    Wildfire,
    Flood,
    ExtremeTemperature,
    Drought,
    SevereStorm,
    SeaIce,
    Volcano,
    Landslide,
}

impl EventType {
    /// Every known event type, in catalog order.
    pub const ALL: [EventType; 11] = [
        EventType::Tsunami,
        EventType::Earthquake,
        EventType::TropicalCyclone,
        EventType::Wildfire,
        EventType::Flood,
        EventType::ExtremeTemperature,
        EventType::Drought,
        EventType::SevereStorm,
        EventType::SeaIce,
        EventType::Volcano,
        EventType::Landslide,
    ];

    /// Look up an event type by its two-letter code.
    ///
    /// Codes are matched exactly; `"eq"` is not `"EQ"`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// The two-letter wire code.
    pub fn code(&self) -> &'static str {
        match self {
            EventType::Tsunami => "TN",
            EventType::Earthquake => "EQ",
            EventType::TropicalCyclone => "TC",
            EventType::Wildfire => "WF",
            EventType::Flood => "FL",
            EventType::ExtremeTemperature => "ET",
            EventType::Drought => "DR",
            EventType::SevereStorm => "SW",
            EventType::SeaIce => "SI",
            EventType::Volcano => "VO",
            EventType::Landslide => "LS",
        }
    }

    /// The fixed human description of this event type.
    pub fn description(&self) -> &'static str {
        match self {
            EventType::Tsunami => {
                "Large waves caused by underwater disturbances or seismic activity."
            }
            EventType::Earthquake => {
                "Sudden ground shaking from tectonic movements or volcanic activity."
            }
            EventType::TropicalCyclone => {
                "Powerful rotating storms like hurricanes, cyclones, or typhoons."
            }
            EventType::Wildfire => "Uncontrolled fires spreading in forested or grassland areas.",
            EventType::Flood => {
                "Overflowing water from rivers, lakes, or heavy rainfall causing flooding."
            }
            EventType::ExtremeTemperature => {
                "Extreme weather events including heatwaves, cold spells, or severe temperatures."
            }
            EventType::Drought => {
                "Prolonged dry periods leading to water scarcity and agricultural challenges."
            }
            EventType::SevereStorm => {
                "Severe atmospheric disturbances such as thunderstorms or hailstorms."
            }
            EventType::SeaIce => {
                "Hazardous conditions caused by the presence or movement of sea ice."
            }
            EventType::Volcano => {
                "Volcanic eruptions emitting lava, ash, and gases from the Earth's crust."
            }
            EventType::Landslide => {
                "Mass movement of soil, rocks, or debris triggered by gravity or other factors."
            }
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Describe a raw event code, or `None` if the code is not in the catalog.
pub fn describe_event_type(code: &str) -> Option<&'static str> {
    EventType::from_code(code).map(|t| t.description())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for event_type in EventType::ALL {
            assert_eq!(EventType::from_code(event_type.code()), Some(event_type));
        }
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<_> = EventType::ALL.iter().map(|t| t.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), EventType::ALL.len());
    }

    #[test]
    fn test_describe_known_code() {
        assert_eq!(
            describe_event_type("EQ"),
            Some("Sudden ground shaking from tectonic movements or volcanic activity.")
        );
        assert_eq!(
            describe_event_type("LS"),
            Some("Mass movement of soil, rocks, or debris triggered by gravity or other factors.")
        );
    }

    #[test]
    fn test_describe_unknown_code() {
        assert_eq!(describe_event_type("XX"), None);
        assert_eq!(describe_event_type("eq"), None);
        assert_eq!(describe_event_type(""), None);
    }
}
