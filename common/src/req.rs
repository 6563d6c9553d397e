// keep in sync with the dto definitions of the greenhouse backend
use chrono::{NaiveTime, Weekday};
use std::fmt;

/// Monday first, same order as the `dayOfWeek` index used by the backend.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    WEEK.get(index as usize).copied()
}

pub fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_monday() as u8
}

pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub enum SensorType {
    #[serde(alias = "temperature")]
    Temperature,
    #[serde(alias = "humidity")]
    Humidity,
    #[serde(alias = "co2", alias = "CO2")]
    Co2,
}

impl SensorType {
    pub const ALL: [SensorType; 3] = [Self::Temperature, Self::Humidity, Self::Co2];

    /// Path segment of `/measurements/{type}`.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Co2 => "co2",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity => "%",
            Self::Co2 => "ppm",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::Co2 => "CO2",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Threshold {
    #[serde(rename = "type")]
    pub kind: SensorType,
    pub min: f32,
    pub max: f32,
}

impl Threshold {
    /// Unset bounds, as shown by an empty form.
    pub fn blank(kind: SensorType) -> Self {
        Self {
            kind,
            min: f32::NAN,
            max: f32::NAN,
        }
    }

    pub fn is_set(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

// NaN bounds never compare equal, so two blank presets are not `==`
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Preset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>, // assigned by the backend
    pub name: String,
    pub thresholds: Vec<Threshold>,
}

impl Preset {
    pub fn blank() -> Self {
        Self {
            id: None,
            name: String::new(),
            thresholds: SensorType::ALL.iter().map(|t| Threshold::blank(*t)).collect(),
        }
    }

    pub fn threshold(&self, kind: SensorType) -> Option<&Threshold> {
        self.thresholds.iter().find(|t| t.kind == kind)
    }

    /// Replaces the threshold of the same sensor type, keeps the position.
    pub fn set_threshold(&mut self, threshold: Threshold) {
        match self.thresholds.iter_mut().find(|t| t.kind == threshold.kind) {
            Some(t) => *t = threshold,
            None => self.thresholds.push(threshold),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Measurement {
    pub timestamp: i64, // ms since epoch
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    pub id: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(with = "day_of_week")]
    pub day_of_week: Weekday,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterval {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(with = "day_of_week")]
    pub day_of_week: Weekday,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
pub struct EmailDto {
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize)]
pub struct WateringState {
    pub state: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ToggleWatering {
    pub state: bool,
    pub duration: u32, // min
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct CurrentPresetRequest {
    #[serde(rename = "Id")]
    pub id: i32,
}

mod day_of_week {
    use chrono::Weekday;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(super::weekday_index(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let index = u8::deserialize(deserializer)?;
        super::weekday_from_index(index)
            .ok_or_else(|| de::Error::custom(format!("day of week out of range: {index}")))
    }
}
