//! Climate state - seasons, weather, temperature
//!
//! Seasons advance on a fixed 90-day cycle and weather is re-rolled every
//! few days with season-dependent probabilities. Temperature drifts toward
//! a seasonal target rather than jumping.

use serde::{Deserialize, Serialize};

/// Season in the yearly cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// The season that follows this one
    pub fn next(&self) -> Self {
        match self {
            Self::Spring => Self::Summer,
            Self::Summer => Self::Autumn,
            Self::Autumn => Self::Winter,
            Self::Winter => Self::Spring,
        }
    }

    /// Target temperature in Celsius that the climate drifts toward
    pub fn target_temperature(&self) -> f32 {
        match self {
            Self::Spring => 15.0,
            Self::Summer => 25.0,
            Self::Autumn => 15.0,
            Self::Winter => 0.0,
        }
    }

    /// Map a uniform roll in [0, 1) to a weather condition.
    ///
    /// Summers are mostly clear, winters bring snow, and the shoulder
    /// seasons are wet.
    pub fn roll_weather(&self, roll: f32) -> WeatherKind {
        match self {
            Self::Summer => {
                if roll < 0.6 {
                    WeatherKind::Clear
                } else if roll < 0.8 {
                    WeatherKind::Rainy
                } else {
                    WeatherKind::Stormy
                }
            }
            Self::Winter => {
                if roll < 0.4 {
                    WeatherKind::Snowy
                } else if roll < 0.7 {
                    WeatherKind::Clear
                } else {
                    WeatherKind::Stormy
                }
            }
            Self::Spring | Self::Autumn => {
                if roll < 0.4 {
                    WeatherKind::Clear
                } else if roll < 0.8 {
                    WeatherKind::Rainy
                } else {
                    WeatherKind::Stormy
                }
            }
        }
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::Spring
    }
}

/// Current weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherKind {
    Clear,
    Rainy,
    Stormy,
    Snowy,
    Drought,
}

impl Default for WeatherKind {
    fn default() -> Self {
        Self::Clear
    }
}

/// Full climate state carried by the environmental model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Climate {
    pub season: Season,
    pub weather: WeatherKind,
    /// Celsius
    pub temperature: f32,
    /// mm per day
    pub rainfall: f32,
    /// 0.0 to 1.0
    pub humidity: f32,
    /// km/h
    pub wind_speed: f32,
}

impl Default for Climate {
    fn default() -> Self {
        Self {
            season: Season::Spring,
            weather: WeatherKind::Clear,
            temperature: 15.0,
            rainfall: 0.0,
            humidity: 0.5,
            wind_speed: 10.0,
        }
    }
}
