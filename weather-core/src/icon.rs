/// Display icon for a weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeatherIcon {
    #[default]
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
}

/// Provider condition codes with a dedicated icon. Everything else is `Clear`.
const CONDITION_ICONS: [(&str, WeatherIcon); 14] = [
    ("01d", WeatherIcon::Clear),
    ("01n", WeatherIcon::Clear),
    ("02d", WeatherIcon::Cloud),
    ("02n", WeatherIcon::Cloud),
    ("03d", WeatherIcon::Cloud),
    ("03n", WeatherIcon::Cloud),
    ("04d", WeatherIcon::Drizzle),
    ("04n", WeatherIcon::Drizzle),
    ("09d", WeatherIcon::Rain),
    ("09n", WeatherIcon::Rain),
    ("10d", WeatherIcon::Rain),
    ("10n", WeatherIcon::Rain),
    ("13d", WeatherIcon::Snow),
    ("13n", WeatherIcon::Snow),
];

impl WeatherIcon {
    /// Resolve a provider condition code (e.g. `"10n"`). Never fails.
    pub fn from_code(code: Option<&str>) -> Self {
        code.and_then(|code| {
            CONDITION_ICONS
                .iter()
                .find(|(known, _)| *known == code)
                .map(|(_, icon)| *icon)
        })
        .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherIcon::Clear => "clear",
            WeatherIcon::Cloud => "cloud",
            WeatherIcon::Drizzle => "drizzle",
            WeatherIcon::Rain => "rain",
            WeatherIcon::Snow => "snow",
        }
    }

    /// Asset file a graphical front-end would load for this icon.
    pub fn asset(&self) -> &'static str {
        match self {
            WeatherIcon::Clear => "clear.png",
            WeatherIcon::Cloud => "cloud.png",
            WeatherIcon::Drizzle => "drizzle.png",
            WeatherIcon::Rain => "rain.png",
            WeatherIcon::Snow => "snow.png",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::Clear => "☀",
            WeatherIcon::Cloud => "☁",
            WeatherIcon::Drizzle => "🌦",
            WeatherIcon::Rain => "🌧",
            WeatherIcon::Snow => "❄",
        }
    }

    pub const fn all() -> &'static [WeatherIcon] {
        &[
            WeatherIcon::Clear,
            WeatherIcon::Cloud,
            WeatherIcon::Drizzle,
            WeatherIcon::Rain,
            WeatherIcon::Snow,
        ]
    }
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
