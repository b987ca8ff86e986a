use chrono::{DateTime, Local};

pub fn date_time_as_string(dt: Option<DateTime<Local>>, format: Option<&str>) -> String {
    dt.unwrap_or(Local::now())
        .format(format.unwrap_or("%d_%m_%Y-%H-%M"))
        .to_string()
}

/// Turns a card or set name into the slug used in store urls.
///
/// "Fire // Ice" becomes "fire-ice" and "Urza's Saga" becomes "urzas-saga".
pub fn normalize(name: &str) -> String {
    name.replace(" // ", "-")
        .replace(' ', "-")
        .replace(['\'', ','], "")
        .to_lowercase()
}
