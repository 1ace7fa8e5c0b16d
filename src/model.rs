use std::fmt;
use serde::{Deserialize, Deserializer};
use crate::constants::*;

/// Opaque date label, used as query parameter and link text.
pub type DateEntry = String;

/// A display value as the backend sends it: text for most fields, a number for
/// the dimensions, but any field may come back as either.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Flag(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Flag(v) => write!(f, "{}", v),
            Scalar::Integer(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Text(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GpsPosition {
    pub lat: f64,
    pub lon: f64,
}

/// One photo's metadata record, as returned by `/api/images`.
///
/// Keys on the wire are the backend's French names. Every field may be absent,
/// null, a number or text; none of them can reject the whole list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageEntry {
    #[serde(default, deserialize_with = "label_text")]
    pub label: String,
    #[serde(default)]
    pub date: Option<Scalar>,
    #[serde(default, rename = "heure")]
    pub time: Option<Scalar>,
    #[serde(default, rename = "lieu")]
    pub location: Option<Scalar>,
    #[serde(default, rename = "largeur")]
    pub width: Option<Scalar>,
    #[serde(default, rename = "hauteur")]
    pub height: Option<Scalar>,
    #[serde(default, rename = "taille")]
    pub size: Option<Scalar>,
    #[serde(default, rename = "résolution")]
    pub resolution: Option<Scalar>,
    #[serde(default, rename = "position GPS", deserialize_with = "gps_or_none")]
    pub gps_position: Option<GpsPosition>,
    #[serde(default, rename = "horodatage de création")]
    pub created_at: Option<Scalar>,
}

/// A null label becomes empty; a numeric one is kept as its text.
fn label_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(|v| v.to_string())
        .unwrap_or_default())
}

/// A malformed position is dropped instead of failing the record.
fn gps_or_none<'de, D>(deserializer: D) -> Result<Option<GpsPosition>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl ImageEntry {
    /// Path the image bytes are served from.
    pub fn source(&self) -> String {
        image_source(&self.label)
    }

    /// "<width> x <height>", with the placeholder standing in for a missing side.
    /// When both sides are missing the whole field is the placeholder.
    pub fn dimensions(&self) -> String {
        match (&self.width, &self.height) {
            (None, None) => PLACEHOLDER.to_string(),
            (w, h) => format!("{} x {}", scalar_or_placeholder(w.as_ref()), scalar_or_placeholder(h.as_ref())),
        }
    }
}

pub fn image_source(label: &str) -> String {
    format!("{}/{}", IMAGE_BYTES_ROUTE, label)
}

/// Empty strings count as missing.
pub fn or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => PLACEHOLDER,
    }
}

/// Same rule as `or_placeholder` for values that may not be text.
pub fn scalar_or_placeholder(value: Option<&Scalar>) -> String {
    match value {
        Some(Scalar::Text(t)) if t.is_empty() => PLACEHOLDER.to_string(),
        Some(v) => v.to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_record() {
        let json = r#"{
            "label": "IMG_0001.jpg",
            "largeur": 4032,
            "hauteur": 3024,
            "résolution": "72x72 dpi",
            "taille": "2.31 MB",
            "position GPS": {"lat": 48.85, "lon": 2.35},
            "lieu": "Paris",
            "horodatage de création": "2025:07:14 10:22:01",
            "date": "14/07/2025",
            "heure": "10:22:01"
        }"#;
        let entry: ImageEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.label, "IMG_0001.jpg");
        assert_eq!(entry.location, Some(Scalar::Text("Paris".to_string())));
        assert_eq!(entry.time, Some(Scalar::Text("10:22:01".to_string())));
        assert_eq!(entry.resolution, Some(Scalar::Text("72x72 dpi".to_string())));
        assert_eq!(entry.gps_position, Some(GpsPosition { lat: 48.85, lon: 2.35 }));
        assert_eq!(entry.created_at, Some(Scalar::Text("2025:07:14 10:22:01".to_string())));
        assert_eq!(entry.dimensions(), "4032 x 3024");
        assert_eq!(entry.source(), "/images/IMG_0001.jpg");
    }

    #[test]
    fn missing_and_null_fields_are_none() {
        let entry: ImageEntry =
            serde_json::from_str(r#"{"label": "a.jpg", "lieu": null, "position GPS": null}"#).unwrap();
        assert_eq!(entry.location, None);
        assert_eq!(entry.gps_position, None);
        assert_eq!(entry.size, None);
        assert_eq!(entry.dimensions(), "-");
    }

    #[test]
    fn dimensions_fill_missing_side() {
        let entry: ImageEntry = serde_json::from_str(r#"{"label": "a.jpg", "largeur": 800}"#).unwrap();
        assert_eq!(entry.dimensions(), "800 x -");

        let entry: ImageEntry =
            serde_json::from_str(r#"{"label": "a.jpg", "largeur": "800", "hauteur": 600.0}"#).unwrap();
        assert_eq!(entry.dimensions(), "800 x 600");
    }

    #[test]
    fn empty_string_shows_placeholder() {
        assert_eq!(or_placeholder(Some("")), "-");
        assert_eq!(or_placeholder(None), "-");
        assert_eq!(or_placeholder(Some("Lyon")), "Lyon");
    }

    #[test]
    fn mixed_value_types_keep_the_whole_list() {
        let json = r#"[
            {"label": "a.jpg", "largeur": 800, "hauteur": 600},
            {"label": "b.jpg", "taille": 2048, "lieu": null, "date": 20240101},
            {"label": null, "date": "x", "position GPS": "n/a"}
        ]"#;
        let entries: Vec<ImageEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].label, "a.jpg");
        assert_eq!(entries[0].dimensions(), "800 x 600");

        assert_eq!(entries[1].label, "b.jpg");
        assert_eq!(scalar_or_placeholder(entries[1].size.as_ref()), "2048");
        assert_eq!(scalar_or_placeholder(entries[1].location.as_ref()), "-");
        assert_eq!(scalar_or_placeholder(entries[1].date.as_ref()), "20240101");

        assert_eq!(entries[2].label, "");
        assert_eq!(entries[2].gps_position, None);
        assert_eq!(scalar_or_placeholder(entries[2].date.as_ref()), "x");
    }

    #[test]
    fn scalar_placeholder_rules() {
        assert_eq!(scalar_or_placeholder(None), "-");
        assert_eq!(scalar_or_placeholder(Some(&Scalar::Text(String::new()))), "-");
        assert_eq!(scalar_or_placeholder(Some(&Scalar::Float(1.5))), "1.5");
        assert_eq!(scalar_or_placeholder(Some(&Scalar::Flag(true))), "true");
    }
}
