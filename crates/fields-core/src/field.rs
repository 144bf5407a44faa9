use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default geometry for a freshly added field, in page-coordinate units
/// (pixels at scale 1, top-left origin).
pub const DEFAULT_X: f64 = 50.0;
pub const DEFAULT_Y: f64 = 50.0;
pub const DEFAULT_WIDTH: f64 = 100.0;
pub const DEFAULT_HEIGHT: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Signature,
    Radio,
}

impl FieldKind {
    /// Parse a field kind from its wire tag, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(FieldKind::Text),
            "signature" => Some(FieldKind::Signature),
            "radio" => Some(FieldKind::Radio),
            _ => None,
        }
    }

    /// The lowercase wire tag, as it appears in persisted layouts and the
    /// JSON preview.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Signature => "signature",
            FieldKind::Radio => "radio",
        }
    }
}

/// A single form-field annotation.
///
/// `id` is generated client-side, stable for the record's lifetime, and
/// used only for matching and removal; it is never displayed. An empty
/// `name` is the valid "unnamed" sentinel. `page_index` is recorded but not
/// enforced against the document's page count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub id: String,
    pub name: String,
    pub page_index: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "type")]
    pub kind: FieldKind,
}

impl FieldDef {
    /// Create a new unnamed field with a fresh id and default geometry.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            page_index: 0,
            x: DEFAULT_X,
            y: DEFAULT_Y,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            kind: FieldKind::Text,
        }
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_defaults() {
        let field = FieldDef::new();
        assert_eq!(field.name, "");
        assert_eq!(field.page_index, 0);
        assert_eq!(field.x, 50.0);
        assert_eq!(field.y, 50.0);
        assert_eq!(field.width, 100.0);
        assert_eq!(field.height, 30.0);
        assert_eq!(field.kind, FieldKind::Text);
        assert!(!field.id.is_empty());
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = FieldDef::new();
        let b = FieldDef::new();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(FieldKind::parse("text"), Some(FieldKind::Text));
        assert_eq!(FieldKind::parse("Signature"), Some(FieldKind::Signature));
        assert_eq!(FieldKind::parse("RADIO"), Some(FieldKind::Radio));
        assert_eq!(FieldKind::parse("checkbox"), None);
    }

    #[test]
    fn test_wire_format() {
        let mut field = FieldDef::new();
        field.name = "Signature1".to_string();
        field.kind = FieldKind::Signature;

        let json = serde_json::to_string(&field).unwrap();

        // Keys use the persisted camelCase names, kind serializes under
        // "type" with its lowercase tag.
        assert!(json.contains("\"pageIndex\":0"), "got: {}", json);
        assert!(json.contains("\"type\":\"signature\""), "got: {}", json);
        assert!(!json.contains("page_index"), "got: {}", json);
    }

    #[test]
    fn test_wire_round_trip() {
        let mut field = FieldDef::new();
        field.name = "Initials".to_string();
        field.kind = FieldKind::Radio;
        field.x = 12.5;

        let json = serde_json::to_string(&field).unwrap();
        let back: FieldDef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_is_named() {
        let mut field = FieldDef::new();
        assert!(!field.is_named());
        // Whitespace counts as a name; content is never validated.
        field.name = " ".to_string();
        assert!(field.is_named());
    }
}
