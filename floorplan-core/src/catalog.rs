use serde::{Deserialize, Deserializer, Serialize};

use crate::chess::ChessPiece;
use crate::error::{CatalogError, PayloadError, Result};
use crate::filter::ALL_CATEGORIES;

/// One placeable room from the floorplan data file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(deserialize_with = "de_room_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "de_nullable_string")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chess: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// Hand-edited data files sometimes carry numeric ids.
fn de_room_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

fn de_nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Room {
    /// True when the room carries a non-empty chess attribute.
    pub fn has_chess(&self) -> bool {
        self.chess.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Lower-cased chess attribute, used for case-insensitive comparisons.
    pub fn chess_key(&self) -> Option<String> {
        self.chess
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(str::to_lowercase)
    }

    /// The recognized chess piece, if any. Unknown kinds resolve to `None`.
    pub fn chess_piece(&self) -> Option<ChessPiece> {
        self.chess.as_deref().and_then(ChessPiece::parse_kind)
    }

    /// Serialize the room for a drag-and-drop transfer.
    pub fn to_drag_payload(&self) -> String {
        // A struct of strings always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Decode a dropped payload, refusing anything that is not a usable room.
    pub fn from_drag_payload(text: &str) -> std::result::Result<Room, PayloadError> {
        if text.trim().is_empty() {
            return Err(PayloadError::Empty);
        }
        let room: Room = serde_json::from_str(text)?;
        if room.id.trim().is_empty() {
            return Err(PayloadError::MissingId);
        }
        Ok(room)
    }
}

/// The rooms loaded for this session, in data-file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<Room>) -> Self {
        RoomCatalog { rooms }
    }

    /// Parse a room data document of the form `{ "rooms": [ ... ] }`.
    pub fn parse(text: &str) -> Result<Self> {
        let doc: serde_json::Value = serde_json::from_str(text)?;
        let Some(raw_rooms) = doc.get("rooms").and_then(|v| v.as_array()) else {
            return Err(CatalogError::InvalidFormat);
        };
        let rooms = raw_rooms
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                serde_json::from_value::<Room>(raw.clone())
                    .map_err(|source| CatalogError::InvalidRoom { index, source })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RoomCatalog { rooms })
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name == name)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// `"all"` followed by every distinct category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut out = vec![ALL_CATEGORIES.to_string()];
        for room in &self.rooms {
            if !out.contains(&room.category) {
                out.push(room.category.clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"{
        "rooms": [
            { "id": "a", "name": "Entrance Hall", "category": "hall" },
            { "id": "b", "name": "Library", "category": "study", "chess": "Rook",
              "imageUrl": "img/library.png" },
            { "id": 7, "name": "Parlor", "category": "hall", "chess": null }
        ]
    }"#;

    #[test]
    fn parses_rooms_in_file_order() {
        let catalog = RoomCatalog::parse(DATA).unwrap();
        let names: Vec<_> = catalog.rooms().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Entrance Hall", "Library", "Parlor"]);
        let library = catalog.find_by_id("b").unwrap();
        assert_eq!(library.image_url.as_deref(), Some("img/library.png"));
        assert_eq!(library.chess_piece(), Some(ChessPiece::Rook));
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let catalog = RoomCatalog::parse(DATA).unwrap();
        assert_eq!(catalog.find_by_name("Parlor").unwrap().id, "7");
    }

    #[test]
    fn missing_rooms_field_is_invalid_format() {
        let err = RoomCatalog::parse(r#"{ "halls": [] }"#).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFormat));
        let err = RoomCatalog::parse(r#"{ "rooms": { "id": "a" } }"#).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFormat));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = RoomCatalog::parse("{ rooms: ").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn room_without_name_points_at_its_index() {
        let err = RoomCatalog::parse(r#"{ "rooms": [ { "id": "a", "name": "A" }, { "id": "b" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRoom { index: 1, .. }));
    }

    #[test]
    fn categories_start_with_all_and_are_distinct() {
        let catalog = RoomCatalog::parse(DATA).unwrap();
        assert_eq!(catalog.categories(), ["all", "hall", "study"]);
        assert_eq!(RoomCatalog::default().categories(), ["all"]);
    }

    #[test]
    fn empty_chess_attribute_is_not_a_chess_room() {
        let room = Room {
            chess: Some(String::new()),
            ..Default::default()
        };
        assert!(!room.has_chess());
        assert_eq!(room.chess_key(), None);
    }

    #[test]
    fn drag_payload_survives_transfer() {
        let catalog = RoomCatalog::parse(DATA).unwrap();
        let library = catalog.find_by_id("b").unwrap();
        let payload = library.to_drag_payload();
        assert!(payload.contains("\"imageUrl\""));
        assert_eq!(&Room::from_drag_payload(&payload).unwrap(), library);
    }

    #[test]
    fn bad_drag_payloads_are_rejected() {
        assert!(matches!(Room::from_drag_payload(""), Err(PayloadError::Empty)));
        assert!(matches!(
            Room::from_drag_payload("not json"),
            Err(PayloadError::Json(_))
        ));
        assert!(matches!(
            Room::from_drag_payload(r#"{ "id": " ", "name": "Ghost" }"#),
            Err(PayloadError::MissingId)
        ));
    }
}
