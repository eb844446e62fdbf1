/// Failures while turning a room data document into a [`crate::RoomCatalog`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("room data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid file format: \"rooms\" array not found")]
    InvalidFormat,

    #[error("room #{index} is malformed: {source}")]
    InvalidRoom {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while decoding a dropped drag-and-drop payload.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("drop payload is empty")]
    Empty,

    #[error("drop payload is not a room: {0}")]
    Json(#[from] serde_json::Error),

    #[error("drop payload has an empty room id")]
    MissingId,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
