use serde::Deserialize;

/// The parts of a status payload this crate cares about.
///
/// Every field is optional: listeners that only roughly speak the dialect
/// still parse, and anything missing simply reads as unknown.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusPayload {
    pub players: Option<PlayersSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayersSection {
    pub online: Option<u32>,
}

impl StatusPayload {
    /// Parse a payload, returning `None` for anything that is not a JSON
    /// object of the expected shape.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(payload) => Some(payload),
            Err(e) => {
                log::debug!("Unparsable status payload ({} bytes): {}", raw.len(), e);
                None
            }
        }
    }

    pub fn online_players(&self) -> Option<u32> {
        self.players.as_ref().and_then(|players| players.online)
    }
}

/// Extract `players.online` from a raw payload. Missing or malformed means
/// `None`, never an error.
pub fn player_count(raw: &str) -> Option<u32> {
    StatusPayload::parse(raw).and_then(|payload| payload.online_players())
}
