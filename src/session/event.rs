use crate::dto::*;
use serde_json::Value;

/// One message for the session loop: a decoded wire line, or a synthetic
/// marker the reader produces itself (`Ping` for keep-alive lines,
/// `EndOfStream` once when the transport is exhausted). Immutable after
/// construction; delivery order equals wire order.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Full(Snapshot),
    State(Update),
    Chat(ChatLine),
    OpponentGone,
    Ping,
    EndOfStream,
}

impl Event {
    /// Decode one non-empty wire line.
    ///
    /// `Ok(None)` means a well-formed line of a kind this client does not
    /// handle; those are skipped, the server adds event kinds without
    /// notice. A line that is not valid JSON is an error and tears down
    /// the whole stream for the retry policy to reopen.
    pub fn decode(line: &[u8]) -> anyhow::Result<Option<Self>> {
        let value = serde_json::from_slice::<Value>(line)?;
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let event = match tag.as_str() {
            "gameFull" => Some(Self::Full(serde_json::from_value(value)?)),
            "gameState" => Some(Self::State(serde_json::from_value(value)?)),
            "chatLine" => Some(Self::Chat(serde_json::from_value(value)?)),
            "opponentGone" => Some(Self::OpponentGone),
            _ => {
                log::debug!("skipping unhandled game event: {}", value);
                None
            }
        };
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full() {
        let line = br#"{"type":"gameFull","id":"abc","state":{"moves":"","status":"started"}}"#;
        match Event::decode(line).unwrap() {
            Some(Event::Full(snapshot)) => assert_eq!(snapshot.id, "abc"),
            other => panic!("expected Full, got {:?}", other),
        }
    }

    #[test]
    fn decodes_state() {
        let line = br#"{"type":"gameState","moves":"e2e4","status":"started"}"#;
        match Event::decode(line).unwrap() {
            Some(Event::State(update)) => assert_eq!(update.moves, "e2e4"),
            other => panic!("expected State, got {:?}", other),
        }
    }

    #[test]
    fn decodes_chat() {
        let line = br#"{"type":"chatLine","username":"them","text":"gg","room":"spectator"}"#;
        match Event::decode(line).unwrap() {
            Some(Event::Chat(chat)) => assert_eq!(chat.room, Room::Spectator),
            other => panic!("expected Chat, got {:?}", other),
        }
    }

    #[test]
    fn decodes_opponent_gone() {
        let line = br#"{"type":"opponentGone","gone":true,"claimWinInSeconds":8}"#;
        assert_eq!(Event::decode(line).unwrap(), Some(Event::OpponentGone));
    }

    #[test]
    fn unknown_kind_is_skipped() {
        let line = br#"{"type":"gameFinishSoon"}"#;
        assert_eq!(Event::decode(line).unwrap(), None);
    }

    #[test]
    fn missing_kind_is_skipped() {
        let line = br#"{"moves":"e2e4"}"#;
        assert_eq!(Event::decode(line).unwrap(), None);
    }

    #[test]
    fn malformed_line_is_an_error() {
        assert!(Event::decode(b"{not json").is_err());
    }

    #[test]
    fn known_kind_with_bad_payload_is_an_error() {
        let line = br#"{"type":"chatLine","username":42}"#;
        assert!(Event::decode(line).is_err());
    }
}
