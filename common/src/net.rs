use anyhow::{Result, ensure};
use quinn::Connection;

#[cfg(feature = "json")]
use serde::{Serialize, de::DeserializeOwned};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

// Upper bound for a single message
const MAX_MESSAGE_SIZE: usize = 64 * 1024;

// ============================================================================
// Wire Encoding
// ============================================================================

/// Anything that can travel as a single protocol message.
#[cfg(feature = "json")]
pub trait Wire: Serialize + DeserializeOwned + Send + Sync {}

#[cfg(feature = "json")]
impl<T: Serialize + DeserializeOwned + Send + Sync> Wire for T {}

/// Anything that can travel as a single protocol message.
#[cfg(feature = "bincode")]
pub trait Wire: Encode + Decode<()> + Send + Sync {}

#[cfg(feature = "bincode")]
impl<T: Encode + Decode<()> + Send + Sync> Wire for T {}

#[cfg(feature = "json")]
pub fn encode<T: Wire>(msg: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(msg)?)
}

#[cfg(feature = "json")]
pub fn decode<T: Wire>(data: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(data)?)
}

#[cfg(feature = "bincode")]
pub fn encode<T: Wire>(msg: &T) -> Result<Vec<u8>> {
    Ok(bincode::encode_to_vec(msg, bincode::config::standard())?)
}

#[cfg(feature = "bincode")]
pub fn decode<T: Wire>(data: &[u8]) -> Result<T> {
    let (msg, used) = bincode::decode_from_slice(data, bincode::config::standard())?;
    ensure!(used == data.len(), "{} trailing bytes after message", data.len() - used);
    Ok(msg)
}

// ============================================================================
// Message Stream
// ============================================================================

// One message per unidirectional stream
pub struct MessageStream<'a> {
    connection: &'a Connection,
}

impl<'a> MessageStream<'a> {
    #[must_use]
    pub const fn new(connection: &'a Connection) -> Self {
        Self { connection }
    }

    pub async fn send<T: Wire>(&self, msg: &T) -> Result<()> {
        let data = encode(msg)?;
        ensure!(data.len() <= MAX_MESSAGE_SIZE, "message of {} bytes is too large", data.len());

        let mut stream = self.connection.open_uni().await?;
        stream.write_all(&data).await?;
        stream.finish()?;
        Ok(())
    }

    pub async fn recv<T: Wire>(&self) -> Result<T> {
        let mut stream = self.connection.accept_uni().await?;
        let data = stream.read_to_end(MAX_MESSAGE_SIZE).await?;
        decode(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ServerMessage, SLoadScene};

    #[test]
    fn decoded_message_matches_sent_one() {
        let msg = ServerMessage::LoadScene(SLoadScene {
            scene: "GameScene".to_string(),
        });

        let data = encode(&msg).unwrap();

        assert_eq!(decode::<ServerMessage>(&data).unwrap(), msg);
    }

    #[test]
    fn truncated_message_is_rejected() {
        let msg = ServerMessage::LoadScene(SLoadScene {
            scene: "GameScene".to_string(),
        });
        let data = encode(&msg).unwrap();

        assert!(decode::<ServerMessage>(&data[..data.len() / 2]).is_err());
    }
}
