#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

// Macro to reduce boilerplate for structs
macro_rules! message {
    ($(#[$meta:meta])* struct $name:ident $body:tt) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        #[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "bincode", derive(Encode, Decode))]
        pub struct $name $body
    };
}

// ============================================================================
// Client Messages
// ============================================================================

message! {
// Client to Host: Join request, sent once right after connecting.
struct CHello {
    pub name: String,
}
}

// ============================================================================
// Server Messages
// ============================================================================

message! {
// Host to Client: Join accepted.
struct SWelcome {
    pub id: u32,
}
}

message! {
// Host to Client: Switch to the named scene.
struct SLoadScene {
    pub scene: String,
}
}

// ============================================================================
// Message Envelopes
// ============================================================================

// All client to host messages
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub enum ClientMessage {
    Hello(CHello),
}

// All host to client messages
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "bincode", derive(Encode, Decode))]
pub enum ServerMessage {
    Welcome(SWelcome),
    LoadScene(SLoadScene),
}
