use std::fmt;

const NETWORK_ID_LENGTH: usize = 7;
const NETWORK_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Owner identifiers travel as plain strings, the empty string meaning "unowned"
pub type OwnerId = String;

/// Session-wide identifier correlating one entity across every peer
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkId(String);

impl NetworkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a short random base-36 token, used when the host does not
    /// assign an id itself
    pub fn generate() -> Self {
        let id: String = (0..NETWORK_ID_LENGTH)
            .map(|_| NETWORK_ID_ALPHABET[fastrand::usize(..NETWORK_ID_ALPHABET.len())] as char)
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NetworkId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NetworkId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
