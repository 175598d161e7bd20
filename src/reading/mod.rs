use serde::{Deserialize, Serialize, Serializer};
use std::fmt;


/// Tag identifier as read from the physical tag.
///
/// Never empty and never all-zero: those byte patterns are what the reader
/// emits when no tag is present, so they cannot name a tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Vec<u8>);

impl Identifier {
    /// Returns `None` for the empty or all-zero byte pattern.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Option<Self> {
        let bytes = bytes.into();
        if is_absent(&bytes) {
            None
        } else {
            Some(Self(bytes))
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn is_absent(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| *b == 0)
}

/// A single reading delivered by the tag reader.
///
/// `tag` is `None` when the reader reports that nothing is in range. Two
/// readings are equal only when both the tag and the timestamp match, which is
/// how duplicate deliveries of one value are recognised.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WireReading", into = "WireReading")]
pub struct RawReading {
    pub tag: Option<Identifier>,

    /// Reader clock in milliseconds. Wraps at `u32::MAX`.
    pub timestamp_ms: u32,
}

impl RawReading {
    pub fn present(tag: Identifier, timestamp_ms: u32) -> Self {
        Self {
            tag: Some(tag),
            timestamp_ms,
        }
    }

    pub fn absent(timestamp_ms: u32) -> Self {
        Self {
            tag: None,
            timestamp_ms,
        }
    }

    /// Build a reading from the raw identifier bytes of the transport.
    ///
    /// This is the only place the empty/all-zero wire value is folded into
    /// "no tag present".
    pub fn from_wire(bytes: &[u8], timestamp_ms: u32) -> Self {
        Self {
            tag: Identifier::new(bytes),
            timestamp_ms,
        }
    }

    pub fn is_absent(&self) -> bool {
        self.tag.is_none()
    }
}

impl fmt::Display for RawReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}@{}", tag, self.timestamp_ms),
            None => write!(f, "<none>@{}", self.timestamp_ms),
        }
    }
}

/// Serialized shape: `{"id": [..bytes], "timestamp_ms": n}`
#[derive(Serialize, Deserialize)]
struct WireReading {
    #[serde(default)]
    id: Vec<u8>,
    timestamp_ms: u32,
}

impl From<WireReading> for RawReading {
    fn from(wire: WireReading) -> Self {
        RawReading::from_wire(&wire.id, wire.timestamp_ms)
    }
}

impl From<RawReading> for WireReading {
    fn from(reading: RawReading) -> Self {
        WireReading {
            id: reading.tag.map(|t| t.0).unwrap_or_default(),
            timestamp_ms: reading.timestamp_ms,
        }
    }
}
