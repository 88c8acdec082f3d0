use std::fmt;
use std::sync::OnceLock;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

/// Join key between a mounted view and its native peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SessionId(i64);

impl SessionId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// String form handed to native code as the view's `nativeID`.
    pub fn native_id(self) -> String {
        self.0.to_string()
    }

    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<i64>().ok().map(Self)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SessionId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

// Native code may echo the `nativeID` string back instead of a number.
impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(raw) => Ok(Self(raw)),
            Raw::Text(raw) => Self::parse(&raw).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid session identifier: {raw:?}"))
            }),
        }
    }
}

/// Fresh identifier in the positive 32-bit range.
pub fn allocate() -> SessionId {
    let raw = rand::thread_rng().gen_range(1..=i64::from(i32::MAX));
    SessionId(raw)
}

/// Allocates on first use and keeps the value for the owner's lifetime.
#[derive(Debug, Default)]
pub struct LazySessionId {
    cell: OnceLock<SessionId>,
}

impl LazySessionId {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub fn with_value(id: SessionId) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(id);
        Self { cell }
    }

    pub fn get(&self) -> SessionId {
        *self.cell.get_or_init(allocate)
    }

    pub fn peek(&self) -> Option<SessionId> {
        self.cell.get().copied()
    }
}
