use derive_more::{Deref, Display, FromStr};
use serde::{Deserialize, Serialize, Serializer, de::Deserializer};
use std::{
    hash::{BuildHasher, Hasher, RandomState},
    sync::{LazyLock, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};
use thiserror::Error as ThisError;
use ulid::Ulid;

///
/// RecordIdError
///

#[derive(Debug, ThisError)]
pub enum RecordIdError {
    #[error("invalid record id string")]
    InvalidString,

    #[error("monotonic error - overflow")]
    GeneratorOverflow,
}

///
/// RecordId
///
/// Timestamp-derived unique id for one in-memory record.
/// ULID-backed so ids created later always sort after earlier ones,
/// which keeps store iteration in insertion order.
///

#[derive(
    Clone, Copy, Debug, Deref, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd,
)]
#[repr(transparent)]
pub struct RecordId(Ulid);

impl RecordId {
    #[must_use]
    pub const fn nil() -> Self {
        Self(Ulid::nil())
    }

    /// Build a deterministic id from a millisecond timestamp and a sequence
    /// number. Fixture seeding uses this so seeded order is stable.
    #[must_use]
    pub const fn from_parts(timestamp_ms: u64, seq: u128) -> Self {
        Self(Ulid::from_parts(timestamp_ms, seq))
    }

    /// Generate an id with the current timestamp.
    /// Falls back to nil on generator overflow.
    #[must_use]
    pub fn generate() -> Self {
        Self::try_generate().unwrap_or_else(|_| Self::nil())
    }

    /// Fallible id generation preserving the error type.
    pub fn try_generate() -> Result<Self, RecordIdError> {
        generate()
    }

    /// Parse the canonical 26-character form.
    pub fn parse(encoded: &str) -> Result<Self, RecordIdError> {
        let inner = Ulid::from_string(encoded).map_err(|_| RecordIdError::InvalidString)?;

        Ok(Self(inner))
    }

    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        self.0.timestamp_ms()
    }
}

impl From<Ulid> for RecordId {
    fn from(inner: Ulid) -> Self {
        Self(inner)
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::nil()
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;

        Self::parse(&encoded).map_err(serde::de::Error::custom)
    }
}

///
/// GENERATOR is lazily initiated with a Mutex
/// it has to keep state to make sure id order is maintained
///

static GENERATOR: LazyLock<Mutex<Generator>> = LazyLock::new(|| Mutex::new(Generator::default()));

/// Generate a RecordId using the global monotonic generator.
fn generate() -> Result<RecordId, RecordIdError> {
    let mut generator = GENERATOR.lock().expect("id generator mutex poisoned");

    generator.generate()
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// Entropy for the non-timestamp bits. The ulid crate's own generator needs
/// `rand`, which the workspace does not carry; hasher seeds are enough for
/// ids that only need to be unique within one process.
fn entropy() -> u128 {
    let seed = RandomState::new().build_hasher().finish();

    (u128::from(seed) << 64) | u128::from(RandomState::new().build_hasher().finish())
}

///
/// Generator
///
/// Monotonic: within the same millisecond the previous id is incremented
/// instead of regenerated, so later ids always compare greater.
///

#[derive(Default)]
struct Generator {
    previous: RecordId,
}

impl Generator {
    /// Monotonic id generation; increments within the same millisecond.
    fn generate(&mut self) -> Result<RecordId, RecordIdError> {
        let last_ts = self.previous.timestamp_ms();
        let ts = now_millis();

        // maybe time went backward, or it is the same ms.
        // increment instead of generating fresh entropy so order holds
        if ts <= last_ts {
            if let Some(next) = self.previous.increment() {
                self.previous = RecordId(next);

                return Ok(self.previous);
            }

            return Err(RecordIdError::GeneratorOverflow);
        }

        let id = RecordId(Ulid::from_parts(ts, entropy()));
        self.previous = id;

        Ok(id)
    }
}

///
/// TESTS
///
