//! Snowflake identifiers used as primary keys for every table
//!
//! Layout (64 bits, sign bit always zero):
//! - 41 bits: milliseconds since [`Snowflake::EPOCH`]
//! - 10 bits: worker id
//! - 12 bits: per-millisecond sequence

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const WORKER_BITS: i64 = 10;
const SEQUENCE_BITS: i64 = 12;
const WORKER_MASK: u16 = (1 << WORKER_BITS) - 1;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;

/// Unique 64-bit record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// 2024-01-01 00:00:00 UTC in milliseconds
    pub const EPOCH: i64 = 1_704_067_200_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which the id was generated
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> (WORKER_BITS + SEQUENCE_BITS)) + Self::EPOCH
    }

    #[inline]
    pub fn worker_id(&self) -> u16 {
        // Masked to 10 bits, cannot truncate
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let worker = ((self.0 >> SEQUENCE_BITS) & i64::from(WORKER_MASK)) as u16;
        worker
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Snowflake)
            .ok_or(SnowflakeParseError::InvalidFormat)
    }
}

// Ids travel as strings so browsers never round them through f64
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct SnowflakeVisitor;

        impl Visitor<'_> for SnowflakeVisitor {
            type Value = Snowflake;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an id as a string or integer")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Snowflake, E> {
                Ok(Snowflake(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Snowflake, E> {
                i64::try_from(value)
                    .map(Snowflake)
                    .map_err(|_| E::custom("id out of range"))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Snowflake, E> {
                value
                    .parse()
                    .map_err(|_| E::custom(format!("invalid id: {value}")))
            }
        }

        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

/// Lock-free Snowflake generator, one per process
pub struct SnowflakeGenerator {
    worker_id: u16,
    /// Packed `(timestamp << 12) | sequence` of the last issued id
    state: AtomicI64,
}

impl SnowflakeGenerator {
    /// Only the low 10 bits of `worker_id` are used.
    pub fn new(worker_id: u16) -> Self {
        Self {
            worker_id: worker_id & WORKER_MASK,
            state: AtomicI64::new(0),
        }
    }

    pub fn generate(&self) -> Snowflake {
        loop {
            let previous = self.state.load(Ordering::Acquire);
            let last_ms = previous >> SEQUENCE_BITS;
            let now_ms = Self::now_ms().max(last_ms);

            let next = if now_ms == last_ms {
                let sequence = (previous & SEQUENCE_MASK) + 1;
                if sequence > SEQUENCE_MASK {
                    std::hint::spin_loop();
                    continue;
                }
                (now_ms << SEQUENCE_BITS) | sequence
            } else {
                now_ms << SEQUENCE_BITS
            };

            if self
                .state
                .compare_exchange(previous, next, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
            {
                let ms = next >> SEQUENCE_BITS;
                let sequence = next & SEQUENCE_MASK;
                return Snowflake::new(
                    ((ms - Snowflake::EPOCH) << (WORKER_BITS + SEQUENCE_BITS))
                        | (i64::from(self.worker_id) << SEQUENCE_BITS)
                        | sequence,
                );
            }
        }
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    fn now_ms() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|d| i64::try_from(d.as_millis()).ok())
            .unwrap_or(Snowflake::EPOCH)
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn parses_positive_decimal_strings_only() {
        assert_eq!("42".parse::<Snowflake>().unwrap(), Snowflake::new(42));
        assert!("0".parse::<Snowflake>().is_err());
        assert!("-7".parse::<Snowflake>().is_err());
        assert!("abc".parse::<Snowflake>().is_err());
    }

    #[test]
    fn json_uses_strings_but_accepts_numbers() {
        let id = Snowflake::new(987_654_321_012_345_678);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"987654321012345678\"");

        let from_str: Snowflake = serde_json::from_str("\"55\"").unwrap();
        let from_num: Snowflake = serde_json::from_str("55").unwrap();
        assert_eq!(from_str, from_num);
    }

    #[test]
    fn generated_ids_increase_and_keep_worker() {
        let generator = SnowflakeGenerator::new(7);
        let mut last = Snowflake::default();
        for _ in 0..5000 {
            let id = generator.generate();
            assert!(id > last);
            assert_eq!(id.worker_id(), 7);
            last = id;
        }
    }

    #[test]
    fn worker_id_is_masked() {
        assert_eq!(SnowflakeGenerator::new(1024 + 3).worker_id(), 3);
    }

    #[test]
    fn timestamp_is_close_to_now() {
        let id = SnowflakeGenerator::new(1).generate();
        let now = SnowflakeGenerator::now_ms();
        assert!((now - id.timestamp()).abs() < 1000);
    }

    #[test]
    fn concurrent_generation_has_no_duplicates() {
        let generator = Arc::new(SnowflakeGenerator::new(2));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = Arc::clone(&generator);
                std::thread::spawn(move || (0..2000).map(|_| generator.generate()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 8000);
    }
}
