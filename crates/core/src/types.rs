use serde::{Deserialize, Deserializer};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Monetary amounts are exact decimals stored as `NUMERIC(12,2)`.
pub type Price = rust_decimal::Decimal;

/// A partial-update field that distinguishes "leave as is" from "clear".
///
/// Deserialized with `#[serde(default)]`:
/// - field absent -> [`Patch::Keep`]
/// - field `null` -> [`Patch::Clear`]
/// - field present -> [`Patch::Set`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    /// Whether the update writes this column at all.
    pub fn is_touched(&self) -> bool {
        !matches!(self, Patch::Keep)
    }

    /// The value to write when touched (`None` clears the column).
    pub fn value(&self) -> Option<&T> {
        match self {
            Patch::Set(v) => Some(v),
            Patch::Keep | Patch::Clear => None,
        }
    }

    /// Convert the carried value, keeping the keep/clear distinction.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<Option<U>, E>) -> Result<Patch<U>, E> {
        Ok(match self {
            Patch::Keep => Patch::Keep,
            Patch::Clear => Patch::Clear,
            Patch::Set(v) => match f(v)? {
                Some(u) => Patch::Set(u),
                None => Patch::Clear,
            },
        })
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Set(v),
            None => Patch::Clear,
        })
    }
}
