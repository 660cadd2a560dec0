use crate::domain::extractor::extract;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

/// Payment details recovered from a bank notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedFields {
    pub amount: f64,
    pub payee: String,
    pub date_extracted: String,
}

/// A message that has been received but not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSms {
    pub from: Option<String>,
    pub to: Option<String>,
    pub text: Option<String>,
    pub parsed: Option<ParsedFields>,
    pub received_at: OffsetDateTime,
    pub raw: Option<Value>,
}

impl NewSms {
    /// Builds a record stamped with the server's receipt time, running extraction on `text`.
    #[must_use]
    pub fn receive(from: Option<String>, to: Option<String>, text: String, raw: Option<Value>) -> Self {
        Self::receive_at(from, to, text, raw, OffsetDateTime::now_utc())
    }

    #[must_use]
    pub fn receive_at(
        from: Option<String>,
        to: Option<String>,
        text: String,
        raw: Option<Value>,
        received_at: OffsetDateTime,
    ) -> Self {
        let text = strip_nul(&text);
        let parsed = extract(&text);
        Self {
            from: from.as_deref().map(strip_nul),
            to: to.as_deref().map(strip_nul),
            text: Some(text),
            parsed,
            received_at,
            raw: raw.map(strip_nul_value),
        }
    }
}

/// Removes U+0000, which Postgres `TEXT` and `JSONB` columns reject.
#[must_use]
pub fn strip_nul(value: &str) -> String {
    value.replace('\0', "")
}

fn strip_nul_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(strip_nul(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nul_value).collect()),
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (strip_nul(&k), strip_nul_value(v))).collect()),
        other => other,
    }
}

/// A stored message. Immutable once written.
#[derive(Debug, Clone, PartialEq)]
pub struct SmsRecord {
    pub id: Uuid,
    pub from: Option<String>,
    pub to: Option<String>,
    pub text: Option<String>,
    pub parsed: Option<ParsedFields>,
    pub received_at: Option<OffsetDateTime>,
    pub raw: Option<Value>,
}

impl SmsRecord {
    #[must_use]
    pub fn from_new(id: Uuid, sms: NewSms) -> Self {
        Self {
            id,
            from: sms.from,
            to: sms.to,
            text: sms.text,
            parsed: sms.parsed,
            received_at: Some(sms.received_at),
            raw: sms.raw,
        }
    }
}

/// How many records a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimit(u32);

impl ListLimit {
    pub const DEFAULT: Self = Self(100);
    pub const MAX: Self = Self(200);

    /// Coerces a caller-supplied limit.
    ///
    /// Missing, non-numeric, non-finite, or sub-1 values fall back to the default.
    /// Fractions are truncated and anything above the maximum is clamped.
    #[must_use]
    pub fn resolve(raw: Option<&str>) -> Self {
        let Some(value) = raw.and_then(|s| s.trim().parse::<f64>().ok()) else {
            return Self::DEFAULT;
        };
        if !value.is_finite() || value < 1.0 {
            return Self::DEFAULT;
        }
        if value >= f64::from(Self::MAX.0) {
            return Self::MAX;
        }
        // Bounded to [1, 200) above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let truncated = value.trunc() as u32;
        Self(truncated)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for ListLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}
