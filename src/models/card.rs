//! Card event record and the value types derived from it.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Matches minutes the store treats as numeric (`minuto REGEXP '^[0-9]+$'`).
static NUMERIC_MINUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid minute pattern"));

/// Kind of disciplinary card.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardKind {
    #[serde(rename = "Amarelo")]
    Yellow,
    #[serde(rename = "Vermelho")]
    Red,
}

impl CardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yellow => "Amarelo",
            Self::Red => "Vermelho",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Amarelo" => Some(Self::Yellow),
            "Vermelho" => Some(Self::Red),
            _ => None,
        }
    }
}

/// One card issued during a match, as stored in the `cartoes` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct CardEvent {
    pub id: i64,
    pub cartao: String,
    pub atleta: String,
    pub clube: String,
    pub posicao: String,
    /// Raw minute text; may be non-numeric in imported data.
    pub minuto: String,
    pub partida_id: i64,
    pub rodata: i64,
    pub num_camisa: i64,
}

impl CardEvent {
    /// Minute of the event, only when the stored value is purely numeric.
    pub fn minute(&self) -> Option<i64> {
        parse_minute(&self.minuto)
    }
}

/// Parse a minute value the way the store does: digits only, no sign, no padding.
/// Values beyond `i64::MAX` saturate, as `CAST(minuto AS SIGNED)` does.
pub fn parse_minute(raw: &str) -> Option<i64> {
    if !NUMERIC_MINUTE.is_match(raw) {
        return None;
    }
    Some(raw.parse().unwrap_or(i64::MAX))
}

/// Fifteen-minute match period used by the time distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeBucket {
    Minutes0To15,
    Minutes16To30,
    Minutes31To45,
    Minutes46To60,
    Minutes61To75,
    Minutes76To90,
    Stoppage,
}

impl TimeBucket {
    /// Every bucket in chronological order.
    pub const ALL: [TimeBucket; 7] = [
        Self::Minutes0To15,
        Self::Minutes16To30,
        Self::Minutes31To45,
        Self::Minutes46To60,
        Self::Minutes61To75,
        Self::Minutes76To90,
        Self::Stoppage,
    ];

    pub fn for_minute(minute: i64) -> Self {
        match minute {
            ..=15 => Self::Minutes0To15,
            16..=30 => Self::Minutes16To30,
            31..=45 => Self::Minutes31To45,
            46..=60 => Self::Minutes46To60,
            61..=75 => Self::Minutes61To75,
            76..=90 => Self::Minutes76To90,
            _ => Self::Stoppage,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Minutes0To15 => "0-15min",
            Self::Minutes16To30 => "16-30min",
            Self::Minutes31To45 => "31-45min",
            Self::Minutes46To60 => "46-60min",
            Self::Minutes61To75 => "61-75min",
            Self::Minutes76To90 => "76-90min",
            Self::Stoppage => "90+min",
        }
    }
}
