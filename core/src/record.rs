//! Message records and pages as served by the inbox API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// A single message with its receive timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    /// Opaque message id, carried along for traceability only
    pub id: String,

    /// Receive time in milliseconds since the Unix epoch
    pub internal_date: i64,
}

impl MessageRecord {
    pub fn new(id: impl Into<String>, internal_date: i64) -> Self {
        Self {
            id: id.into(),
            internal_date,
        }
    }

    /// Receive time as a UTC datetime, if the millisecond value is in range
    pub fn received_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.internal_date)
    }
}

/// One page of messages, in the order they were returned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessagePage {
    pub messages: Vec<MessageRecord>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl MessagePage {
    pub fn new(messages: Vec<MessageRecord>) -> Self {
        Self {
            messages,
            offset: None,
            limit: None,
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

/// `internalDate` arrives as a number from the local API and as a decimal
/// string straight from Gmail.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    internal_date: Option<RawTimestamp>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPage {
    messages: Vec<RawRecord>,
    #[serde(default)]
    offset: Option<u64>,
    #[serde(default)]
    limit: Option<u64>,
}

impl TryFrom<RawPage> for MessagePage {
    type Error = DatasetError;

    fn try_from(raw: RawPage) -> Result<Self, Self::Error> {
        let messages = raw
            .messages
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.validate(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            messages,
            offset: raw.offset,
            limit: raw.limit,
        })
    }
}

impl RawRecord {
    fn validate(self, index: usize) -> Result<MessageRecord, DatasetError> {
        let id = self.id.unwrap_or_default();
        let invalid = |reason: String| DatasetError::InvalidRecord {
            index,
            id: id.clone(),
            reason,
        };

        let internal_date = match self.internal_date {
            None | Some(RawTimestamp::Other(serde_json::Value::Null)) => {
                return Err(invalid("missing internal_date".to_string()));
            }
            Some(RawTimestamp::Millis(ms)) => ms,
            Some(RawTimestamp::Text(text)) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| invalid(format!("internal_date '{text}' is not an integer")))?,
            Some(RawTimestamp::Other(value)) => {
                return Err(invalid(format!(
                    "internal_date {value} is not an integer"
                )));
            }
        };

        Ok(MessageRecord { id, internal_date })
    }
}
