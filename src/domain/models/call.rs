//! Call domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A call submission as received from a dialer.
///
/// Optional fields are `None` when omitted or sent as `null`; `number` and
/// `transferred` fall back to empty and `false`. A present but empty
/// `voice_name` or `response_category_name` is treated as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSubmission {
    pub client_campaign_model_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: String,
    #[serde(default)]
    pub transcription: Option<String>,
    #[serde(default)]
    pub stage: Option<i32>,
    #[serde(default)]
    pub voice_name: Option<String>,
    #[serde(default)]
    pub response_category_name: Option<String>,
    #[serde(default)]
    pub list_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transferred: bool,
    #[serde(default)]
    pub dispo_punched: Option<bool>,
}

impl CallSubmission {
    pub fn new(campaign_id: i64, number: impl Into<String>) -> Self {
        Self {
            client_campaign_model_id: campaign_id,
            number: number.into(),
            ..Default::default()
        }
    }

    pub fn with_voice(mut self, name: impl Into<String>) -> Self {
        self.voice_name = Some(name.into());
        self
    }

    pub fn with_response_category(mut self, name: impl Into<String>) -> Self {
        self.response_category_name = Some(name.into());
        self
    }

    pub fn with_transcription(mut self, text: impl Into<String>) -> Self {
        self.transcription = Some(text.into());
        self
    }

    /// Voice name to resolve, if one was supplied.
    pub fn requested_voice(&self) -> Option<&str> {
        self.voice_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Response category name to resolve, if one was supplied.
    pub fn requested_category(&self) -> Option<&str> {
        self.response_category_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A call row ready to be inserted, with all foreign keys resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCall {
    pub campaign_id: i64,
    pub number: String,
    pub transcription: Option<String>,
    pub stage: Option<i32>,
    pub voice_id: Option<i64>,
    pub response_category_id: Option<i64>,
    pub list_id: Option<String>,
    pub transferred: bool,
    pub dispo_punched: Option<bool>,
    pub submitted_at: DateTime<Utc>,
}

impl NewCall {
    /// Build the row from a submission and its resolved lookup ids.
    pub fn from_submission(
        submission: CallSubmission,
        voice_id: Option<i64>,
        response_category_id: Option<i64>,
    ) -> Self {
        Self {
            campaign_id: submission.client_campaign_model_id,
            number: submission.number,
            transcription: submission.transcription,
            stage: submission.stage,
            voice_id,
            response_category_id,
            list_id: submission.list_id,
            transferred: submission.transferred,
            dispo_punched: submission.dispo_punched,
            submitted_at: Utc::now(),
        }
    }
}

/// Identity assigned by the store to an inserted call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCall {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
}
