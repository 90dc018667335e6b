use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed tag vocabulary a task can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Work,
    Personal,
    Urgent,
    Shopping,
    Study,
}

impl Tag {
    pub const ALL: [Tag; 5] = [Tag::Work, Tag::Personal, Tag::Urgent, Tag::Shopping, Tag::Study];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Work => "work",
            Tag::Personal => "personal",
            Tag::Urgent => "urgent",
            Tag::Shopping => "shopping",
            Tag::Study => "study",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tag {0:?} (expected one of work, personal, urgent, shopping, study)")]
pub struct ParseTagError(pub String);

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseTagError(s.to_string()))
    }
}
