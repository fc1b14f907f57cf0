//! Attachment placeholders
//!
//! A placeholder stands in for a binary value in a text-encoded payload:
//! ```text
//! {"_placeholder": true, "num": 0}
//! ```
//! `num` is the position of the binary value in the attachment list.

use crate::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire key of the placeholder flag
pub const PLACEHOLDER_KEY: &str = "_placeholder";

/// Wire key of the attachment index
pub const NUM_KEY: &str = "num";

/// Positional marker for an extracted binary value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    #[serde(rename = "_placeholder")]
    pub placeholder: bool,
    pub num: i64,
}

impl Placeholder {
    /// Create a placeholder for the attachment at `index`
    pub fn new(index: usize) -> Self {
        Self {
            placeholder: true,
            num: index as i64,
        }
    }

    /// Recognize a decoded mapping as a placeholder.
    ///
    /// Matches only a map with exactly the two wire keys, a boolean flag set
    /// to true and an integer index. Anything else is an ordinary map.
    pub fn from_map(map: &BTreeMap<String, Value>) -> Option<Self> {
        if map.len() != 2 {
            return None;
        }
        match (map.get(PLACEHOLDER_KEY), map.get(NUM_KEY)) {
            (Some(Value::Bool(true)), Some(Value::Int(num))) => Some(Self {
                placeholder: true,
                num: *num,
            }),
            _ => None,
        }
    }

    /// The wire mapping for this placeholder
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        let mut map = BTreeMap::new();
        map.insert(PLACEHOLDER_KEY.to_string(), Value::Bool(self.placeholder));
        map.insert(NUM_KEY.to_string(), Value::Int(self.num));
        map
    }

    /// The attachment index, if it lies within a list of `len` attachments
    pub fn index(&self, len: usize) -> Option<usize> {
        usize::try_from(self.num).ok().filter(|&i| i < len)
    }
}
