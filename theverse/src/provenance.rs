//! Citation metadata attached to source values.

use serde::{Deserialize, Serialize};

/// Where a value comes from: a human-readable citation, a URL, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
}

impl Provenance {
    pub fn new(reference: Option<String>, reference_url: Option<String>) -> Self {
        Self {
            reference,
            reference_url,
        }
    }

    /// True when neither a citation nor a URL is present.
    pub fn is_empty(&self) -> bool {
        self.reference.is_none() && self.reference_url.is_none()
    }

    /// Number of fields present, as serialized.
    pub(crate) fn field_count(&self) -> usize {
        usize::from(self.reference.is_some()) + usize::from(self.reference_url.is_some())
    }

    /// Returns `self` if it cites anything, otherwise a copy of `fallback`.
    ///
    /// Fields are never mixed: a citation and a URL always come from the same source.
    pub fn or(self, fallback: &Provenance) -> Provenance {
        if self.is_empty() {
            fallback.clone()
        } else {
            self
        }
    }
}
