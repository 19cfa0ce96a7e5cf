use super::value::{DecodedValue, HDataRow};

/// The decoded form of one relay frame (spec §3).
///
/// `objects` is `None` exactly when the frame was malformed, truncated, or
/// carried an unknown type tag partway through — the "graceful abort"
/// signal consumers use to skip a broken frame without tearing down the
/// session (spec §4.5, §7). `id` and `compression_used` are always
/// populated when they could be read at all.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DecodedMessage {
    pub id: String,
    pub compression_used: bool,
    pub objects: Option<Vec<DecodedValue>>,
}

impl DecodedMessage {
    /// `true` when `id` starts with `_`, marking a server-initiated event
    /// rather than a reply to a client command (spec §3, Glossary).
    pub fn is_event(&self) -> bool {
        self.id.starts_with('_')
    }

    /// The event name with the leading `_` stripped, for event frames.
    pub fn event_name(&self) -> Option<&str> {
        self.id.strip_prefix('_')
    }

    /// Projects the "primary hdata rows" out of this message (spec §6, §8).
    pub fn primary_hdata(&self) -> HDataProjection<'_> {
        let Some(objects) = self.objects.as_ref() else {
            return HDataProjection::Absent;
        };
        let Some(DecodedValue::HData(hdata)) = objects.first() else {
            return HDataProjection::Absent;
        };
        match hdata.rows.as_slice() {
            [single] => HDataProjection::Single(single),
            rows => HDataProjection::Rows(rows),
        }
    }
}

/// Result of projecting a message's first hdata object onto its rows.
#[derive(Debug, PartialEq)]
pub enum HDataProjection<'a> {
    /// No hdata object present, or the frame's objects were absent.
    Absent,
    /// Exactly one row: its field mapping.
    Single(&'a HDataRow),
    /// Zero or more-than-one rows.
    Rows(&'a [HDataRow]),
}
