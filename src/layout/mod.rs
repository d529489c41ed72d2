//! Responsive grid layout for the dashboard.
//!
//! Every placed widget has one [`LayoutEntry`] per [`Breakpoint`]. The
//! entries for a breakpoint are independent of the others: dragging a
//! widget on a wide screen does not move it on a narrow one.
//!
//! New entries are produced by the [`reconcile`] pass; user drags and
//! resizes replace entries wholesale through the store.

mod breakpoint;
mod reconcile;

pub use breakpoint::{Breakpoint, ParseBreakpointError};
pub use reconcile::{reconcile, ReconcileReport, FALLBACK_SIZE};

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::instance::InstanceId;

/// Position and span of one widget at one breakpoint, in grid cells.
///
/// Field names follow the grid library's wire format
/// (`{i, x, y, w, h, minW, minH, maxW, maxH}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEntry {
    /// Instance this entry positions.
    pub i: InstanceId,
    /// Column of the top-left cell.
    pub x: u32,
    /// Row of the top-left cell.
    pub y: u32,
    /// Columns spanned.
    pub w: u32,
    /// Rows spanned.
    pub h: u32,
    /// Narrowest width the grid should allow when resizing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<u32>,
    /// Shortest height the grid should allow when resizing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<u32>,
    /// Widest width the grid should allow when resizing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<u32>,
    /// Tallest height the grid should allow when resizing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<u32>,
}

impl LayoutEntry {
    /// An unbounded entry.
    pub fn new(i: impl Into<InstanceId>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            i: i.into(),
            x,
            y,
            w,
            h,
            min_w: None,
            min_h: None,
            max_w: None,
            max_h: None,
        }
    }

    /// First row below this entry.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }
}

/// Breakpoint-keyed layout map.
///
/// Serialized as a JSON object keyed by breakpoint name. Deserialization is
/// lenient: unknown breakpoint names and malformed entries are skipped with
/// a warning, so one bad record never discards the whole board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layouts {
    entries: BTreeMap<Breakpoint, Vec<LayoutEntry>>,
}

impl Layouts {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries at `breakpoint`; empty if none were ever set.
    pub fn get(&self, breakpoint: Breakpoint) -> &[LayoutEntry] {
        self.entries
            .get(&breakpoint)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Replaces the entries at `breakpoint`.
    pub fn set(&mut self, breakpoint: Breakpoint, entries: Vec<LayoutEntry>) {
        self.entries.insert(breakpoint, entries);
    }

    /// Mutable entries at `breakpoint`, creating an empty list if needed.
    pub fn entries_mut(&mut self, breakpoint: Breakpoint) -> &mut Vec<LayoutEntry> {
        self.entries.entry(breakpoint).or_default()
    }

    /// Returns the entry for `id` at `breakpoint`.
    pub fn find(&self, breakpoint: Breakpoint, id: &InstanceId) -> Option<&LayoutEntry> {
        self.get(breakpoint).iter().find(|e| &e.i == id)
    }

    /// Returns `true` if no breakpoint holds any entry.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    /// Removes every entry at every breakpoint.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates breakpoints that have an entry list, widest first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &[LayoutEntry])> {
        self.entries.iter().map(|(bp, v)| (*bp, v.as_slice()))
    }

    /// Parses the persisted JSON form.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serializes to the persisted JSON form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn from_raw(raw: BTreeMap<String, Value>) -> Self {
        let mut layouts = Layouts::new();
        for (name, value) in raw {
            let breakpoint = match name.parse::<Breakpoint>() {
                Ok(bp) => bp,
                Err(_) => {
                    tracing::warn!("Ignoring layout for unknown breakpoint '{}'", name);
                    continue;
                }
            };
            let Value::Array(items) = value else {
                tracing::warn!("Ignoring non-list layout at {}", breakpoint);
                continue;
            };
            let entries = layouts.entries_mut(breakpoint);
            for item in items {
                match serde_json::from_value::<LayoutEntry>(item) {
                    Ok(entry) => entries.push(entry),
                    Err(e) => {
                        tracing::warn!("Skipping malformed layout entry at {}: {}", breakpoint, e)
                    }
                }
            }
        }
        layouts
    }
}

impl Serialize for Layouts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Layouts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_raw(raw))
    }
}
