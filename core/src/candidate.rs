use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::Result;

/// A host-supplied item the picker can match and select.
///
/// The picker never mutates candidates. Unknown fields are kept in `extra`
/// and written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Display text and match key. A missing name deserializes as `""`.
    #[serde(default)]
    pub name: String,

    /// Host-trusted annotation shown next to the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    /// Explicit pin position. Presence alone pins the candidate, so `0` and
    /// `""` are valid keys.
    #[serde(
        default,
        alias = "orderId",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_id: Option<OrderKey>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Candidate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_order_id(mut self, order_id: impl Into<OrderKey>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn is_pinned(&self) -> bool {
        self.order_id.is_some()
    }
}

/// Sort key for pinned candidates.
///
/// Numbers order numerically, text orders lexicographically, and every
/// number sorts before every text key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderKey {
    Number(i64),
    Text(String),
}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (OrderKey::Number(a), OrderKey::Number(b)) => a.cmp(b),
            (OrderKey::Text(a), OrderKey::Text(b)) => a.cmp(b),
            (OrderKey::Number(_), OrderKey::Text(_)) => Ordering::Less,
            (OrderKey::Text(_), OrderKey::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for OrderKey {
    fn from(value: i64) -> Self {
        OrderKey::Number(value)
    }
}

impl From<i32> for OrderKey {
    fn from(value: i32) -> Self {
        OrderKey::Number(i64::from(value))
    }
}

impl From<&str> for OrderKey {
    fn from(value: &str) -> Self {
        OrderKey::Text(value.to_string())
    }
}

impl From<String> for OrderKey {
    fn from(value: String) -> Self {
        OrderKey::Text(value)
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKey::Number(n) => write!(f, "{n}"),
            OrderKey::Text(s) => f.write_str(s),
        }
    }
}

/// Where a result row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Existing,
    /// The "create new" row built from the query text.
    Synthetic,
}

/// Fuzzy score plus the matched character positions of the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchInfo {
    pub score: u32,
    /// Sorted, de-duplicated character (not byte) offsets into the name.
    pub indices: Vec<u32>,
}

impl MatchInfo {
    pub fn new(score: u32, mut indices: Vec<u32>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self { score, indices }
    }

    /// Contiguous runs of matched characters as half-open char ranges.
    pub fn spans(&self) -> Vec<std::ops::Range<usize>> {
        let mut spans: Vec<std::ops::Range<usize>> = Vec::new();
        for &idx in &self.indices {
            let idx = idx as usize;
            match spans.last_mut() {
                Some(last) if last.end == idx => last.end = idx + 1,
                _ => spans.push(idx..idx + 1),
            }
        }
        spans
    }
}

/// One ranked row. Rebuilt on every recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: Arc<Candidate>,
    pub match_info: Option<MatchInfo>,
    pub origin: Origin,
}

impl ScoredCandidate {
    pub fn existing(candidate: Arc<Candidate>, match_info: Option<MatchInfo>) -> Self {
        Self {
            candidate,
            match_info,
            origin: Origin::Existing,
        }
    }

    pub fn synthetic(candidate: Candidate) -> Self {
        Self {
            candidate: Arc::new(candidate),
            match_info: None,
            origin: Origin::Synthetic,
        }
    }

    pub fn name(&self) -> &str {
        &self.candidate.name
    }

    pub fn is_synthetic(&self) -> bool {
        self.origin == Origin::Synthetic
    }
}

/// What the host receives on commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub candidate: Arc<Candidate>,
    pub origin: Origin,
}

impl Selection {
    pub fn is_new(&self) -> bool {
        self.origin == Origin::Synthetic
    }
}

impl From<&ScoredCandidate> for Selection {
    fn from(row: &ScoredCandidate) -> Self {
        Self {
            candidate: Arc::clone(&row.candidate),
            origin: row.origin,
        }
    }
}

/// Wire formats accepted by [`parse_candidates`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputFormat {
    /// One candidate name per non-empty line.
    #[default]
    Lines,
    /// A single JSON array of candidate objects.
    Json,
    /// One JSON candidate object per non-empty line.
    JsonLines,
}

pub fn parse_candidates(input: &str, format: InputFormat) -> Result<Vec<Candidate>> {
    let candidates = match format {
        InputFormat::Lines => input
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .map(Candidate::new)
            .collect(),
        InputFormat::Json => serde_json::from_str(input)?,
        InputFormat::JsonLines => input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str)
            .collect::<std::result::Result<Vec<Candidate>, _>>()?,
    };
    Ok(candidates)
}
