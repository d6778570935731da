//! Render data handed to the view, plus the hooks the controller drives.
//!
//! Candidate names are untrusted and always escaped when rendered as
//! markup. Hints and help text come from the host and are emitted verbatim.

use askama::Template;

use crate::candidate::MatchInfo;
use crate::candidate::ScoredCandidate;
use crate::error::Result;

/// Effects the controller asks of whatever draws it.
pub trait ViewAdapter {
    /// Give the search field input focus.
    fn request_focus(&mut self);

    /// Bring `index` into view, scrolling only if it is not already visible.
    fn reveal_row(&mut self, index: usize);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSegment {
    pub text: String,
    pub emphasized: bool,
}

/// Everything needed to draw one result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub segments: Vec<NameSegment>,
    pub hint: Option<String>,
    pub highlighted: bool,
    pub synthetic: bool,
}

impl RowView {
    pub fn new(row: &ScoredCandidate, highlighted: bool) -> Self {
        Self {
            segments: name_segments(row.name(), row.match_info.as_ref()),
            hint: row.candidate.hint.clone(),
            highlighted,
            synthetic: row.is_synthetic(),
        }
    }

    pub fn name(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// HTML for the row. The name is escaped, matched runs are wrapped in
    /// `<b>`, and the hint is passed through untouched.
    pub fn to_markup(&self) -> Result<String> {
        let template = RowMarkup {
            segments: &self.segments,
            hint: self.hint.as_deref(),
        };
        Ok(template.render()?)
    }
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"{% for segment in segments %}{% if segment.emphasized %}<b>{{ segment.text }}</b>{% else %}{{ segment.text }}{% endif %}{% endfor %}{% if let Some(hint) = hint %} <span class="hint">{{ hint|safe }}</span>{% endif %}"#
)]
struct RowMarkup<'a> {
    segments: &'a [NameSegment],
    hint: Option<&'a str>,
}

/// Split `name` into plain and emphasized runs using the match spans.
pub fn name_segments(name: &str, info: Option<&MatchInfo>) -> Vec<NameSegment> {
    if name.is_empty() {
        return Vec::new();
    }
    let Some(info) = info else {
        return vec![NameSegment {
            text: name.to_string(),
            emphasized: false,
        }];
    };

    let mut segments: Vec<NameSegment> = Vec::new();
    let mut spans = info.spans().into_iter().peekable();
    for (idx, ch) in name.chars().enumerate() {
        while spans.peek().is_some_and(|span| span.end <= idx) {
            spans.next();
        }
        let emphasized = spans.peek().is_some_and(|span| span.contains(&idx));
        match segments.last_mut() {
            Some(last) if last.emphasized == emphasized => last.text.push(ch),
            _ => segments.push(NameSegment {
                text: ch.to_string(),
                emphasized,
            }),
        }
    }
    segments
}
