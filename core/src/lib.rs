//! Ranking and interaction logic for a filterable pick list.
//!
//! The host supplies [`Candidate`]s and a [`PickerConfig`]; a view feeds
//! [`Action`]s or raw [`Key`]s into the [`InteractionController`], which
//! re-ranks with a [`Ranker`], applies [`PinOrderPolicy`] and the
//! [`NewEntrySynthesizer`], and reports commits and cancels to a
//! [`PickerHost`].

mod candidate;
mod config;
mod controller;
mod error;
mod pin;
mod ranking;
mod state;
mod synth;
mod view;

pub use candidate::Candidate;
pub use candidate::InputFormat;
pub use candidate::MatchInfo;
pub use candidate::OrderKey;
pub use candidate::Origin;
pub use candidate::ScoredCandidate;
pub use candidate::Selection;
pub use candidate::parse_candidates;
pub use config::CaseMatching;
pub use config::ExactMatchPolicy;
pub use config::Normalization;
pub use config::PickerConfig;
pub use controller::Action;
pub use controller::Disposition;
pub use controller::Focus;
pub use controller::InteractionController;
pub use controller::Key;
pub use controller::PickerHost;
pub use error::PickerError;
pub use error::Result;
pub use pin::PinOrderPolicy;
pub use ranking::NucleoRanker;
pub use ranking::Ranker;
pub use state::SearchState;
pub use synth::NewEntrySynthesizer;
pub use view::NameSegment;
pub use view::RowView;
pub use view::ViewAdapter;
pub use view::name_segments;
