//! Terminal front end for `quickpick-core`.
//!
//! [`PickerView`] renders the picker with ratatui and turns crossterm input
//! into controller actions. [`app::run_picker`] drives it against any
//! backend; [`app::run`] sets up a real terminal on stderr.

mod activity;
pub mod app;
pub mod cli;
mod hint_bar;
mod line_editor;
pub mod logging;
mod picker_view;
mod render;

pub use activity::ActivityScope;
pub use activity::PointerActivity;
pub use activity::Subscription;
pub use app::PickerOutcome;
pub use picker_view::PickerView;
