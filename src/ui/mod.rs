//! Terminal UI: a board view that drives the engine from the keyboard and
//! follows it through its event stream.

mod app;
mod game_view;

pub use app::App;
