//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic stroke commands
//! - preserve paint order (back-to-front = insertion order)

mod cmd;
mod list;

pub use cmd::{ArcCmd, DrawCmd, ShadowCmd};
pub use list::DrawList;
