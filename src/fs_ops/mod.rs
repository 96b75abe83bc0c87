//! Filesystem operations: listing the source and moving single files.

mod atomic;
mod copy;
mod duplicate;
mod file_move;
mod helpers;
mod list;
mod util;

pub use duplicate::{OnDuplicate, resolve_destination};
pub use file_move::{MoveOptions, move_file, try_move_file};
pub use helpers::{io_hint, is_cross_device};
pub use list::{list_files, try_list_files};

pub(crate) use file_move::{report_move, try_move_file_claimed};
