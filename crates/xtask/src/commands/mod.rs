//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check_catalog;
mod replay;

pub use check_catalog::CheckCatalog;
pub use replay::Replay;

use std::path::PathBuf;

use keeper_content::ContentFactory;

/// Factory over `data_dir`, or the data bundled with `keeper-content`.
fn factory(data_dir: Option<PathBuf>) -> ContentFactory {
    match data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    }
}
