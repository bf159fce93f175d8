//! Delete Use Case
//!
//! Removes a single build or a whole app from the registry, then cleans up
//! the files nothing refers to anymore. Deletions over HTTP must present the
//! shared delete secret; the local CLI is trusted.

mod result;
mod use_case;


pub use result::{DeleteAppResult, DeleteAuth, DeleteBuildResult, DeleteError};
pub use use_case::DeleteUseCase;
