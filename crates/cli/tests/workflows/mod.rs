//! Workflow integration tests
//!
//! Each test drives the real `pbm` binary against a temporary
//! `Bookmarks` file and inspects the file afterwards.

pub mod inspect;
pub mod organize;
