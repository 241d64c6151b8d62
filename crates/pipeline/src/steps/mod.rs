//! Built-in steps
//!
//! | step                 | pre                     | process          | post                 |
//! |----------------------|-------------------------|------------------|----------------------|
//! | `null`               |                         |                  |                      |
//! | `dedupe`             | drop duplicate links    |                  |                      |
//! | `datefolders`        |                         | date hierarchy   |                      |
//! | `bookmarkletsfolder` | take `bookmarklets`     | add bookmarklets |                      |
//! | `chromefolder`       | drop `chrome`           |                  | add `chrome://` pages|
//! | `quicklinks`         | take `quicklinks*`      |                  | re-append them       |
//! | `starred`            | drop `starred`          |                  | add starred links    |
//! | `allinone`           | drop `all`              |                  | add copy of all links|
//! | `queuefolder`        |                         |                  | reset `queue`        |

mod allinone;
mod bookmarklets;
mod chrome;
mod datefolders;
mod dedupe;
mod null;
mod queue;
mod quicklinks;
mod starred;

pub use allinone::AllInOneStep;
pub use bookmarklets::{BookmarkletsStep, DEFAULT_BOOKMARKLETS};
pub use chrome::{ChromeFolderStep, CHROME_URLS};
pub use datefolders::{DateFolderMode, DateFoldersStep};
pub use dedupe::DedupeStep;
pub use null::NullStep;
pub use queue::QueueFolderStep;
pub use quicklinks::QuicklinksStep;
pub use starred::StarredStep;

use crate::context::StepOptions;
use crate::error::Result;
use crate::registry::StepRegistry;
use crate::step::Step;

fn boxed<S: Step + 'static>(step: S) -> Result<Box<dyn Step>> {
    Ok(Box::new(step))
}

/// Register every built-in step, in default sequence order
pub fn register_builtin(registry: &mut StepRegistry) {
    registry.register(NullStep::NAME, |_: &StepOptions| boxed(NullStep));
    registry.register(DedupeStep::NAME, |_: &StepOptions| boxed(DedupeStep));
    registry.register(DateFoldersStep::NAME, |options: &StepOptions| {
        boxed(DateFoldersStep::from_options(options)?)
    });
    registry.register(BookmarkletsStep::NAME, |_: &StepOptions| {
        boxed(BookmarkletsStep::default())
    });
    registry.register(ChromeFolderStep::NAME, |_: &StepOptions| boxed(ChromeFolderStep));
    registry.register(QuicklinksStep::NAME, |options: &StepOptions| {
        boxed(QuicklinksStep::from_options(options)?)
    });
    registry.register(StarredStep::NAME, |_: &StepOptions| boxed(StarredStep));
    registry.register(AllInOneStep::NAME, |_: &StepOptions| boxed(AllInOneStep));
    registry.register(QueueFolderStep::NAME, |_: &StepOptions| boxed(QueueFolderStep));
}
