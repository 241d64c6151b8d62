//! List the `Bookmarks` files of installed browser profiles

use anyhow::Result;
use cli_lib::profiles;
use tracing::info;

pub fn run(backups: bool) -> Result<()> {
    let roots = profiles::user_data_dirs();
    let found = profiles::list_profile_bookmarks(&roots, backups);
    if found.is_empty() {
        info!("No profile bookmarks under {:?}", roots);
    }
    for path in &found {
        println!("{}", path.display());
    }
    Ok(())
}
