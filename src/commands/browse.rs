//! Browse command - page through the remote listing

use crate::{
    PhotoEaseError,
    commands::Session,
    list::{FetchOutcome, ListController, ListMode},
    output,
    remote::PageFetcher,
};

type Result<T> = std::result::Result<T, PhotoEaseError>;

/// Execute the browse command
///
/// Loads the first page, then keeps loading while more pages are available
/// and fewer than `pages` have been loaded. A failure after the first page
/// is reported and the photos loaded so far are still printed.
///
/// # Errors
///
/// Returns `PhotoEaseError::LoadFailed` if the first page cannot be loaded.
pub async fn execute<F: PageFetcher + Clone>(
    session: &Session<F>,
    pages: u32,
    search: Option<&str>,
) -> Result<()> {
    let mut list = session.open_list(ListMode::All);
    let loaded_pages = load_pages(&mut list, pages).await?;

    if let Some(message) = list.error_message() {
        eprintln!("Stopped after {loaded_pages} page(s): {message}");
        list.dismiss_error();
    }

    if let Some(query) = search {
        list.search(query);
    }
    print_list(&list, session.quiet);
    Ok(())
}

/// Refresh `list` and load up to `pages` pages in total; returns pages loaded
///
/// # Errors
///
/// Returns `PhotoEaseError::LoadFailed` if the first page cannot be loaded.
pub async fn load_pages<F: PageFetcher>(list: &mut ListController<F>, pages: u32) -> Result<u32> {
    if list.refresh().await == FetchOutcome::Failed {
        let message = list.error_message().unwrap_or_default();
        return Err(PhotoEaseError::LoadFailed(message));
    }

    let mut loaded = 1;
    while loaded < pages && list.can_load_more() {
        match list.load_more().await {
            FetchOutcome::Loaded(_) => loaded += 1,
            FetchOutcome::Failed | FetchOutcome::Skipped => break,
        }
    }
    tracing::info!(pages = loaded, photos = list.loaded_count(), "browse finished loading");
    Ok(loaded)
}

pub(crate) fn print_list<F: PageFetcher>(list: &ListController<F>, quiet: bool) {
    let rows = list.filtered_rows();
    if !quiet {
        println!("{}", output::list_header(list.mode(), rows.len(), list.loaded_count()));
        if rows.is_empty() {
            println!("No photos found.");
        }
    }
    for row in &rows {
        println!("{}", output::photo_row(row, quiet));
    }
}
