//! Favorites commands - list, add and remove favorites

use crate::{
    PhotoEaseError,
    commands::{Session, browse::print_list},
    favorites::StoreError,
    list::{FetchOutcome, ListMode},
    output,
    photo::{Photo, PhotoId},
    remote::PageFetcher,
};

type Result<T> = std::result::Result<T, PhotoEaseError>;

/// List favorites, optionally filtered by title
///
/// # Errors
///
/// Returns `PhotoEaseError::LoadFailed` if the favorites store cannot be read.
pub async fn list<F: PageFetcher + Clone>(session: &Session<F>, search: Option<&str>) -> Result<()> {
    let mut list = session.open_list(ListMode::Favorite);
    if list.refresh().await == FetchOutcome::Failed {
        return Err(PhotoEaseError::LoadFailed(list.error_message().unwrap_or_default()));
    }
    if let Some(query) = search {
        list.search(query);
    }
    print_list(&list, session.quiet);
    Ok(())
}

/// Mark `photo` as favorite
///
/// # Errors
///
/// Returns `PhotoEaseError::StoreError` if the favorites store rejects the write.
pub fn add<F: PageFetcher + Clone>(session: &Session<F>, photo: &Photo) -> Result<()> {
    let mut list = session.open_list(ListMode::All);
    list.toggle_favorite(photo, true)?;

    if !session.quiet {
        println!("Added to favorites:");
    }
    if let Some(record) = session.store.get(photo.id)? {
        println!("{}", output::favorite_record(&record, session.quiet));
    }
    Ok(())
}

/// Remove photo `id` from favorites
///
/// # Errors
///
/// Returns `PhotoEaseError::StoreError` with `StoreError::NotFound` if `id`
/// is not a favorite, or if the store cannot be updated.
pub fn remove<F: PageFetcher + Clone>(session: &Session<F>, id: PhotoId) -> Result<()> {
    let record = session.store.get(id)?.ok_or(StoreError::NotFound(id))?;
    let mut list = session.open_list(ListMode::All);
    list.toggle_favorite(&record.to_photo(), false)?;

    if !session.quiet {
        println!("Removed from favorites: {} {}", record.id, record.title);
    }
    Ok(())
}
