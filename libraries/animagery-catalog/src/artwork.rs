//! Seeded placeholder artwork.

use animagery_core::Title;

const PLACEHOLDER_HOST: &str = "picsum.photos";

/// Portrait artwork URL for a seed.
pub fn thumbnail_url(seed: &str) -> String {
    format!("https://{}/seed/{}/400/600", PLACEHOLDER_HOST, seed)
}

/// Wide banner URL for a seed.
pub fn cover_url(seed: &str) -> String {
    format!("https://{}/seed/{}-wide/1200/600", PLACEHOLDER_HOST, seed)
}

/// Give a title stable artwork derived from its id.
///
/// Titles that already carry both images, neither of them a placeholder,
/// are returned untouched. Ids are used as seeds so the same title always
/// renders the same images.
pub fn enrich(title: Title) -> Title {
    let has_real_art = !title.thumbnail_url.is_empty()
        && !title.cover_url.is_empty()
        && !title.thumbnail_url.contains(PLACEHOLDER_HOST);
    if has_real_art {
        return title;
    }

    let seed = if title.id.is_empty() {
        title.title.clone()
    } else {
        title.id.clone()
    };

    Title {
        thumbnail_url: thumbnail_url(&seed),
        cover_url: cover_url(&seed),
        ..title
    }
}
