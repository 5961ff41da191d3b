//! Photo gallery loading.
//!
//! Photos are uploaded with numbered names (`1.jpg`, `studio-10.jpg`), and
//! the bucket lists them lexicographically. The gallery orders them by that
//! number so `10` follows `9`.

use std::cmp::Ordering;

use futures::future::try_join_all;
use invite_core::{Photo, StoreError};

use crate::object::ObjectStore;

/// Trailing number of a file stem: `studio-10.jpg` -> 10.
pub fn sequence_number(name: &str) -> Option<u64> {
    let stem = match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    };
    let digits_start = stem
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    stem[digits_start..].parse().ok()
}

/// Numbered photos first in numeric order, then the rest by name.
pub fn sort_photos(photos: &mut [Photo]) {
    photos.sort_by(|a, b| match (a.sequence, b.sequence) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    });
}

/// List `prefix`, resolve every download URL, and return the ordered gallery.
pub async fn load_gallery(store: &dyn ObjectStore, prefix: &str) -> Result<Vec<Photo>, StoreError> {
    let objects = store.list(prefix).await?;
    let urls = try_join_all(objects.iter().map(|obj| store.download_url(obj))).await?;

    let mut photos: Vec<Photo> = objects
        .into_iter()
        .zip(urls)
        .map(|(obj, url)| Photo {
            sequence: sequence_number(&obj.name),
            name: obj.name,
            url,
        })
        .collect();
    sort_photos(&mut photos);

    tracing::info!("Loaded {} photos from {}", photos.len(), prefix);
    Ok(photos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryObjectStore;

    #[test]
    fn test_sequence_number() {
        assert_eq!(sequence_number("10.jpg"), Some(10));
        assert_eq!(sequence_number("studio-7.jpg"), Some(7));
        assert_eq!(sequence_number("snap_003.webp"), Some(3));
        assert_eq!(sequence_number("42"), Some(42));
        assert_eq!(sequence_number("cover.jpg"), None);
        assert_eq!(sequence_number("2024-cover.jpg"), None);
        assert_eq!(sequence_number(".jpg"), None);
        assert_eq!(sequence_number(""), None);
    }

    #[test]
    fn test_sort_photos() {
        let photo = |name: &str| Photo {
            name: name.to_string(),
            url: String::new(),
            sequence: sequence_number(name),
        };
        let mut photos = vec![
            photo("10.jpg"),
            photo("cover.jpg"),
            photo("2.jpg"),
            photo("1.jpg"),
            photo("alpha.jpg"),
        ];
        sort_photos(&mut photos);

        let names: Vec<_> = photos.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["1.jpg", "2.jpg", "10.jpg", "alpha.jpg", "cover.jpg"]);
    }

    #[tokio::test]
    async fn test_load_gallery() {
        let store = MemoryObjectStore::new("https://cdn.example");
        for name in ["10.jpg", "1.jpg", "9.jpg", "2.jpg"] {
            store.put(format!("originals/snap/{name}"));
        }

        let photos = load_gallery(&store, "originals/snap/").await.unwrap();
        let order: Vec<_> = photos.iter().map(|p| p.sequence).collect();
        assert_eq!(order, vec![Some(1), Some(2), Some(9), Some(10)]);
        assert!(photos[3].url.ends_with("originals%2Fsnap%2F10.jpg?alt=media"));
    }

    #[tokio::test]
    async fn test_load_gallery_failure() {
        let store = MemoryObjectStore::new("https://cdn.example");
        store.put("originals/snap/1.jpg");
        store.set_failing(true);
        assert!(load_gallery(&store, "originals/snap/").await.is_err());
    }
}
