//! Slot edit protocol for product images.
//!
//! Catalog rows must never reference a blob that was deleted out from
//! under them, so every edit orders its steps storage-first: a new object
//! is uploaded and adopted before its predecessor is touched, and deletes
//! of replaced or removed objects are best-effort. A failed delete leaves
//! an orphaned object behind, which is waste, not corruption.

use std::collections::HashSet;

use partsdesk_core::images::{ImageSlot, ProductImages};

use crate::BlobStore;

/// Delete `url` from the store, logging instead of failing.
pub async fn best_effort_delete(store: &dyn BlobStore, url: &str) {
    if let Err(error) = store.delete(url).await {
        tracing::warn!(url, %error, "blob delete failed, object left orphaned");
    }
}

/// Point a main slot at a freshly uploaded URL, then best-effort delete
/// the object the slot held before. The new URL is adopted even when the
/// old object cannot be deleted.
pub async fn replace_main_slot(
    store: &dyn BlobStore,
    images: &mut ProductImages,
    slot: ImageSlot,
    new_url: String,
) {
    let previous = images.main.set(slot, new_url);
    if let Some(old_url) = previous {
        best_effort_delete(store, &old_url).await;
    }
}

/// Remove one URL from a detail gallery: attempt the blob delete, then
/// drop the URL from the sequence regardless of the outcome. Returns
/// whether the URL was present.
pub async fn remove_detail_url(
    store: &dyn BlobStore,
    images: &mut ProductImages,
    slot: ImageSlot,
    url: &str,
) -> bool {
    best_effort_delete(store, url).await;
    let gallery = images.details.get_mut(slot);
    let before = gallery.len();
    gallery.retain(|existing| existing != url);
    gallery.len() != before
}

/// Best-effort delete every object referenced by `old` but not by `new`.
/// Runs after an images update is persisted, reclaiming the objects the
/// update replaced or dropped.
pub async fn sweep_removed(store: &dyn BlobStore, old: &ProductImages, new: &ProductImages) {
    let kept: HashSet<&str> = new.all_urls().into_iter().collect();
    for url in old.all_urls() {
        if !kept.contains(url) {
            best_effort_delete(store, url).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBlobStore;

    async fn stored_url(store: &MemoryBlobStore, key: &str) -> String {
        store
            .put(key, vec![0xAB], "image/jpeg")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn replace_main_slot_adopts_new_and_deletes_old() {
        let store = MemoryBlobStore::new("https://blobs.local");
        let old_url = stored_url(&store, "products/p1/left-old.jpg").await;
        let new_url = stored_url(&store, "products/p1/left-new.jpg").await;

        let mut images = ProductImages::empty();
        images.main.set(ImageSlot::Left, old_url.clone());

        replace_main_slot(&store, &mut images, ImageSlot::Left, new_url.clone()).await;

        assert_eq!(images.main.get(ImageSlot::Left), Some(new_url.as_str()));
        assert!(!store.contains_url(&old_url));
        assert!(store.contains_url(&new_url));
    }

    #[tokio::test]
    async fn replace_main_slot_keeps_new_url_when_delete_fails() {
        let store = MemoryBlobStore::new("https://blobs.local");
        let old_url = stored_url(&store, "products/p1/back-old.jpg").await;
        let new_url = stored_url(&store, "products/p1/back-new.jpg").await;

        let mut images = ProductImages::empty();
        images.main.set(ImageSlot::Back, old_url.clone());
        store.fail_deletes(true);

        replace_main_slot(&store, &mut images, ImageSlot::Back, new_url.clone()).await;

        // The reference moved on; only the old object is orphaned.
        assert_eq!(images.main.get(ImageSlot::Back), Some(new_url.as_str()));
        assert!(store.contains_url(&old_url));
    }

    #[tokio::test]
    async fn replace_main_slot_on_empty_slot_deletes_nothing() {
        let store = MemoryBlobStore::new("https://blobs.local");
        let new_url = stored_url(&store, "products/p1/right.jpg").await;

        let mut images = ProductImages::empty();
        replace_main_slot(&store, &mut images, ImageSlot::Right, new_url.clone()).await;

        assert_eq!(images.main.get(ImageSlot::Right), Some(new_url.as_str()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn remove_detail_url_drops_reference_even_when_delete_fails() {
        let store = MemoryBlobStore::new("https://blobs.local");
        let url = stored_url(&store, "products/p1/detail-1.jpg").await;

        let mut images = ProductImages::empty();
        images.details.get_mut(ImageSlot::Left).push(url.clone());
        store.fail_deletes(true);

        let removed = remove_detail_url(&store, &mut images, ImageSlot::Left, &url).await;

        assert!(removed);
        assert!(images.details.get(ImageSlot::Left).is_empty());
        assert!(store.contains_url(&url));
    }

    #[tokio::test]
    async fn remove_detail_url_reports_absent_url() {
        let store = MemoryBlobStore::new("https://blobs.local");
        let mut images = ProductImages::empty();

        let removed = remove_detail_url(
            &store,
            &mut images,
            ImageSlot::Right,
            "https://blobs.local/not-referenced.jpg",
        )
        .await;

        assert!(!removed);
    }

    #[tokio::test]
    async fn sweep_removed_deletes_only_dropped_urls() {
        let store = MemoryBlobStore::new("https://blobs.local");
        let dropped = stored_url(&store, "products/p1/dropped.jpg").await;
        let kept = stored_url(&store, "products/p1/kept.jpg").await;
        let added = stored_url(&store, "products/p1/added.jpg").await;

        let mut old = ProductImages::empty();
        old.main.set(ImageSlot::Left, dropped.clone());
        old.details.get_mut(ImageSlot::Back).push(kept.clone());

        let mut new = ProductImages::empty();
        new.details.get_mut(ImageSlot::Back).push(kept.clone());
        new.main.set(ImageSlot::Right, added.clone());

        sweep_removed(&store, &old, &new).await;

        assert!(!store.contains_url(&dropped));
        assert!(store.contains_url(&kept));
        assert!(store.contains_url(&added));
    }
}
