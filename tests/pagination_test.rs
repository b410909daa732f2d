//! Feed pagination against the scripted backend

#[macro_use]
mod common;

use common::*;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use vidtube::client::VideoQuery;
use vidtube::shared::ClientError;
use vidtube::store::pagination::{LoadOutcome, PagedFeed, VideoPages};
use vidtube::store::{CurrentUser, RecommendationSlice, VideoSlice};

fn feed(backend: &Arc<FakeBackend>) -> PagedFeed<vidtube::shared::models::Video, VideoQuery, VideoPages<FakeBackend>> {
    PagedFeed::new(VideoPages(backend.clone()), 10, VideoQuery::default())
}

#[tokio::test]
async fn test_three_pages_of_twenty_five() {
    let backend = Arc::new(FakeBackend::with_videos(catalog(25)));
    let feed = feed(&backend);

    for expected in 1..=3 {
        let outcome = assert_ok!(feed.load_next_page().await);
        assert_eq!(outcome, LoadOutcome::Loaded { page: expected });
    }

    let snapshot = feed.snapshot().await;
    assert_eq!(snapshot.items.len(), 25);
    assert!(!snapshot.has_more);
    assert_eq!(snapshot.cursor, 3);

    // fourth call is a no-op
    assert_eq!(assert_ok!(feed.load_next_page().await), LoadOutcome::Skipped);
    assert_eq!(backend.call_count(LIST_VIDEOS), 3);
    assert_eq!(
        backend
            .calls(LIST_VIDEOS)
            .into_iter()
            .map(|c| c.arg)
            .collect::<Vec<_>>(),
        vec!["page=1", "page=2", "page=3"]
    );
}

#[tokio::test]
async fn test_double_call_issues_one_request() {
    let backend = Arc::new(FakeBackend::with_videos(catalog(25)));
    let feed = feed(&backend);

    let (first, second) = tokio::join!(feed.load_next_page(), feed.load_next_page());

    assert_eq!(assert_ok!(first), LoadOutcome::Loaded { page: 1 });
    assert_eq!(assert_ok!(second), LoadOutcome::Skipped);
    assert_eq!(backend.call_count(LIST_VIDEOS), 1);
}

#[tokio::test]
async fn test_near_end_trigger_is_gated_by_in_flight_fetch() {
    let backend = Arc::new(FakeBackend::with_videos(catalog(25)));
    let feed = feed(&backend);
    assert_ok!(feed.load_next_page().await);

    // far from the end: nothing
    assert_eq!(assert_ok!(feed.on_near_end(2).await), LoadOutcome::Skipped);

    // several scroll events crossing the threshold at once
    let (a, b, c) = tokio::join!(feed.on_near_end(8), feed.on_near_end(9), feed.on_near_end(9));
    let loaded = [a, b, c]
        .into_iter()
        .filter(|o| matches!(o, Ok(LoadOutcome::Loaded { .. })))
        .count();
    assert_eq!(loaded, 1);
    assert_eq!(backend.call_count(LIST_VIDEOS), 2);
}

#[tokio::test]
async fn test_near_end_with_index_past_the_list() {
    let backend = Arc::new(FakeBackend::with_videos(catalog(25)));
    let feed = feed(&backend);
    assert_ok!(feed.load_next_page().await);

    assert_eq!(
        assert_ok!(feed.on_near_end(usize::MAX).await),
        LoadOutcome::Loaded { page: 2 }
    );
}

#[tokio::test]
async fn test_failure_leaves_items_and_cursor() {
    let backend = Arc::new(FakeBackend::with_videos(catalog(25)));
    let feed = feed(&backend);
    assert_ok!(feed.load_next_page().await);

    backend.fail(LIST_VIDEOS, ClientError::network());
    assert_err!(feed.load_next_page().await, ClientError::Network { .. });

    let snapshot = feed.snapshot().await;
    assert_eq!(snapshot.items.len(), 10);
    assert_eq!(snapshot.cursor, 1);
    assert!(!snapshot.loading);
    assert!(snapshot.error.as_ref().is_some_and(ClientError::is_network));

    // no retry on its own; the next explicit call asks for page 2 again
    assert_eq!(backend.call_count(LIST_VIDEOS), 2);
    backend.succeed(LIST_VIDEOS);
    assert_eq!(
        assert_ok!(feed.load_next_page().await),
        LoadOutcome::Loaded { page: 2 }
    );
    assert!(feed.snapshot().await.error.is_none());
}

#[tokio::test]
async fn test_refetched_item_keeps_latest_copy() {
    let backend = Arc::new(FakeBackend::with_videos(catalog(25)));
    let feed = feed(&backend);
    assert_ok!(feed.load_next_page().await);

    // the server shifted: v10 now also shows up on page 2, retitled
    {
        let mut videos = backend.videos.lock().unwrap();
        let mut moved = video("v10");
        moved.title = "Retitled".to_string();
        videos.insert(10, moved);
    }
    assert_ok!(feed.load_next_page().await);

    let snapshot = feed.snapshot().await;
    assert_unique_ids!(snapshot.items);
    assert_eq!(snapshot.items.len(), 19);
    assert_eq!(snapshot.items[9].title, "Retitled");
}

#[tokio::test]
async fn test_detached_feed_drops_late_page() {
    let backend = Arc::new(FakeBackend::with_videos(catalog(25)));
    let feed = feed(&backend);
    let gate = backend.hold(LIST_VIDEOS);

    let (outcome, ()) = tokio::join!(feed.load_next_page(), async {
        tokio::task::yield_now().await;
        feed.detach().await;
        gate.notify_one();
    });

    assert_eq!(assert_ok!(outcome), LoadOutcome::Discarded);
    assert!(feed.snapshot().await.items.is_empty());
    assert_eq!(backend.call_count(LIST_VIDEOS), 1);
}

#[tokio::test]
async fn test_video_slice_search_resets_feed() {
    let backend = Arc::new(FakeBackend::with_videos(catalog(25)));
    let slice = VideoSlice::new(backend.clone(), CurrentUser::anonymous(), 10);
    assert_ok!(slice.load_next_page().await);

    slice
        .set_query(VideoQuery {
            search: Some("Video v2".to_string()),
            ..VideoQuery::default()
        })
        .await;
    assert!(slice.feed().await.items.is_empty());

    assert_ok!(slice.load_next_page().await);
    let feed = slice.feed().await;
    // v2 and v20..v25
    assert_eq!(feed.items.len(), 7);
    assert!(!feed.has_more);
}

#[tokio::test]
async fn test_category_change_restarts_recommendations() {
    let backend = Arc::new(FakeBackend::new());
    {
        let mut recommended = backend.recommended.lock().unwrap();
        for n in 1..=6 {
            let mut v = video(&format!("r{n}"));
            v.category = Some(if n % 2 == 0 { "music" } else { "sports" }.to_string());
            recommended.push(v);
        }
    }
    let slice = RecommendationSlice::new(backend.clone(), 10);
    assert_ok!(slice.load_next_page().await);
    assert_eq!(slice.snapshot().await.items.len(), 6);

    slice.select_category("music").await;
    assert_eq!(slice.selected_category().await.as_deref(), Some("music"));
    assert_ok!(slice.load_next_page().await);
    assert_eq!(slice.snapshot().await.items.len(), 3);

    slice.select_category("all").await;
    assert_eq!(slice.selected_category().await, None);

    slice.exclude(Some("r1")).await;
    assert_ok!(slice.load_next_page().await);
    let ids: Vec<String> = slice.snapshot().await.items.into_iter().map(|v| v.id).collect();
    assert!(!ids.contains(&"r1".to_string()));
    assert_eq!(ids.len(), 5);

    let last = backend.calls(RECOMMENDATIONS).pop().unwrap();
    assert_eq!(last.arg, "page=1;category=-;exclude=r1");
}
