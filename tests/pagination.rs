// tests/pagination.rs
//! Behavior of the lazy offset/limit pagination engine.

use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use smartling_client::{paginate, OffsetPager};
use std::future::{ready, Ready};
use std::sync::{Arc, Mutex};

#[derive(Debug, PartialEq, Eq)]
struct TestError(&'static str);

type CallLog = Arc<Mutex<Vec<(usize, usize)>>>;

/// Serves `data` in offset/limit slices, recording every request.
fn paged_source(
    data: Vec<i32>,
    calls: CallLog,
) -> impl FnMut(usize, usize) -> Ready<Result<Vec<i32>, TestError>> {
    move |offset, limit| {
        calls.lock().unwrap().push((offset, limit));
        let page = if offset >= data.len() {
            Vec::new()
        } else {
            let end = (offset + limit).min(data.len());
            data[offset..end].to_vec()
        };
        ready(Ok(page))
    }
}

#[tokio::test]
async fn yields_all_items_across_full_pages_and_final_partial_page() {
    let calls: CallLog = Arc::default();
    let stream = paginate(paged_source(vec![1, 2, 3, 4, 5], calls.clone()), 2);

    let items: Vec<i32> = stream.try_collect().await.unwrap();

    assert_eq!(items, vec![1, 2, 3, 4, 5]);
    // The short page at offset 4 ends the traversal; offset 5 is never requested.
    assert_eq!(*calls.lock().unwrap(), vec![(0, 2), (2, 2), (4, 2)]);
}

#[tokio::test]
async fn short_page_terminates_without_a_further_fetch() {
    let calls: CallLog = Arc::default();
    let stream = paginate(paged_source(vec![10, 20, 30], calls.clone()), 2);

    let items: Vec<i32> = stream.try_collect().await.unwrap();

    assert_eq!(items, vec![10, 20, 30]);
    assert_eq!(*calls.lock().unwrap(), vec![(0, 2), (2, 2)]);
}

#[tokio::test]
async fn exact_multiple_of_page_size_tolerates_one_extra_empty_fetch() {
    let calls: CallLog = Arc::default();
    let stream = paginate(paged_source(vec![1, 2, 3, 4], calls.clone()), 2);

    let items: Vec<i32> = stream.try_collect().await.unwrap();

    assert_eq!(items, vec![1, 2, 3, 4]);
    // Both pages were full, so the boundary is only visible from the
    // zero-item fetch at offset 4. That fetch must happen and must not
    // be treated as an error.
    assert_eq!(*calls.lock().unwrap(), vec![(0, 2), (2, 2), (4, 2)]);
}

#[tokio::test]
async fn empty_collection_is_a_single_fetch_and_an_empty_stream() {
    let calls: CallLog = Arc::default();
    let stream = paginate(paged_source(Vec::new(), calls.clone()), 3);

    let items: Vec<i32> = stream.try_collect().await.unwrap();

    assert!(items.is_empty());
    assert_eq!(*calls.lock().unwrap(), vec![(0, 3)]);
}

#[tokio::test]
async fn offsets_are_monotonic_and_match_items_already_returned() {
    let calls: CallLog = Arc::default();
    let data: Vec<i32> = (0..10).collect();
    let stream = paginate(paged_source(data.clone(), calls.clone()), 3);

    let items: Vec<i32> = stream.try_collect().await.unwrap();
    assert_eq!(items, data);

    let calls = calls.lock().unwrap();
    let mut returned = 0usize;
    for (offset, limit) in calls.iter().copied() {
        assert_eq!(offset, returned, "offset must equal items returned so far");
        returned += limit.min(data.len() - offset);
    }
}

#[tokio::test]
async fn pager_pulls_one_item_at_a_time_and_tracks_its_cursor() {
    let calls: CallLog = Arc::default();
    let mut pager = OffsetPager::new(paged_source(vec![7, 8, 9], calls.clone()), 2);

    assert_eq!(pager.offset(), 0);
    assert!(!pager.is_exhausted());

    assert_eq!(pager.try_next().await, Ok(Some(7)));
    assert_eq!(pager.offset(), 2);
    // Second pull drains the buffer without another fetch.
    assert_eq!(pager.try_next().await, Ok(Some(8)));
    assert_eq!(calls.lock().unwrap().len(), 1);

    assert_eq!(pager.try_next().await, Ok(Some(9)));
    assert!(pager.is_exhausted());
    assert_eq!(pager.try_next().await, Ok(None));
    assert_eq!(pager.try_next().await, Ok(None));
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn fetch_error_propagates_and_fuses_the_pager() {
    let calls: CallLog = Arc::default();
    let calls_in_fetch = calls.clone();
    let mut pager = OffsetPager::new(
        move |offset: usize, limit: usize| {
            calls_in_fetch.lock().unwrap().push((offset, limit));
            ready(if offset == 0 {
                Ok(vec![1, 2])
            } else {
                Err(TestError("boom"))
            })
        },
        2,
    );

    assert_eq!(pager.try_next().await, Ok(Some(1)));
    assert_eq!(pager.try_next().await, Ok(Some(2)));
    assert_eq!(pager.try_next().await, Err(TestError("boom")));

    // After an error no further fetches are issued.
    assert!(pager.is_exhausted());
    assert_eq!(pager.try_next().await, Ok(None));
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn stream_ends_at_first_error_but_keeps_earlier_items() {
    let stream = paginate(
        move |offset: usize, _limit: usize| {
            ready(if offset == 0 {
                Ok(vec!["a", "b"])
            } else {
                Err(TestError("down"))
            })
        },
        2,
    );

    let mut collected = Vec::new();
    let mut stream = std::pin::pin!(stream);
    let mut seen_error = false;
    while let Some(item) = futures::StreamExt::next(&mut stream).await {
        match item {
            Ok(value) => collected.push(value),
            Err(error) => {
                assert_eq!(error, TestError("down"));
                seen_error = true;
            }
        }
    }

    assert!(seen_error);
    assert_eq!(collected, vec!["a", "b"]);
}

#[tokio::test]
async fn retraversal_requires_a_new_pager_and_restarts_at_offset_zero() {
    let calls: CallLog = Arc::default();
    let data = vec![1, 2, 3];

    let first: Vec<i32> = paginate(paged_source(data.clone(), calls.clone()), 2)
        .try_collect()
        .await
        .unwrap();
    let second: Vec<i32> = paginate(paged_source(data.clone(), calls.clone()), 2)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(first, second);
    let calls = calls.lock().unwrap();
    assert_eq!(*calls, vec![(0, 2), (2, 2), (0, 2), (2, 2)]);
}
