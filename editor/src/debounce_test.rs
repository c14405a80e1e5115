use super::*;

const QUIET: Duration = Duration::from_millis(200);

#[tokio::test(start_paused = true)]
async fn rapid_submissions_collapse_to_the_latest_value() {
    let (debouncer, mut rx) = channel::<u32>(QUIET);

    debouncer.submit(1);
    debouncer.submit(2);
    debouncer.submit(3);

    assert_eq!(rx.recv().await, Some(3));

    // Nothing else surfaces, even well past the quiet interval.
    tokio::time::sleep(QUIET * 4).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn quiet_gaps_produce_separate_emissions() {
    let (debouncer, mut rx) = channel::<&str>(QUIET);

    debouncer.submit("first");
    assert_eq!(rx.recv().await, Some("first"));

    debouncer.submit("second");
    assert_eq!(rx.recv().await, Some("second"));
}

#[tokio::test(start_paused = true)]
async fn value_submitted_inside_the_window_restarts_the_timer() {
    let (debouncer, mut rx) = channel::<u32>(QUIET);

    debouncer.submit(1);
    tokio::time::sleep(QUIET / 2).await;
    assert!(rx.try_recv().is_err(), "released before the quiet interval elapsed");

    debouncer.submit(2);
    tokio::time::sleep(QUIET / 2).await;
    // Still inside the restarted window.
    assert!(rx.try_recv().is_err());

    assert_eq!(rx.recv().await, Some(2));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_sender_flushes_the_pending_value() {
    let (debouncer, mut rx) = channel::<u32>(QUIET);

    debouncer.submit(42);
    drop(debouncer);

    assert_eq!(rx.recv().await, Some(42));
    assert_eq!(rx.recv().await, None);
}
