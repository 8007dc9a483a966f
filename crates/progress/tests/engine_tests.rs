mod support;

use std::time::Duration;

use stylable_progress::testing::SharedBuffer;
use stylable_progress::{ProgressConfig, ProgressLogger, TaskStatus};
use support::{count_occurrences, fg, frame, rows, screen};
use tokio::time;

const HIDE_CURSOR: &[u8] = b"\x1b[?25l";
const SHOW_CURSOR: &[u8] = b"\x1b[?25h";

fn logger(config: ProgressConfig) -> (ProgressLogger<SharedBuffer>, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let logger = ProgressLogger::new(buffer.clone(), config).unwrap();
    (logger, buffer)
}

#[tokio::test(start_paused = true)]
async fn active_session_is_shared() {
    let (logger, _buffer) = logger(ProgressConfig::default());

    let first = logger.get_progress_info("Restoring");
    let second = logger.get_progress_info("Ignored");
    assert!(first.same_session(&second));
    assert_eq!(second.status_message(), "Restoring");
    assert!(logger.session().is_some_and(|s| s.same_session(&first)));

    first.create_task_operation("project");
    time::sleep(Duration::from_millis(260)).await;
    assert_eq!(logger.redraw_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn nothing_is_drawn_without_operations() {
    let (logger, buffer) = logger(ProgressConfig::default().with_hide_cursor(false));

    let progress = logger.get_progress_info("Waiting");
    time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(logger.redraw_count(), 0);

    progress.dispose();
    assert_eq!(logger.redraw_count(), 0);
    assert!(buffer.is_empty());
    assert!(!logger.is_active());
}

#[tokio::test(start_paused = true)]
async fn redraws_follow_the_refresh_interval() {
    let (logger, _buffer) = logger(ProgressConfig::default());
    let progress = logger.get_progress_info("Building");
    progress.create_task_operation("core");

    time::sleep(Duration::from_millis(240)).await;
    assert_eq!(logger.redraw_count(), 0);
    time::sleep(Duration::from_millis(20)).await;
    assert_eq!(logger.redraw_count(), 1);
    time::sleep(Duration::from_millis(500)).await;
    assert_eq!(logger.redraw_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn dispose_draws_one_final_frame() {
    let (logger, buffer) = logger(ProgressConfig::default());
    let progress = logger.get_progress_info("Building");
    let op = progress.create_task_operation("core");

    time::sleep(Duration::from_millis(260)).await;
    assert_eq!(logger.redraw_count(), 1);

    op.completed().unwrap();
    progress.dispose();
    assert_eq!(logger.redraw_count(), 2);
    assert!(!logger.is_active());

    time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(logger.redraw_count(), 2);

    let parser = screen(&buffer);
    assert_eq!(frame(&parser, 2), ["", "Building 1 completed"]);
}

#[tokio::test(start_paused = true)]
async fn cursor_hidden_while_active() {
    let (logger, buffer) = logger(ProgressConfig::default());
    {
        let progress = logger.get_progress_info("Building");
        progress.create_task_operation("core");
        assert!(screen(&buffer).screen().hide_cursor());
    }

    let output = buffer.contents();
    assert_eq!(count_occurrences(&output, HIDE_CURSOR), 1);
    assert_eq!(count_occurrences(&output, SHOW_CURSOR), 1);
    assert!(!screen(&buffer).screen().hide_cursor());
}

#[tokio::test(start_paused = true)]
async fn cursor_left_alone_when_disabled() {
    let (logger, buffer) = logger(ProgressConfig::default().with_hide_cursor(false));
    {
        let progress = logger.get_progress_info("Building");
        progress.create_task_operation("core").completed().unwrap();
    }

    let output = buffer.contents();
    assert_eq!(count_occurrences(&output, HIDE_CURSOR), 0);
    assert_eq!(count_occurrences(&output, SHOW_CURSOR), 0);
    assert!(!output.is_empty());
}

#[tokio::test(start_paused = true)]
async fn summary_of_ten_operations_on_screen() {
    let (logger, buffer) = logger(ProgressConfig::default());
    {
        let progress = logger.get_progress_info("Restoring");
        progress.set_total_operations(10);
        let ops: Vec<_> = (0..10)
            .map(|i| progress.create_task_operation(format!("project {i}")))
            .collect();
        for op in &ops[..4] {
            op.completed().unwrap();
        }
        ops[4].failed("project 4: error").unwrap();
        ops[5].failed("project 5: error").unwrap();
        ops[6].skipped().unwrap();
    }

    let parser = screen(&buffer);
    let rows = rows(&parser);

    assert!(rows[0].contains("project 4: error"));
    assert!(rows[1].contains("project 5: error"));
    assert!(rows[2].ends_with("project 7"));
    assert!(rows[3].ends_with("project 8"));
    assert!(rows[4].ends_with("project 9"));
    assert_eq!(rows[5], "");
    assert_eq!(rows[6], "Restoring 4 completed 2 failed 1 skipped");
    assert_eq!(rows[7], format!("{} 70%", "█".repeat(50)));
    assert!(rows[8..].iter().all(String::is_empty));
    assert!(!rows.iter().any(|row| row.contains("project 0")));

    assert_eq!(fg(&parser, 0, 0), vt100::Color::Idx(1));
    assert_eq!(fg(&parser, 2, 0), vt100::Color::Idx(8));
    assert_eq!(fg(&parser, 6, 10), vt100::Color::Idx(2));
    assert_eq!(fg(&parser, 7, 0), vt100::Color::Idx(4));
    assert_eq!(fg(&parser, 7, 34), vt100::Color::Idx(4));
    assert_eq!(fg(&parser, 7, 35), vt100::Color::Idx(8));
    assert_eq!(fg(&parser, 7, 49), vt100::Color::Idx(8));
}

#[tokio::test(start_paused = true)]
async fn shrinking_frame_leaves_nothing_behind() {
    let (logger, buffer) = logger(ProgressConfig::default().with_bar_width(10));
    let progress = logger.get_progress_info("Building");
    progress.set_total_operations(3);
    let ops: Vec<_> = ["core", "cli", "docs"]
        .into_iter()
        .map(|name| progress.create_task_operation(name))
        .collect();

    logger.redraw();
    assert_eq!(rows(&screen(&buffer))[4], "Building");

    for op in &ops {
        op.completed().unwrap();
    }
    logger.redraw();

    let parser = screen(&buffer);
    assert_eq!(
        frame(&parser, 5),
        ["", "Building 3 completed", "██████████ 100%", "", ""]
    );
}

#[tokio::test(start_paused = true)]
async fn anchor_offsets_the_display() {
    let (logger, buffer) = logger(ProgressConfig::default().with_anchor(4, 2));
    {
        let progress = logger.get_progress_info("Working");
        progress.create_task_operation("step").skipped().unwrap();
    }

    let rows = rows(&screen(&buffer));
    assert_eq!(rows[0], "");
    assert_eq!(rows[1], "");
    assert_eq!(rows[2], "");
    assert_eq!(rows[3], "    Working 1 skipped");
}

#[tokio::test(start_paused = true)]
async fn status_changes_show_up_within_one_interval() {
    let (logger, buffer) = logger(ProgressConfig::default());
    let progress = logger.get_progress_info("Building");
    let op = progress.create_task_operation("core");

    time::sleep(Duration::from_millis(260)).await;
    assert!(rows(&screen(&buffer))[0].ends_with("core"));

    op.failed("core: 3 errors").unwrap();
    time::sleep(Duration::from_millis(250)).await;
    let rows = rows(&screen(&buffer));
    assert!(rows[0].contains("core: 3 errors"));
    assert_eq!(rows[2], "Building 1 failed");
}

#[tokio::test(start_paused = true)]
async fn stale_scope_does_not_end_a_newer_session() {
    let (logger, _buffer) = logger(ProgressConfig::default());

    let old = logger.get_progress_info("First");
    logger.end_progress();
    assert!(!logger.is_active());

    let new = logger.get_progress_info("Second");
    assert!(!old.same_session(&new));

    drop(old);
    assert!(logger.is_active());
    assert_eq!(logger.session().unwrap().status_message(), "Second");

    drop(new);
    assert!(!logger.is_active());
}

#[tokio::test(start_paused = true)]
async fn end_progress_twice_draws_once() {
    let (logger, _buffer) = logger(ProgressConfig::default());
    let progress = logger.get_progress_info("Building");
    progress.create_task_operation("core");

    logger.end_progress();
    logger.end_progress();
    drop(progress);
    assert_eq!(logger.redraw_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn changing_the_interval_restarts_the_cadence() {
    let (logger, _buffer) = logger(ProgressConfig::default());
    let progress = logger.get_progress_info("Building");
    progress.create_task_operation("core");

    logger.set_refresh_interval(Duration::from_millis(100));
    assert_eq!(logger.config().refresh_interval, Duration::from_millis(100));

    time::sleep(Duration::from_millis(110)).await;
    assert_eq!(logger.redraw_count(), 1);
    time::sleep(Duration::from_millis(100)).await;
    assert_eq!(logger.redraw_count(), 2);
    // The old 250ms cadence would have fired by now.
    time::sleep(Duration::from_millis(50)).await;
    assert_eq!(logger.redraw_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn new_session_after_end_starts_fresh() {
    let (logger, _buffer) = logger(ProgressConfig::default());
    {
        let progress = logger.get_progress_info("First");
        progress.create_task_operation("a").completed().unwrap();
    }

    let progress = logger.get_progress_info("Second");
    assert_eq!(progress.operation_count(), 0);
    assert_eq!(progress.total_operations(), None);
    assert_eq!(progress.create_task_operation("b").id(), 0);
}

#[tokio::test(start_paused = true)]
async fn oversized_bar_width_from_env_still_draws() {
    let huge = usize::MAX.to_string();
    let config = ProgressConfig::from_lookup(|key| {
        (key == stylable_progress::config::BAR_WIDTH_VAR).then(|| huge.clone())
    });
    let (logger, buffer) = logger(config);
    {
        let progress = logger.get_progress_info("Wide");
        progress.set_total_operations(2);
        progress.create_task_operation("a").completed().unwrap();
        progress.create_task_operation("b").completed().unwrap();
        logger.redraw();
    }

    assert_eq!(logger.redraw_count(), 2);
    let rows = rows(&screen(&buffer));
    assert_eq!(rows[1], "Wide 2 completed");
    assert_eq!(rows[2], format!("{} 100%", "█".repeat(50)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn appends_race_the_cadence() {
    const TASKS: usize = 8;
    const PER_TASK: usize = 25;

    let config = ProgressConfig::default().with_refresh_interval(Duration::from_millis(1));
    let (logger, buffer) = logger(config);
    let progress = logger.get_progress_info("Appending");
    progress.set_total_operations(TASKS * PER_TASK);

    let mut tasks = Vec::new();
    for task in 0..TASKS {
        let session = progress.session().clone();
        tasks.push(tokio::spawn(async move {
            let mut ids = Vec::new();
            for i in 0..PER_TASK {
                let op = session.create_task_operation(format!("task {task} op {i}"));
                ids.push(op.id());
                op.completed()?;
                time::sleep(Duration::from_micros(200)).await;
            }
            Ok::<_, stylable_progress::ProgressError>(ids)
        }));
    }

    let mut all_ids = Vec::new();
    for task in tasks {
        let ids = task.await.unwrap().unwrap();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        all_ids.extend(ids);
    }
    all_ids.sort_unstable();
    assert_eq!(all_ids, (0..TASKS * PER_TASK).collect::<Vec<_>>());

    let ids: Vec<_> = progress.operations().iter().map(|op| op.id).collect();
    assert_eq!(ids, (0..TASKS * PER_TASK).collect::<Vec<_>>());
    assert!(logger.redraw_count() > 0);

    progress.dispose();
    let parser = screen(&buffer);
    assert_eq!(
        frame(&parser, 4),
        [
            String::new(),
            format!("Appending {} completed", TASKS * PER_TASK),
            format!("{} 100%", "█".repeat(50)),
            String::new(),
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn operations_finish_from_many_tasks() {
    let config = ProgressConfig::default().with_refresh_interval(Duration::from_millis(5));
    let (logger, _buffer) = logger(config);
    let progress = logger.get_progress_info("Parallel");
    progress.set_total_operations(40);

    let mut tasks = Vec::new();
    for i in 0..40 {
        let op = progress.create_task_operation(format!("job {i}"));
        tasks.push(tokio::spawn(async move {
            time::sleep(Duration::from_millis(i % 7)).await;
            match i % 4 {
                0 => op.failed(format!("job {i} failed")),
                1 => op.skipped(),
                2 => op.completed_with_warning(),
                _ => op.completed(),
            }
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let summary = progress.summary();
    assert_eq!(summary.failed, 10);
    assert_eq!(summary.skipped, 10);
    assert_eq!(summary.completed, 20);
    assert_eq!(summary.warnings, 10);
    assert_eq!(summary.percentage(), Some(100));
    assert!(
        progress
            .operations()
            .iter()
            .all(|op| op.status != TaskStatus::InProgress)
    );
}

#[test]
fn works_without_an_ambient_runtime() {
    let config = ProgressConfig::default().with_refresh_interval(Duration::from_millis(10));
    let (logger, buffer) = logger(config);
    {
        let progress = logger.get_progress_info("Standalone");
        progress.create_task_operation("step");
        std::thread::sleep(Duration::from_millis(200));
        assert!(logger.redraw_count() >= 1);
    }
    assert!(!logger.is_active());
    assert!(buffer.contents_lossy().contains("Standalone"));
}
