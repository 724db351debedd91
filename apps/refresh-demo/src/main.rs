//! Headless walk-through of a refreshable list.
//!
//! A 50-row feed sits in a scroll host. Pulling the top prepends five rows,
//! pulling the bottom appends five; each fetch takes two seconds before the
//! list reloads and the edge is stopped. Run with `RUST_LOG=debug` to see
//! every phase transition.

mod feed;

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use edgepull_core::prelude::*;
use edgepull_testing::TestScrollHost;
use web_time::Instant;

use crate::feed::{Feed, ROW_HEIGHT};

const INITIAL_ROWS: usize = 50;
const ROWS_PER_FETCH: usize = 5;
const VIEWPORT_HEIGHT: f32 = 480.0;
const FETCH_DELAY: Duration = Duration::from_secs(2);
const FRAME: Duration = Duration::from_millis(16);
const PULL_DISTANCE: f32 = 64.0;
const DRAG_SAMPLES: usize = 12;

/// Logs indicator updates in place of drawing them.
struct LogIndicator;

impl PullHooks for LogIndicator {
    fn on_progress_update(&self, edge: Edge, progress: f32) {
        log::debug!("{edge} indicator at {:.0}%", progress.min(1.0) * 100.0);
    }

    fn on_enter_busy(&self, edge: Edge) {
        log::info!("{edge} spinner started");
    }

    fn on_exit_busy(&self, edge: Edge) {
        log::info!("{edge} spinner stopped");
    }
}

impl HapticPerformer for LogIndicator {
    fn perform(&self, edge: Edge) {
        log::info!("{edge} haptic tick");
    }
}

/// A fetch started by an edge action, finished once `due` passes.
struct Fetch {
    edge: Edge,
    due: Instant,
}

struct Demo {
    host: Rc<TestScrollHost>,
    controller: PullController,
    feed: Rc<RefCell<Feed>>,
    fetches: Rc<RefCell<Vec<Fetch>>>,
}

impl Demo {
    fn new() -> Result<Self, PullError> {
        let feed = Rc::new(RefCell::new(Feed::with_rows(INITIAL_ROWS)));
        let host = TestScrollHost::new(VIEWPORT_HEIGHT, feed.borrow().content_height());
        let config = PullConfig::default().with_bottom(EdgeConfig::load().with_enabled(true));
        let controller = PullController::attach(host.clone(), config)?;

        let indicator = Rc::new(LogIndicator);
        controller.set_hooks(indicator.clone());
        controller.set_haptics(indicator);

        let fetches: Rc<RefCell<Vec<Fetch>>> = Rc::new(RefCell::new(Vec::new()));
        for edge in Edge::ALL {
            let feed = Rc::clone(&feed);
            let fetches = Rc::clone(&fetches);
            controller.set_action(edge, move |edge| {
                // the model changes now; the list only reloads when the fetch lands
                match edge {
                    Edge::Top => feed.borrow_mut().prepend(ROWS_PER_FETCH),
                    Edge::Bottom => feed.borrow_mut().append(ROWS_PER_FETCH),
                }
                fetches.borrow_mut().push(Fetch {
                    edge,
                    due: Instant::now() + FETCH_DELAY,
                });
            });
        }

        Ok(Self {
            host,
            controller,
            feed,
            fetches,
        })
    }

    /// One finger gesture that drags the content to `target` and lets go.
    fn pull_to(&self, target: f32) {
        let from = self.host.offset();
        self.host.begin_gesture();
        for sample in 1..=DRAG_SAMPLES {
            let t = sample as f32 / DRAG_SAMPLES as f32;
            self.host.scroll_to(from + (target - from) * t);
            thread::sleep(FRAME);
        }
        self.host.end_gesture();
        self.host.bounce_to_rest(self.controller.content_insets());
    }

    /// Runs frames until every fetch has landed and the view is at rest.
    fn run_until_idle(&self) {
        let mut last_frame = Instant::now();
        while self.host.is_animating() || !self.fetches.borrow().is_empty() {
            thread::sleep(FRAME);
            let now = Instant::now();
            let elapsed = now.duration_since(last_frame).as_nanos() as u64;
            last_frame = now;

            self.host.advance_frame(elapsed);
            self.land_due_fetches(now);
        }
    }

    fn land_due_fetches(&self, now: Instant) {
        let due: Vec<Edge> = {
            let mut fetches = self.fetches.borrow_mut();
            let (ready, waiting): (Vec<Fetch>, Vec<Fetch>) =
                fetches.drain(..).partition(|fetch| fetch.due <= now);
            *fetches = waiting;
            ready.into_iter().map(|fetch| fetch.edge).collect()
        };

        for edge in due {
            log::info!("{edge} fetch landed, {} rows", self.feed.borrow().row_count());
            // stop first: rows that land during the snap-back are reconciled
            self.controller.stop(edge);
            self.reload(edge);
        }
    }

    fn reload(&self, edge: Edge) {
        let growth = self.feed.borrow().content_height() - self.host.content_height();
        if growth <= 0.0 {
            return;
        }
        match edge {
            Edge::Top => self.host.prepend_content(growth),
            Edge::Bottom => self.host.append_content(growth),
        }
    }

    fn report(&self, scene: &str) {
        let feed = self.feed.borrow();
        log::info!(
            "[{scene}] offset {:.1}, {} rows ({} .. {}), first visible row {}",
            self.host.offset(),
            feed.row_count(),
            feed.first().unwrap_or("-"),
            feed.last().unwrap_or("-"),
            (self.host.offset().max(0.0) / ROW_HEIGHT) as usize,
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let demo = match Demo::new() {
        Ok(demo) => demo,
        Err(err) => {
            log::error!("cannot attach pull controller: {err}");
            std::process::exit(1);
        }
    };
    demo.report("start");

    log::info!("pulling down past the top");
    demo.pull_to(-PULL_DISTANCE);
    demo.run_until_idle();
    demo.report("after refresh");

    log::info!("scrolling to the bottom and pulling up");
    demo.host.scroll_to(demo.host.max_offset());
    demo.pull_to(demo.host.max_offset() + PULL_DISTANCE);
    demo.run_until_idle();
    demo.report("after load");

    log::info!("loading more from a button");
    if let Err(err) = demo.controller.begin_loading() {
        log::warn!("load button ignored: {err}");
    }
    demo.run_until_idle();
    demo.report("after button load");
}
