//! Receivers for incrementally delivered categories

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::{Stream, StreamExt};

use crate::model::CategoryRef;

/// Consumer of a category fetch.
///
/// `on_category_received` runs zero or more times, each call strictly after the
/// previous one, then `done_fetching_categories` runs exactly once. Callbacks come
/// from the fetch worker, so implementations hand results over to their own
/// context themselves.
pub trait CategoryReceiver: Send + Sync {
    fn on_category_received(&self, category: CategoryRef);

    fn done_fetching_categories(&self);
}

/// Event carried by [`ChannelReceiver`]
#[derive(Clone, Debug)]
pub enum CategoryEvent {
    Received(CategoryRef),
    Done,
}

/// Receiver that forwards callbacks into an unbounded channel
#[derive(Clone, Debug)]
pub struct ChannelReceiver {
    tx: UnboundedSender<CategoryEvent>,
}

impl ChannelReceiver {
    pub fn new() -> (Self, UnboundedReceiver<CategoryEvent>) {
        let (tx, rx) = mpsc::unbounded();
        (Self { tx }, rx)
    }

    fn send(&self, event: CategoryEvent) {
        // The consumer may have stopped listening; the fetch still completes.
        if self.tx.unbounded_send(event).is_err() {
            tracing::trace!("Category receiver channel closed");
        }
    }
}

impl CategoryReceiver for ChannelReceiver {
    fn on_category_received(&self, category: CategoryRef) {
        self.send(CategoryEvent::Received(category));
    }

    fn done_fetching_categories(&self) {
        self.send(CategoryEvent::Done);
        self.tx.close_channel();
    }
}

/// Turns channel events into a stream of categories ending at `Done`.
pub fn category_stream(
    events: impl Stream<Item = CategoryEvent>,
) -> impl Stream<Item = CategoryRef> {
    events
        .take_while(|event| futures::future::ready(!matches!(event, CategoryEvent::Done)))
        .filter_map(|event| {
            futures::future::ready(match event {
                CategoryEvent::Received(category) => Some(category),
                CategoryEvent::Done => None,
            })
        })
}
