//! Client-side queue of `ChatEvent`s between the turn runner and the UI.
//!
//! Single-threaded (WASM): the queue lives behind a `RefCell` and the UI
//! drains it once per frame. An optional waker runs after every emit so a
//! sleeping frame loop notices turns that finish in the background.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use chat_types::event::ChatEvent;

type Waker = Rc<dyn Fn()>;

/// Shared handle; clones see the same queue and waker.
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Rc<RefCell<VecDeque<ChatEvent>>>,
    waker: Rc<RefCell<Option<Waker>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the callback run after each emit, e.g. an egui repaint request.
    /// Replaces any previous waker.
    pub fn set_waker(&self, waker: impl Fn() + 'static) {
        *self.waker.borrow_mut() = Some(Rc::new(waker));
    }

    pub fn emit(&self, event: ChatEvent) {
        self.queue.borrow_mut().push_back(event);
        // Clone out so the waker may touch the bus.
        let waker = self.waker.borrow().clone();
        if let Some(wake) = waker {
            wake();
        }
    }

    /// Take every queued event, oldest first.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}
