//! Thread-local ambient scope stack.
//!
//! Every [`ScopeStack`] owns its own frames on each thread, so two loggers on
//! the same thread never see each other's scopes. Guards remove the exact frame
//! they pushed, which keeps the stack consistent when guards are released out
//! of order.

use logmsg_domain::LogValues;
use logmsg_ports::ScopeGuard;
use std::cell::{Cell, RefCell};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static FRAMES: RefCell<Vec<Frame>> = const { RefCell::new(Vec::new()) };
    static NEXT_FRAME: Cell<u64> = const { Cell::new(1) };
}

struct Frame {
    owner: u64,
    id: u64,
    scope: ActiveScope,
}

/// One scope active on the current thread.
#[derive(Debug, Clone)]
pub struct ActiveScope {
    /// Category of the façade that pushed the scope.
    pub category: Arc<str>,
    /// Structured payload.
    pub state: Arc<LogValues>,
}

/// Handle to one logger's scopes on every thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeStack {
    owner: u64,
}

impl ScopeStack {
    /// Create a stack that shares no frames with any other stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Push a scope on the current thread; the guard pops it.
    pub fn push(&self, category: &str, state: Arc<LogValues>) -> ScopeGuard {
        let owner = self.owner;
        let id = NEXT_FRAME.with(|next| {
            let id = next.get();
            next.set(id.wrapping_add(1));
            id
        });
        FRAMES.with(|frames| {
            frames.borrow_mut().push(Frame {
                owner,
                id,
                scope: ActiveScope {
                    category: Arc::from(category),
                    state,
                },
            });
        });

        ScopeGuard::new(move || {
            // The thread-local may already be gone when a guard outlives it.
            let _ = FRAMES.try_with(|frames| {
                let mut frames = frames.borrow_mut();
                if let Some(index) = frames
                    .iter()
                    .rposition(|frame| frame.owner == owner && frame.id == id)
                {
                    frames.remove(index);
                }
            });
        })
    }

    /// Active scopes on the current thread, outermost first.
    #[must_use]
    pub fn current(&self) -> Vec<ActiveScope> {
        self.innermost(usize::MAX)
    }

    /// At most `limit` innermost active scopes, outermost first.
    #[must_use]
    pub fn innermost(&self, limit: usize) -> Vec<ActiveScope> {
        FRAMES.with(|frames| {
            let frames = frames.borrow();
            let mut scopes: Vec<ActiveScope> = frames
                .iter()
                .rev()
                .filter(|frame| frame.owner == self.owner)
                .take(limit)
                .map(|frame| frame.scope.clone())
                .collect();
            scopes.reverse();
            scopes
        })
    }

    /// Number of active scopes on the current thread.
    #[must_use]
    pub fn depth(&self) -> usize {
        FRAMES.with(|frames| {
            frames
                .borrow()
                .iter()
                .filter(|frame| frame.owner == self.owner)
                .count()
        })
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
