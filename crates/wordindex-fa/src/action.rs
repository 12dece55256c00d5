// Action handles and the sinks that receive them
//
// End states store small `ActionId` handles rather than callbacks. Whoever
// drives an engine supplies an `ActionSink` that turns handles into side
// effects, so one compiled graph can be shared by many engines, each with
// its own counters.

/// Opaque handle naming the action attached to a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(u32);

impl ActionId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of the action in a table indexed by handle.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Receiver of fired actions.
pub trait ActionSink {
    fn fire(&mut self, action: ActionId);
}

impl<F: FnMut(ActionId)> ActionSink for F {
    #[inline]
    fn fire(&mut self, action: ActionId) {
        self(action)
    }
}

/// Table of zero-argument callbacks addressed by [`ActionId`].
///
/// Handles are assigned in registration order, starting at 0.
#[derive(Default)]
pub struct ActionTable<'a> {
    callbacks: Vec<Box<dyn FnMut() + 'a>>,
}

impl std::fmt::Debug for ActionTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionTable")
            .field("len", &self.callbacks.len())
            .finish()
    }
}

impl<'a> ActionTable<'a> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Store `callback` and return its handle.
    pub fn register<F: FnMut() + 'a>(&mut self, callback: F) -> ActionId {
        let id = ActionId::new(self.callbacks.len() as u32);
        self.callbacks.push(Box::new(callback));
        id
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl ActionSink for ActionTable<'_> {
    fn fire(&mut self, action: ActionId) {
        if let Some(callback) = self.callbacks.get_mut(action.index()) {
            callback();
        }
    }
}
