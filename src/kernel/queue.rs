use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

use super::message::Message;

/// Unbounded FIFO of messages shared between one producer and one consumer
///
/// `push` wakes a single waiter; `wait_and_pop` blocks until a message is
/// available.
#[derive(Debug, Default)]
pub struct MessageQueue {
    messages: Mutex<VecDeque<Message>>,
    available: Condvar,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and wakes one waiting consumer
    pub fn push(&self, message: Message) {
        self.messages.lock().push_back(message);
        self.available.notify_one();
    }

    /// Removes the oldest message, blocking while the queue is empty
    pub fn wait_and_pop(&self) -> Message {
        let mut messages = self.messages.lock();
        loop {
            if let Some(message) = messages.pop_front() {
                return message;
            }
            self.available.wait(&mut messages);
        }
    }

    /// Removes the oldest message if there is one
    pub fn try_pop(&self) -> Option<Message> {
        self.messages.lock().pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Removes the most recent message equal to `message`, if still queued
    pub(crate) fn retract(&self, message: &Message) -> bool {
        let mut messages = self.messages.lock();
        match messages.iter().rposition(|m| m == message) {
            Some(index) => messages.remove(index).is_some(),
            None => false,
        }
    }
}
