#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One message in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

/// Marks where a speculative exchange started.
///
/// `epoch` pins the checkpoint to one generation of the log; clearing the log
/// starts a new generation and makes older checkpoints stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    len: usize,
    epoch: u64,
}

/// Ordered transcript, append-only apart from rollback and clear.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
    epoch: u64,
}

impl Conversation {
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of times the log has been cleared.
    pub fn generation(&self) -> u64 {
        self.epoch
    }

    /// Appends the user's turn optimistically and returns the point to roll
    /// back to if the exchange fails.
    pub(crate) fn begin_exchange(&mut self, question: Turn) -> Checkpoint {
        let checkpoint = Checkpoint {
            len: self.turns.len(),
            epoch: self.epoch,
        };
        self.turns.push(question);
        checkpoint
    }

    /// Completes the exchange with the answer. Returns `false` for a stale
    /// checkpoint, in which case the answer is dropped.
    pub(crate) fn commit(&mut self, checkpoint: Checkpoint, answer: Turn) -> bool {
        if checkpoint.epoch != self.epoch || self.turns.len() <= checkpoint.len {
            return false;
        }
        self.turns.push(answer);
        true
    }

    /// Truncates back to the checkpoint. Returns `false` for a stale checkpoint.
    pub(crate) fn rollback(&mut self, checkpoint: Checkpoint) -> bool {
        if checkpoint.epoch != self.epoch {
            return false;
        }
        self.turns.truncate(checkpoint.len);
        true
    }

    pub(crate) fn clear(&mut self) {
        self.turns.clear();
        self.epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollback_restores_length_before_exchange() {
        let mut log = Conversation::default();
        let first = log.begin_exchange(Turn::user("one"));
        assert!(log.commit(first, Turn::assistant("1")));

        let second = log.begin_exchange(Turn::user("two"));
        assert_eq!(log.len(), 3);
        assert!(log.rollback(second));
        assert_eq!(log.turns(), &[Turn::user("one"), Turn::assistant("1")]);
    }

    #[test]
    fn clear_makes_pending_checkpoint_stale() {
        let mut log = Conversation::default();
        let checkpoint = log.begin_exchange(Turn::user("q"));
        log.clear();
        assert_eq!(log.generation(), 1);

        assert!(!log.commit(checkpoint, Turn::assistant("a")));
        assert!(log.is_empty());

        let _ = log.begin_exchange(Turn::user("after clear"));
        assert!(!log.rollback(checkpoint));
        assert_eq!(log.len(), 1);
    }
}
