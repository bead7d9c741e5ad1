/// Operations that compete for the single in-flight slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    UploadFiles,
    IngestUrl,
    AskQuestion,
}

/// Single-slot lock behind the shared "loading" flag.
///
/// At most one operation holds it. Only the holder can release it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskLock {
    holder: Option<Operation>,
}

impl TaskLock {
    pub fn is_held(&self) -> bool {
        self.holder.is_some()
    }

    pub fn holder(&self) -> Option<Operation> {
        self.holder
    }

    pub(crate) fn try_acquire(&mut self, operation: Operation) -> bool {
        if self.holder.is_some() {
            return false;
        }
        self.holder = Some(operation);
        true
    }

    /// Releases the lock if `operation` holds it. Returns whether it did.
    pub(crate) fn release(&mut self, operation: Operation) -> bool {
        if self.holder == Some(operation) {
            self.holder = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_release() {
        let mut lock = TaskLock::default();
        assert!(lock.try_acquire(Operation::AskQuestion));
        assert!(!lock.try_acquire(Operation::UploadFiles));
        assert!(!lock.release(Operation::UploadFiles));
        assert!(lock.is_held());
        assert!(lock.release(Operation::AskQuestion));
        assert!(lock.try_acquire(Operation::UploadFiles));
    }
}
