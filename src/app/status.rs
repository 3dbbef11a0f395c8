//! Status reporter - the latest error and the latest success, one of each at most

/// Holds the user-visible outcome messages.
///
/// An operation's start clears both; its completion sets at most one of them,
/// so the two are never populated by the same operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusReporter {
    error: Option<String>,
    success: Option<String>,
}

impl StatusReporter {
    /// An operation is starting
    pub fn begin(&mut self) {
        self.error = None;
        self.success = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.success = None;
        self.error = Some(message.into());
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.error = None;
        self.success = Some(message.into());
    }

    pub fn clear_success(&mut self) {
        self.success = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_mutually_exclusive() {
        let mut status = StatusReporter::default();
        status.succeed("done");
        status.fail("broken");
        assert_eq!(status.error(), Some("broken"));
        assert_eq!(status.success(), None);

        status.succeed("done again");
        assert_eq!(status.error(), None);
        assert_eq!(status.success(), Some("done again"));

        status.begin();
        assert_eq!(status, StatusReporter::default());
    }
}
