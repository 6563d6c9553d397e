use crate::preset::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Warning,
    Error,
}

/// A transient message for the user, never blocks the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

// local validation problems are warnings, the request was never sent
impl From<FormError> for Notification {
    fn from(err: FormError) -> Self {
        Self::warning(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_errors_become_warnings() {
        let n = Notification::from(FormError::AlreadyApplied);
        assert_eq!(n.level, Level::Warning);
        assert_eq!(n.message, "This preset is already applied!");
    }
}
