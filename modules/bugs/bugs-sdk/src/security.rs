use uuid::Uuid;

/// Identity of the authenticated user on whose behalf an operation runs.
///
/// Produced by the session layer after a bearer token has been validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityContext {
    subject_id: Uuid,
}

impl SecurityContext {
    #[must_use]
    pub fn new(subject_id: Uuid) -> Self {
        Self { subject_id }
    }

    /// Id of the acting user.
    #[must_use]
    pub fn subject_id(&self) -> Uuid {
        self.subject_id
    }
}
