//! Session lifecycle hooks: the collaborator notified when the client abandons a session.

/// Why the client abandoned the session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionEndReason {
	/// A 401 arrived and no refresh token was stored.
	MissingRefreshToken,
	/// The refresh call itself failed.
	RefreshFailed,
}

/// Collaborator notified after the client clears an unrecoverable session.
///
/// Frontends typically navigate to their login view here; headless services might surface a
/// re-authentication prompt instead. The hook runs after stored credentials are cleared, must
/// not fail, and fires exactly once per teardown.
pub trait SessionHooks
where
	Self: Send + Sync,
{
	/// Reports that the session ended and credentials were cleared.
	fn on_session_end(&self, reason: SessionEndReason);
}

/// Hook implementation that ignores every notification; the default for headless use.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSessionHooks;
impl SessionHooks for NoopSessionHooks {
	fn on_session_end(&self, _: SessionEndReason) {}
}
