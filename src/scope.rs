//! Execution scope: cancellation plus task identity.
//!
//! A [`Scope`] is an immutable, hierarchically derived context value. It wraps
//! a [`CancellationToken`] and carries the name of the task it executes, bound
//! once at submission time by the worker.
//!
//! Derivation rules:
//! - [`Scope::child`] attaches a fresh cancelable token under the parent.
//!   Canceling an ancestor cancels the child; canceling the child never
//!   affects the parent or siblings.
//! - [`Scope::with_task_name`] adds only the name binding; the cancellation
//!   lineage is unchanged.
//!
//! Cancellation is monotonic: once a scope is canceled it stays canceled.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

/// Derivable execution scope handed to every task.
///
/// Cloning a `Scope` yields another handle to the same scope, not a
/// derivation; use [`Scope::child`] or [`Scope::with_task_name`] to derive.
///
/// # Example
/// ```
/// use taskgroup::Scope;
///
/// let root = Scope::root();
/// assert_eq!(root.task_name(), "");
///
/// let child = root.child().with_task_name("poller");
/// assert_eq!(child.task_name(), "poller");
///
/// root.cancel();
/// assert!(child.is_cancelled());
/// ```
#[derive(Clone, Debug)]
pub struct Scope {
    token: CancellationToken,
    task_name: Option<Arc<str>>,
}

impl Scope {
    /// Creates a fresh root scope with its own cancellation token and no
    /// task name bound.
    pub fn root() -> Self {
        Self {
            token: CancellationToken::new(),
            task_name: None,
        }
    }

    /// Derives a cancelable child scope.
    ///
    /// The child observes cancellation of this scope and of any ancestor.
    /// Canceling the child does not propagate upward or sideways.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            task_name: self.task_name.clone(),
        }
    }

    /// Derives a scope with `name` bound as the task name.
    ///
    /// Pure value derivation: the returned scope shares this scope's
    /// cancellation lineage.
    pub fn with_task_name(&self, name: impl Into<Arc<str>>) -> Self {
        Self {
            token: self.token.clone(),
            task_name: Some(name.into()),
        }
    }

    /// Returns the bound task name, or the empty string if none was bound.
    ///
    /// Absence is a normal state, not a failure: the root scope and any scope
    /// not derived through a worker submission are unbound.
    pub fn task_name(&self) -> &str {
        self.task_name.as_deref().unwrap_or("")
    }

    /// Cancels this scope and all scopes derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` if this scope or any ancestor has been canceled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Completes when this scope is canceled.
    ///
    /// Completes immediately if cancellation already happened; safe to await
    /// from multiple places at once.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    /// Returns the underlying cancellation token.
    ///
    /// Useful when bridging into APIs that take a [`CancellationToken`]
    /// directly.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::root()
    }
}

impl From<CancellationToken> for Scope {
    /// Adopts an existing token as a root scope, e.g. to run a worker under
    /// an application-wide shutdown token.
    fn from(token: CancellationToken) -> Self {
        Self { token, task_name: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_scope_is_unbound_and_live() {
        let scope = Scope::root();
        assert_eq!(scope.task_name(), "");
        assert!(!scope.is_cancelled());
    }

    #[test]
    fn cancellation_propagates_downward() {
        let root = Scope::root();
        let child = root.child();
        let grandchild = child.child();

        root.cancel();
        assert!(child.is_cancelled());
        assert!(grandchild.is_cancelled());
    }

    #[test]
    fn child_cancellation_does_not_escape() {
        let root = Scope::root();
        let left = root.child();
        let right = root.child();

        left.cancel();
        assert!(left.is_cancelled());
        assert!(!root.is_cancelled());
        assert!(!right.is_cancelled());
    }

    #[test]
    fn task_name_binding_is_inherited_by_children() {
        let root = Scope::root();
        let named = root.with_task_name("poller");
        assert_eq!(named.task_name(), "poller");
        assert_eq!(named.child().task_name(), "poller");
        // the original scope is untouched
        assert_eq!(root.task_name(), "");
    }

    #[test]
    fn rebinding_shadows_the_inherited_name() {
        let outer = Scope::root().with_task_name("outer");
        let inner = outer.with_task_name("inner");
        assert_eq!(inner.task_name(), "inner");
        assert_eq!(outer.task_name(), "outer");
    }

    #[tokio::test]
    async fn cancelled_completes_after_cancel() {
        let root = Scope::root();
        let child = root.child();

        let waiter = tokio::spawn(async move {
            child.cancelled().await;
        });
        root.cancel();
        waiter.await.expect("waiter completes");
    }

    #[test]
    fn adopting_a_token_links_lineage() {
        let token = CancellationToken::new();
        let scope = Scope::from(token.clone());
        token.cancel();
        assert!(scope.is_cancelled());
    }
}
