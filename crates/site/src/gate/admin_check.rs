use std::time::Duration;

use marquee_core::allow_list::AdminAllowList;
use marquee_core::roles::AppRole;
use serde::Serialize;

use super::backend::{RoleCheck, RoleCheckError};
use super::session::SessionUser;

/// One way of deciding admin status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStep {
    /// Email appears in the configured allow-list. Only ever answers "yes";
    /// an unlisted email falls through.
    AllowList,
    /// The `has_role` remote procedure.
    RoleRpc,
    /// Direct `user_roles` lookup.
    RoleTable,
}

/// Outcome of an admin check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub is_admin: bool,
    /// The step that answered, or `None` when every step fell through and
    /// the check failed closed.
    pub decided_by: Option<CheckStep>,
}

impl Verdict {
    fn decided(step: CheckStep, is_admin: bool) -> Self {
        Self {
            is_admin,
            decided_by: Some(step),
        }
    }

    fn fail_closed() -> Self {
        Self {
            is_admin: false,
            decided_by: None,
        }
    }
}

/// Default bound on each remote role call.
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(5);

/// An ordered chain of [`CheckStep`]s. The first step that answers decides;
/// an erroring or timed-out step falls through to the next one.
#[derive(Debug, Clone)]
pub struct AdminCheck {
    allow_list: AdminAllowList,
    steps: Vec<CheckStep>,
    step_timeout: Duration,
}

impl AdminCheck {
    /// The standard chain: allow-list, role procedure, role table.
    pub fn new(allow_list: AdminAllowList) -> Self {
        Self::with_steps(
            allow_list,
            vec![CheckStep::AllowList, CheckStep::RoleRpc, CheckStep::RoleTable],
        )
    }

    pub fn with_steps(allow_list: AdminAllowList, steps: Vec<CheckStep>) -> Self {
        Self {
            allow_list,
            steps,
            step_timeout: DEFAULT_STEP_TIMEOUT,
        }
    }

    pub fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }

    pub fn steps(&self) -> &[CheckStep] {
        &self.steps
    }

    pub fn allow_list(&self) -> &AdminAllowList {
        &self.allow_list
    }

    /// Run the chain for `user`.
    pub async fn evaluate<R>(&self, roles: &R, user: &SessionUser) -> Verdict
    where
        R: RoleCheck + ?Sized,
    {
        for &step in &self.steps {
            let answer = match step {
                CheckStep::AllowList => {
                    if self.allow_list.contains(&user.email) {
                        Ok(Some(true))
                    } else {
                        Ok(None)
                    }
                }
                CheckStep::RoleRpc => self
                    .bounded(roles.has_role(user.id, AppRole::Admin))
                    .await
                    .map(Some),
                CheckStep::RoleTable => self
                    .bounded(roles.lookup_role(user.id, AppRole::Admin))
                    .await
                    .map(Some),
            };

            match answer {
                Ok(Some(is_admin)) => {
                    tracing::debug!(user_id = %user.id, ?step, is_admin, "Admin check decided");
                    return Verdict::decided(step, is_admin);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(user_id = %user.id, ?step, error = %e, "Admin check step failed");
                }
            }
        }

        tracing::warn!(user_id = %user.id, "Admin check exhausted, treating as non-admin");
        Verdict::fail_closed()
    }

    async fn bounded<F>(&self, call: F) -> Result<bool, RoleCheckError>
    where
        F: std::future::Future<Output = Result<bool, RoleCheckError>>,
    {
        tokio::time::timeout(self.step_timeout, call)
            .await
            .unwrap_or(Err(RoleCheckError::Timeout))
    }
}
