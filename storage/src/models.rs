//! Row models and admin operation outcomes for the `allowed_users` / `user_balances` tables.

/// One allow-listed user joined with its (optional) balance row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct UserSummary {
    pub user_id: i64,
    pub balance: Option<f64>,
    pub images_generated: Option<i64>,
}

/// Result of `AccessRepository::allow_user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowOutcome {
    Allowed,
    AlreadyAllowed,
}

/// Result of `AccessRepository::disable_user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    Revoked,
    NotAllowed,
}

/// Result of `AccessRepository::set_balance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceOutcome {
    Updated,
    /// Balances are only kept for allow-listed users.
    NotAllowed,
}
