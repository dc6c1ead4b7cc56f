use crate::{config::NO_ADMIN, dto::telegram::UserId};

/// Decides whether a caller may run privileged commands.
pub trait AdminPolicy: Send + Sync {
    /// Whether `caller` may run `/raffle` and `/export`; anonymous senders are `None`.
    fn is_admin(&self, caller: Option<UserId>) -> bool;
}

/// Grants admin rights to exactly one Telegram user.
///
/// Built with [`NO_ADMIN`], it grants them to nobody.
#[derive(Debug, Clone, Copy)]
pub struct SingleAdmin {
    admin_id: UserId,
}

impl SingleAdmin {
    /// Policy admitting `admin_id` only; [`NO_ADMIN`] admits nobody.
    pub fn new(admin_id: UserId) -> Self {
        Self { admin_id }
    }
}

impl AdminPolicy for SingleAdmin {
    fn is_admin(&self, caller: Option<UserId>) -> bool {
        self.admin_id != NO_ADMIN && caller == Some(self.admin_id)
    }
}
