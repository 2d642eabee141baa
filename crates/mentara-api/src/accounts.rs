//! Role lookups for identity-provider users.

use mentara_core::keys;
use mentara_core::models::user::{UserAccount, UserRole};
use mentara_storage::error::StorageError;
use mentara_storage::objects::ObjectStore;
use mentara_storage::records::{save_record, try_load_record};

/// Whether `user_id` holds the admin role. Unknown users are not admins.
pub async fn is_admin(store: &ObjectStore, user_id: &str) -> Result<bool, StorageError> {
    let account: Option<UserAccount> = try_load_record(store, &keys::user(user_id)).await?;
    Ok(account.is_some_and(|a| a.is_admin()))
}

/// Grant the admin role to each id that does not already hold it.
/// Returns the number of accounts written.
pub async fn seed_admins<S: AsRef<str>>(
    store: &ObjectStore,
    user_ids: &[S],
) -> Result<usize, StorageError> {
    let mut written = 0;
    for user_id in user_ids {
        let user_id = user_id.as_ref();
        let key = keys::user(user_id);
        let existing: Option<UserAccount> = try_load_record(store, &key).await?;
        if existing.as_ref().is_some_and(UserAccount::is_admin) {
            continue;
        }
        let account = UserAccount {
            id: user_id.to_string(),
            role: UserRole::Admin,
            created_at: existing.map_or_else(jiff::Timestamp::now, |a| a.created_at),
        };
        save_record(store, &key, &account).await?;
        tracing::info!(user_id, "admin role granted");
        written += 1;
    }
    Ok(written)
}
