use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use futures_util::future::BoxFuture;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Transaction injected into request extensions by tests.
///
/// `with_txn` runs inside it and never commits or rolls it back; the test
/// that opened it decides.
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    pub async fn open(db: &DatabaseConnection) -> Result<Self, AppError> {
        Ok(Self(Arc::new(db.begin().await?)))
    }

    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    pub fn from_req(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<SharedTxn>().cloned()
    }

    /// Roll back. Fails if clones are still alive (e.g. a request holding it).
    pub async fn rollback(self) -> Result<(), AppError> {
        match Arc::try_unwrap(self.0) {
            Ok(txn) => Ok(txn.rollback().await?),
            Err(_) => Err(AppError::internal(
                "SharedTxn still referenced; drop requests before rollback",
            )),
        }
    }
}

/// Run `f` inside a transaction.
///
/// 1) `SharedTxn` in request extensions: run inside it, leave it open.
/// 2) Otherwise begin a transaction, apply the policy on `Ok`, roll back on `Err`.
pub async fn with_txn<R, F>(req: Option<&HttpRequest>, state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'t> FnOnce(&'t DatabaseTransaction) -> BoxFuture<'t, Result<R, AppError>>,
{
    // Clone out before awaiting so no RefCell borrow spans an await point.
    let shared = req.and_then(SharedTxn::from_req);
    if let Some(shared) = shared {
        return f(shared.transaction()).await;
    }

    let txn = require_db(state)?.begin().await?;
    match f(&txn).await {
        Ok(val) => {
            match txn_policy::current() {
                txn_policy::TxnPolicy::CommitOnOk => txn.commit().await?,
                txn_policy::TxnPolicy::RollbackOnOk => txn.rollback().await?,
            }
            Ok(val)
        }
        Err(err) => {
            // Preserve the original error over a rollback failure.
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
