use tracing::info;

use crate::events::LoanEvent;

/// Trait for loan observation
pub trait LoanObserver: Send {
    /// Called after a loan change has been applied to both collections
    fn on_loan_event(&self, event: &LoanEvent);
}

/// Logs every loan change through `tracing`
#[derive(Debug, Default)]
pub struct LoanLogger;

impl LoanObserver for LoanLogger {
    fn on_loan_event(&self, event: &LoanEvent) {
        match event {
            LoanEvent::Borrowed { user_id, isbn } => {
                info!(user_id = user_id.0, isbn = isbn.0, "book borrowed");
            }
            LoanEvent::Returned { user_id, isbn } => {
                info!(user_id = user_id.0, isbn = isbn.0, "book returned");
            }
            LoanEvent::Released { user_id, isbn } => {
                info!(user_id = user_id.0, isbn = isbn.0, "loan ended by removal");
            }
        }
    }
}
