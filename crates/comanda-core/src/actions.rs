//! Item Commands
//!
//! Operator actions on a ticket item, validated before anything is sent.

use crate::error::{ApiError, ApiResult};
use crate::models::ItemStatus;
use crate::service::{ItemCancel, ItemRef, ItemReplace, ItemStatusUpdate, TicketService};

#[derive(Debug, Clone, PartialEq)]
pub enum ItemCommand {
    SetStatus(ItemStatus),
    Cancel { reason: String },
    Replace { new_product_name: String, reason: String },
}

impl ItemCommand {
    /// Field-level problems, in display order. Empty means submittable.
    pub fn problems(&self) -> Vec<&'static str> {
        let mut problems = Vec::new();
        match self {
            ItemCommand::SetStatus(ItemStatus::Cancelled) => {
                problems.push("Use la acción Cancelar para anular un producto.")
            }
            ItemCommand::SetStatus(_) => {}
            ItemCommand::Cancel { reason } => {
                if reason.trim().is_empty() {
                    problems.push("El motivo es obligatorio.");
                }
            }
            ItemCommand::Replace {
                new_product_name,
                reason,
            } => {
                if new_product_name.trim().is_empty() {
                    problems.push("El nuevo producto es obligatorio.");
                }
                if reason.trim().is_empty() {
                    problems.push("El motivo es obligatorio.");
                }
            }
        }
        problems
    }

    pub fn validate(&self, actor: &str) -> ApiResult<()> {
        if actor.trim().is_empty() {
            return Err(ApiError::Validation("Falta el nombre del operario.".to_string()));
        }
        match self.problems().first() {
            Some(problem) => Err(ApiError::Validation(problem.to_string())),
            None => Ok(()),
        }
    }

    /// Validate, then send. Nothing is sent when validation fails.
    pub async fn dispatch(
        &self,
        service: &dyn TicketService,
        item: &ItemRef,
        actor: &str,
    ) -> ApiResult<()> {
        self.validate(actor)?;
        let user_name = actor.trim().to_string();
        log::info!("[ACTION] {:?} on {}/{} by {}", self, item.ticket_id, item.item_id, user_name);

        match self {
            ItemCommand::SetStatus(status) => {
                service
                    .update_item_status(
                        item,
                        &ItemStatusUpdate {
                            status: *status,
                            user_name,
                        },
                    )
                    .await
            }
            ItemCommand::Cancel { reason } => {
                service
                    .cancel_item(
                        item,
                        &ItemCancel {
                            reason: reason.trim().to_string(),
                            user_name,
                        },
                    )
                    .await
            }
            ItemCommand::Replace {
                new_product_name,
                reason,
            } => {
                service
                    .replace_item(
                        item,
                        &ItemReplace {
                            new_product_name: new_product_name.trim().to_string(),
                            reason: reason.trim().to_string(),
                            user_name,
                        },
                    )
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockCall, MockTicketService};
    use chrono::Utc;

    const TICKET: &str = "6c4d7c80-2222-4a11-9d1b-000000000002";

    #[test]
    fn test_problems() {
        assert!(ItemCommand::SetStatus(ItemStatus::Delivered).problems().is_empty());
        assert_eq!(
            ItemCommand::Replace {
                new_product_name: " ".into(),
                reason: "".into()
            }
            .problems()
            .len(),
            2
        );
    }

    #[tokio::test]
    async fn test_empty_reason_sends_nothing() {
        let svc = MockTicketService::with_samples(Utc::now());
        let cmd = ItemCommand::Cancel { reason: "   ".into() };

        let err = cmd
            .dispatch(&svc, &ItemRef::new(TICKET, "i-3"), "Operario")
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Validation("El motivo es obligatorio.".into()));
        assert!(svc.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_actor_rejected() {
        let svc = MockTicketService::with_samples(Utc::now());
        let cmd = ItemCommand::SetStatus(ItemStatus::Delivered);
        assert!(cmd.dispatch(&svc, &ItemRef::new(TICKET, "i-3"), "").await.is_err());
        assert!(svc.calls().is_empty());
    }

    #[tokio::test]
    async fn test_replace_trims_and_sends() {
        let svc = MockTicketService::with_samples(Utc::now());
        let item = ItemRef::new(TICKET, "i-4");
        let cmd = ItemCommand::Replace {
            new_product_name: "  Limonada ".into(),
            reason: "Sin jugo".into(),
        };

        cmd.dispatch(&svc, &item, "Laura").await.unwrap();
        assert_eq!(svc.calls(), vec![MockCall::ReplaceItem(item)]);
        let detail = svc.ticket(TICKET).unwrap();
        assert_eq!(detail.items[1].product_name.as_deref(), Some("Limonada"));
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_ticket_untouched() {
        let svc = MockTicketService::with_samples(Utc::now());
        svc.fail_next(ApiError::Transport("offline".into()));
        let before = svc.ticket(TICKET).unwrap();

        let result = ItemCommand::SetStatus(ItemStatus::Delivered)
            .dispatch(&svc, &ItemRef::new(TICKET, "i-3"), "Operario")
            .await;
        assert!(result.is_err());
        assert_eq!(svc.ticket(TICKET).unwrap(), before);
    }
}
