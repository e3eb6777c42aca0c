use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    action::ActionKind,
    api::{execute, ApiReply, ApiRequest, PromotionsApi},
    error::{AdapterError, RequestError},
    form::{self, path_id, PromotionField, PromotionUi},
    query::{ExtraFilter, SearchQuery},
    sequencer::{ActionSequencer, Ticket},
    table::ResultTable,
};

pub const SUCCESS_MESSAGE: &str = "Success";
pub const DELETED_MESSAGE: &str = "promotion has been Deleted!";
/// Shown for every delete failure, whatever the response said.
pub const DELETE_FAILED_MESSAGE: &str = "Server error!";

pub type ApiResponse = Result<ApiReply, RequestError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded,
    Failed { message: String },
    /// A newer action of the same kind was dispatched before this response
    /// arrived; the page was left alone.
    Ignored,
}

/// An action whose request has been read from the form but not yet answered.
#[derive(Debug, Clone)]
pub struct PendingAction {
    ticket: Ticket,
    request: ApiRequest,
}

impl PendingAction {
    pub fn kind(&self) -> ActionKind {
        self.ticket.kind()
    }

    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn request(&self) -> &ApiRequest {
        &self.request
    }
}

/// Binds the promotion form to the promotions service.
///
/// Each button is split into [`begin`](Self::begin) (read the form),
/// [`dispatch`](Self::dispatch) (talk to the service) and
/// [`complete`](Self::complete) (render the answer) so an event loop can keep
/// several requests in flight. [`run`](Self::run) does all three in sequence.
pub struct PromotionAdapter {
    api: Arc<dyn PromotionsApi>,
    sequencer: ActionSequencer,
    ignore_stale_responses: bool,
}

impl PromotionAdapter {
    pub fn new(api: Arc<dyn PromotionsApi>) -> Self {
        Self {
            api,
            sequencer: ActionSequencer::new(),
            ignore_stale_responses: false,
        }
    }

    /// Drop responses superseded by a newer action of the same kind instead of
    /// applying every response in arrival order.
    pub fn with_stale_response_guard(mut self, enabled: bool) -> Self {
        self.ignore_stale_responses = enabled;
        self
    }

    /// Reads the request for `kind` from the form. Clear has no request: it is
    /// applied right away and `None` is returned.
    pub fn begin<U: PromotionUi + ?Sized>(
        &self,
        kind: ActionKind,
        ui: &mut U,
    ) -> Option<PendingAction> {
        let request = match kind {
            ActionKind::Clear => {
                form::clear(ui);
                return None;
            }
            ActionKind::Create => ApiRequest::Create {
                payload: form::read_payload(ui),
            },
            ActionKind::Update => ApiRequest::Update {
                id: path_id(&ui.field(PromotionField::Id)),
                payload: form::read_payload(ui),
            },
            ActionKind::Retrieve => ApiRequest::Retrieve {
                id: path_id(&ui.field(PromotionField::Id)),
            },
            ActionKind::Delete => ApiRequest::Delete {
                id: path_id(&ui.field(PromotionField::Id)),
            },
            ActionKind::Search => ApiRequest::Search {
                query: SearchQuery::from_form(ui),
            },
            ActionKind::FindBest => ApiRequest::FindBest {
                product_id: path_id(&ui.field(PromotionField::ProductId)),
            },
            ActionKind::Expire => ApiRequest::Expire {
                id: path_id(&ui.field(PromotionField::Id)),
                payload: form::read_payload(ui),
            },
        };

        Some(self.issue(kind, request))
    }

    /// Like `begin(ActionKind::Search, ..)`, with filters that have no input
    /// on the form.
    pub fn begin_search<U: PromotionUi + ?Sized>(
        &self,
        ui: &U,
        filters: &[ExtraFilter],
    ) -> PendingAction {
        let query = filters
            .iter()
            .cloned()
            .fold(SearchQuery::from_form(ui), SearchQuery::with_filter);
        self.issue(ActionKind::Search, ApiRequest::Search { query })
    }

    fn issue(&self, kind: ActionKind, request: ApiRequest) -> PendingAction {
        let ticket = self.sequencer.issue(kind);
        debug!(
            action = %kind,
            seq = ticket.seq(),
            method = request.method(),
            path = %request.path(),
            "dispatching promotions request"
        );
        PendingAction { ticket, request }
    }

    pub async fn dispatch(&self, request: &ApiRequest) -> ApiResponse {
        execute(self.api.as_ref(), request).await
    }

    /// Renders `response` into the page.
    pub fn complete<U: PromotionUi + ?Sized>(
        &self,
        pending: &PendingAction,
        response: ApiResponse,
        ui: &mut U,
    ) -> Result<ActionOutcome, AdapterError> {
        let kind = pending.kind();
        if self.ignore_stale_responses && !self.sequencer.is_current(pending.ticket) {
            debug!(action = %kind, seq = pending.ticket.seq(), "ignoring stale response");
            return Ok(ActionOutcome::Ignored);
        }

        match response {
            Ok(reply) => {
                render_reply(reply, ui);
                info!(action = %kind, "promotions request succeeded");
                Ok(ActionOutcome::Succeeded)
            }
            Err(err) => render_failure(kind, err, ui),
        }
    }

    pub async fn run<U: PromotionUi + ?Sized>(
        &self,
        kind: ActionKind,
        ui: &mut U,
    ) -> Result<ActionOutcome, AdapterError> {
        let Some(pending) = self.begin(kind, ui) else {
            return Ok(ActionOutcome::Succeeded);
        };
        let response = self.dispatch(pending.request()).await;
        self.complete(&pending, response, ui)
    }

    pub async fn create<U: PromotionUi + ?Sized>(
        &self,
        ui: &mut U,
    ) -> Result<ActionOutcome, AdapterError> {
        self.run(ActionKind::Create, ui).await
    }

    pub async fn update<U: PromotionUi + ?Sized>(
        &self,
        ui: &mut U,
    ) -> Result<ActionOutcome, AdapterError> {
        self.run(ActionKind::Update, ui).await
    }

    pub async fn retrieve<U: PromotionUi + ?Sized>(
        &self,
        ui: &mut U,
    ) -> Result<ActionOutcome, AdapterError> {
        self.run(ActionKind::Retrieve, ui).await
    }

    pub async fn delete<U: PromotionUi + ?Sized>(
        &self,
        ui: &mut U,
    ) -> Result<ActionOutcome, AdapterError> {
        self.run(ActionKind::Delete, ui).await
    }

    pub async fn search<U: PromotionUi + ?Sized>(
        &self,
        ui: &mut U,
    ) -> Result<ActionOutcome, AdapterError> {
        self.run(ActionKind::Search, ui).await
    }

    pub async fn search_with<U: PromotionUi + ?Sized>(
        &self,
        ui: &mut U,
        filters: &[ExtraFilter],
    ) -> Result<ActionOutcome, AdapterError> {
        let pending = self.begin_search(&*ui, filters);
        let response = self.dispatch(pending.request()).await;
        self.complete(&pending, response, ui)
    }

    pub async fn find_best<U: PromotionUi + ?Sized>(
        &self,
        ui: &mut U,
    ) -> Result<ActionOutcome, AdapterError> {
        self.run(ActionKind::FindBest, ui).await
    }

    pub async fn expire<U: PromotionUi + ?Sized>(
        &self,
        ui: &mut U,
    ) -> Result<ActionOutcome, AdapterError> {
        self.run(ActionKind::Expire, ui).await
    }

    pub fn clear<U: PromotionUi + ?Sized>(&self, ui: &mut U) {
        form::clear(ui);
    }
}

fn render_reply<U: PromotionUi + ?Sized>(reply: ApiReply, ui: &mut U) {
    match reply {
        ApiReply::Promotion(promotion) => {
            form::populate(ui, &promotion);
            ui.flash(SUCCESS_MESSAGE.to_string());
        }
        ApiReply::Promotions(records) => {
            let (table, first) = ResultTable::from_search(&records);
            debug!(
                received = records.len(),
                shown = table.len(),
                "rendering search results"
            );
            if let Some(first) = first {
                form::populate(ui, first);
            }
            ui.show_results(table);
            ui.flash(SUCCESS_MESSAGE.to_string());
        }
        ApiReply::Best(best) => {
            let table = match &best {
                Some(promotion) => {
                    form::populate(ui, promotion);
                    ResultTable::single(promotion)
                }
                None => ResultTable::default(),
            };
            ui.show_results(table);
            ui.flash(SUCCESS_MESSAGE.to_string());
        }
        ApiReply::Deleted => {
            form::clear(ui);
            ui.flash(DELETED_MESSAGE.to_string());
        }
    }
}

fn render_failure<U: PromotionUi + ?Sized>(
    kind: ActionKind,
    err: RequestError,
    ui: &mut U,
) -> Result<ActionOutcome, AdapterError> {
    warn!(action = %kind, status = ?err.status(), error = %err, "promotions request failed");

    let message = match kind {
        ActionKind::Delete => DELETE_FAILED_MESSAGE.to_string(),
        _ => {
            if kind == ActionKind::Retrieve {
                form::clear(ui);
            }
            match err.user_message() {
                Some(message) => message,
                None => {
                    return Err(AdapterError::MalformedErrorResponse {
                        action: kind,
                        source: err,
                    })
                }
            }
        }
    };

    ui.flash(message.clone());
    Ok(ActionOutcome::Failed { message })
}

#[cfg(test)]
#[path = "tests/adapter_tests.rs"]
mod tests;
