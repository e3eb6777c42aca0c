//! Binds the promotions admin form to the promotions REST service.

pub mod action;
pub mod adapter;
pub mod api;
pub mod error;
pub mod form;
pub mod query;
pub mod sequencer;
pub mod table;

pub use action::ActionKind;
pub use adapter::{
    ActionOutcome, ApiResponse, PendingAction, PromotionAdapter, DELETED_MESSAGE,
    DELETE_FAILED_MESSAGE, SUCCESS_MESSAGE,
};
pub use api::{execute, ApiReply, ApiRequest, HttpPromotionsApi, PromotionsApi};
pub use error::{AdapterError, RequestError};
pub use form::{FormState, PromotionField, PromotionUi};
pub use query::{ExtraFilter, SearchQuery};
pub use table::{ResultRow, ResultTable};
