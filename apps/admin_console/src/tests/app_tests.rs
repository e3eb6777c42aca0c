use super::*;

use std::time::Duration;

use async_trait::async_trait;
use client_core::{
    ActionKind, ApiReply, ApiRequest, PromotionField, PromotionsApi, RequestError, SearchQuery,
};
use crossbeam_channel::bounded;
use shared::{
    domain::{ProductId, PromotionId},
    protocol::{Promotion, PromotionPayload},
};

use crate::backend_bridge;

fn sample(id: i64) -> Promotion {
    Promotion {
        id: Some(PromotionId(id)),
        product_id: Some(ProductId(7)),
        product_name: "Fall Sale".into(),
        category: "Discount".into(),
        amount: Some(20),
        description: Some("autumn".into()),
        from_date: "2024-01-01T00:00:00".into(),
        to_date: "2024-02-01T00:00:00".into(),
    }
}

struct StubApi;

#[async_trait]
impl PromotionsApi for StubApi {
    async fn create(&self, _payload: &PromotionPayload) -> Result<Promotion, RequestError> {
        Ok(sample(1))
    }

    async fn update(
        &self,
        id: &str,
        _payload: &PromotionPayload,
    ) -> Result<Promotion, RequestError> {
        self.retrieve(id).await
    }

    async fn retrieve(&self, id: &str) -> Result<Promotion, RequestError> {
        let id = id
            .parse()
            .map_err(|_| RequestError::Decode(format!("bad id {id}")))?;
        Ok(sample(id))
    }

    async fn delete(&self, _id: &str) -> Result<(), RequestError> {
        Ok(())
    }

    async fn search(&self, _query: &SearchQuery) -> Result<Vec<Promotion>, RequestError> {
        Ok(vec![sample(1), sample(2)])
    }

    async fn find_best(&self, _product_id: &str) -> Result<Option<Promotion>, RequestError> {
        Ok(None)
    }

    async fn expire(
        &self,
        id: &str,
        _payload: &PromotionPayload,
    ) -> Result<Promotion, RequestError> {
        self.retrieve(id).await
    }
}

fn console() -> (ConsoleApp, Receiver<BackendCommand>, Arc<PromotionAdapter>) {
    let adapter = Arc::new(PromotionAdapter::new(Arc::new(StubApi)));
    let (cmd_tx, cmd_rx) = bounded(8);
    (ConsoleApp::new(Arc::clone(&adapter), cmd_tx), cmd_rx, adapter)
}

fn input(app: &mut ConsoleApp, line: &str, out: &mut Vec<u8>) -> LoopControl {
    app.handle_event(UiEvent::Input(line.to_string()), out)
        .expect("write to buffer")
}

#[test]
fn pressing_a_button_queues_the_request_read_from_the_form() {
    let (mut app, cmd_rx, _) = console();
    let mut out = Vec::new();

    input(&mut app, "set id 42", &mut out);
    input(&mut app, "retrieve-btn", &mut out);

    let Ok(BackendCommand::Dispatch(pending)) = cmd_rx.try_recv() else {
        panic!("expected a queued dispatch");
    };
    assert_eq!(pending.kind(), ActionKind::Retrieve);
    assert_eq!(
        pending.request(),
        &ApiRequest::Retrieve { id: "42".into() }
    );
    assert!(out.is_empty());
}

#[test]
fn filtered_search_queues_query_with_extra_filters() {
    let (mut app, cmd_rx, _) = console();
    let mut out = Vec::new();

    input(&mut app, "set category Discount", &mut out);
    input(&mut app, "search available=false", &mut out);

    let Ok(BackendCommand::Dispatch(pending)) = cmd_rx.try_recv() else {
        panic!("expected a queued dispatch");
    };
    let ApiRequest::Search { query } = pending.request() else {
        panic!("expected a search request");
    };
    assert_eq!(query.to_query_string(), "category=Discount&available=false");
}

#[test]
fn completed_action_renders_the_page() {
    let (mut app, cmd_rx, _) = console();
    let mut out = Vec::new();

    input(&mut app, "create", &mut out);
    let Ok(BackendCommand::Dispatch(pending)) = cmd_rx.try_recv() else {
        panic!("expected a queued dispatch");
    };
    let control = app
        .handle_event(
            UiEvent::ActionCompleted {
                pending,
                response: Ok(ApiReply::Promotion(sample(5))),
            },
            &mut out,
        )
        .expect("write to buffer");

    assert_eq!(control, LoopControl::Continue);
    assert_eq!(app.form().field(PromotionField::Id), "5");
    assert_eq!(app.form().flash_message(), Some("Success"));
    let page = String::from_utf8(out).expect("utf8");
    assert!(page.contains("promotion_product_name"));
    assert!(page.ends_with("[Success]\n"));
}

#[test]
fn malformed_failure_is_reported_without_touching_the_flash() {
    let (mut app, cmd_rx, _) = console();
    let mut out = Vec::new();

    input(&mut app, "update", &mut out);
    let Ok(BackendCommand::Dispatch(pending)) = cmd_rx.try_recv() else {
        panic!("expected a queued dispatch");
    };
    app.handle_event(
        UiEvent::ActionCompleted {
            pending,
            response: Err(RequestError::Status {
                status: 502,
                body: None,
            }),
        },
        &mut out,
    )
    .expect("write to buffer");

    assert_eq!(app.form().flash_message(), None);
    assert!(String::from_utf8(out).expect("utf8").starts_with("error:"));
}

#[test]
fn clear_applies_without_a_request() {
    let (mut app, cmd_rx, _) = console();
    let mut out = Vec::new();

    input(&mut app, "set product_name Fall Sale", &mut out);
    input(&mut app, "clear", &mut out);

    assert!(cmd_rx.try_recv().is_err());
    assert!(app.form().is_blank());
    assert!(!out.is_empty());
}

#[test]
fn bad_input_keeps_the_loop_running_and_quit_stops_it() {
    let (mut app, _cmd_rx, _) = console();
    let mut out = Vec::new();

    assert_eq!(input(&mut app, "launch", &mut out), LoopControl::Continue);
    assert!(String::from_utf8_lossy(&out).contains("unknown command"));
    assert_eq!(input(&mut app, "quit", &mut out), LoopControl::Exit);
    assert_eq!(
        app.handle_event(UiEvent::InputClosed, &mut out)
            .expect("write to buffer"),
        LoopControl::Exit
    );
}

#[test]
fn full_command_queue_is_reported() {
    let adapter = Arc::new(PromotionAdapter::new(Arc::new(StubApi)));
    let (cmd_tx, _cmd_rx) = bounded(1);
    let mut app = ConsoleApp::new(adapter, cmd_tx);
    let mut out = Vec::new();

    input(&mut app, "search", &mut out);
    assert!(out.is_empty());
    input(&mut app, "search", &mut out);
    assert!(String::from_utf8_lossy(&out).contains("queue is full"));
}

#[test]
fn backend_worker_round_trip() {
    let (mut app, cmd_rx, adapter) = console();
    let (ui_tx, ui_rx) = bounded(16);
    let worker = backend_bridge::runtime::launch(adapter, cmd_rx, ui_tx);
    let mut out = Vec::new();

    input(&mut app, "set id 9", &mut out);
    input(&mut app, "retrieve", &mut out);

    loop {
        let event = ui_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("backend event");
        if matches!(event, UiEvent::ActionCompleted { .. }) {
            app.handle_event(event, &mut out).expect("write to buffer");
            break;
        }
    }

    assert_eq!(app.form().field(PromotionField::Id), "9");
    assert_eq!(app.form().field(PromotionField::FromDate), "2024-01-01");
    assert_eq!(app.form().flash_message(), Some("Success"));

    let (quit_tx, quit_rx) = bounded(1);
    quit_tx.send(UiEvent::InputClosed).expect("queue quit");
    app.run(&quit_rx, &mut out).expect("write to buffer");
    worker.join().expect("backend thread");
}
