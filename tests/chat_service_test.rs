mod helpers;

use std::sync::Arc;

use miningniti::application::services::{AnswerGenerator, ChatService};
use miningniti::domain::{PromptTemplate, SourceMode};

use helpers::{CountingDocumentStore, Reply, ScriptedLlmClient, chat_service};

fn coal_store() -> Arc<CountingDocumentStore> {
    Arc::new(CountingDocumentStore::with_records(&[("a.pdf", "coal seams")]))
}

#[tokio::test]
async fn given_internet_mode_when_answering_then_calls_model_once_and_wraps_output() {
    let store = coal_store();
    let llm = Arc::new(ScriptedLlmClient::replying("  Coal is a rock.\n"));
    let service = chat_service(Arc::clone(&store), Arc::clone(&llm), None);

    let response = service
        .answer("What is coal?", SourceMode::Internet)
        .await
        .unwrap();

    assert_eq!(response, "\nCoal is a rock.\n");
    assert_eq!(llm.calls(), 1);
    assert_eq!(store.searches(), 0);
}

#[tokio::test]
async fn given_internet_mode_when_answering_then_query_reaches_model_unmodified() {
    let llm = Arc::new(ScriptedLlmClient::replying("ok"));
    let template = PromptTemplate::new("Answer: {input}", vec!["input".to_string()]).unwrap();
    let generator = AnswerGenerator::new(llm.clone(), template, helpers::TEST_TIMEOUT).unwrap();
    let service = ChatService::new(coal_store(), Arc::new(generator), None);

    service
        .answer("  What is {coal}?  ", SourceMode::Internet)
        .await
        .unwrap();

    assert_eq!(llm.prompts(), vec!["Answer:   What is {coal}?  ".to_string()]);
}

#[tokio::test]
async fn given_multiline_completion_when_answering_then_common_indent_is_removed() {
    let llm = Arc::new(ScriptedLlmClient::replying(
        "\n    Coal forms from peat.\n      Pressure matters.\n\n    Heat too.\n   ",
    ));
    let service = chat_service(coal_store(), llm, None);

    let response = service.answer("coal", SourceMode::Internet).await.unwrap();

    assert_eq!(
        response,
        "\nCoal forms from peat.\n  Pressure matters.\n\nHeat too.\n"
    );
}

#[tokio::test]
async fn given_database_mode_when_answering_then_formats_matching_records() {
    let store = coal_store();
    let llm = Arc::new(ScriptedLlmClient::replying("unused"));
    let service = chat_service(Arc::clone(&store), Arc::clone(&llm), None);

    let response = service.answer("coal", SourceMode::Database).await.unwrap();

    assert_eq!(response, "Document: a.pdf\nText: coal seams");
    assert_eq!(store.searches(), 1);
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn given_several_matches_when_answering_from_database_then_joins_with_blank_line() {
    let store = Arc::new(CountingDocumentStore::with_records(&[
        ("a.pdf", "coal seams"),
        ("b.pdf", "iron ore"),
        ("a.pdf", "COAL dust"),
    ]));
    let service = chat_service(store, Arc::new(ScriptedLlmClient::replying("")), None);

    let response = service.answer("coal", SourceMode::Database).await.unwrap();

    assert_eq!(
        response,
        "Document: a.pdf\nText: coal seams\n\nDocument: a.pdf\nText: COAL dust"
    );
}

#[tokio::test]
async fn given_no_matches_when_answering_from_database_then_returns_empty_string() {
    let service = chat_service(
        coal_store(),
        Arc::new(ScriptedLlmClient::replying("unused")),
        None,
    );

    let response = service.answer("gold", SourceMode::Database).await.unwrap();

    assert_eq!(response, "");
}

#[tokio::test]
async fn given_both_mode_when_answering_then_combines_individual_outputs() {
    let store = coal_store();
    let llm = Arc::new(ScriptedLlmClient::replying("  Coal is a rock.\n"));
    let service = chat_service(Arc::clone(&store), Arc::clone(&llm), None);

    let database = service.answer("coal", SourceMode::Database).await.unwrap();
    let internet = service.answer("coal", SourceMode::Internet).await.unwrap();
    let both = service.answer("coal", SourceMode::Both).await.unwrap();

    assert_eq!(
        both,
        format!("Database Results:\n{database}\n\nInternet Results:\n{internet}")
    );
    assert_eq!(
        both,
        "Database Results:\nDocument: a.pdf\nText: coal seams\n\nInternet Results:\n\nCoal is a rock.\n"
    );
    assert_eq!(store.searches(), 2);
    assert_eq!(llm.calls(), 2);
}

#[tokio::test]
async fn given_both_mode_when_model_fails_then_whole_request_fails() {
    let store = coal_store();
    let llm = Arc::new(ScriptedLlmClient::with(Reply::Failure));
    let service = chat_service(Arc::clone(&store), llm, Some(10));

    let result = service.answer("coal", SourceMode::Both).await;

    assert!(result.is_err());
    assert_eq!(store.searches(), 1);
    assert!(service.history().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_both_mode_when_store_fails_then_model_is_not_called() {
    let llm = Arc::new(ScriptedLlmClient::replying("unused"));
    let service = chat_service(
        Arc::new(CountingDocumentStore::failing()),
        Arc::clone(&llm),
        None,
    );

    let result = service.answer("coal", SourceMode::Both).await;

    assert!(result.is_err());
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn given_fixed_collaborators_when_answering_twice_then_results_are_identical() {
    let service = chat_service(
        coal_store(),
        Arc::new(ScriptedLlmClient::replying("  Coal is a rock.\n")),
        None,
    );

    for mode in [SourceMode::Database, SourceMode::Internet, SourceMode::Both] {
        let first = service.answer("coal", mode).await.unwrap();
        let second = service.answer("coal", mode).await.unwrap();
        assert_eq!(first, second, "mode {mode}");
    }
}

#[tokio::test]
async fn given_model_not_found_when_answering_then_error_is_classified() {
    let service = chat_service(
        coal_store(),
        Arc::new(ScriptedLlmClient::with(Reply::ModelNotFound)),
        None,
    );

    let error = service
        .answer("coal", SourceMode::Internet)
        .await
        .unwrap_err();

    assert!(error.is_model_not_found());
    assert!(!error.is_timeout());
}

#[tokio::test(start_paused = true)]
async fn given_hanging_model_when_answering_then_times_out() {
    let service = chat_service(
        coal_store(),
        Arc::new(ScriptedLlmClient::with(Reply::Hang)),
        None,
    );

    let error = service
        .answer("coal", SourceMode::Internet)
        .await
        .unwrap_err();

    assert!(error.is_timeout());
}

#[tokio::test]
async fn given_history_enabled_when_answering_three_times_then_history_keeps_order() {
    let service = chat_service(
        coal_store(),
        Arc::new(ScriptedLlmClient::replying("answer")),
        Some(100),
    );

    service.answer("first", SourceMode::Internet).await.unwrap();
    service.answer("coal", SourceMode::Database).await.unwrap();
    service.answer("third", SourceMode::Both).await.unwrap();

    let history = service.history().await.unwrap();
    let queries: Vec<&str> = history.iter().map(|turn| turn.query.as_str()).collect();

    assert_eq!(queries, vec!["first", "coal", "third"]);
    assert_eq!(history[1].response, "Document: a.pdf\nText: coal seams");
}

#[tokio::test]
async fn given_failed_request_when_answering_then_history_is_unchanged() {
    let service = chat_service(
        Arc::new(CountingDocumentStore::failing()),
        Arc::new(ScriptedLlmClient::replying("answer")),
        Some(100),
    );

    service.answer("ok", SourceMode::Internet).await.unwrap();
    let _ = service.answer("broken", SourceMode::Database).await;

    let history = service.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].query, "ok");
}

#[tokio::test]
async fn given_full_history_when_answering_then_oldest_turn_is_evicted() {
    let service = chat_service(
        coal_store(),
        Arc::new(ScriptedLlmClient::replying("answer")),
        Some(2),
    );

    for query in ["one", "two", "three"] {
        service.answer(query, SourceMode::Internet).await.unwrap();
    }

    let queries: Vec<String> = service
        .history()
        .await
        .unwrap()
        .into_iter()
        .map(|turn| turn.query)
        .collect();
    assert_eq!(queries, vec!["two", "three"]);
}

#[tokio::test]
async fn given_history_disabled_when_reading_history_then_returns_none() {
    let service = chat_service(
        coal_store(),
        Arc::new(ScriptedLlmClient::replying("answer")),
        None,
    );

    service.answer("coal", SourceMode::Internet).await.unwrap();

    assert!(!service.history_enabled());
    assert!(service.history().await.is_none());
}
