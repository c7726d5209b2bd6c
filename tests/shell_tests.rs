mod common;

use common::mocks::{MockGatewayClient, MockLLMClient};
use polish::shell::client::{GENERIC_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};
use polish::shell::state::{GENERATING_MESSAGE, IDLE_OUTPUT_MESSAGE};
use polish::shell::{
    CopyOutcome, CopyStatus, GatewayClient, GenerateOutcome, GenerationPhase, HttpGatewayClient,
    NoClipboard, Osc52Clipboard, Shell, SubmitRejection,
};
use polish::{AgentRegistry, AppState, PolishConfig, api::routes::create_app};
use polish::types::CompletionRequest;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn shell_with(client: Arc<MockGatewayClient>) -> Shell {
    Shell::new(
        Arc::new(AgentRegistry::builtin()),
        client,
        Arc::new(NoClipboard),
    )
}

// ============= State Machine Tests =============

#[tokio::test]
async fn test_generate_while_submitting_makes_one_call() {
    let client = Arc::new(
        MockGatewayClient::replying("polished").with_delay(Duration::from_millis(200)),
    );
    let shell = shell_with(client.clone());
    shell.set_input("rough draft");

    let (first, second) = tokio::join!(shell.generate(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        let view = shell.view();
        assert_eq!(view.phase, GenerationPhase::Submitting);
        assert_eq!(view.output, GENERATING_MESSAGE);
        assert!(!view.can_copy);
        shell.generate().await
    });

    assert_eq!(first, GenerateOutcome::Completed("polished".to_string()));
    assert_eq!(second, GenerateOutcome::Rejected(SubmitRejection::InFlight));
    assert_eq!(client.call_count(), 1);
    assert_eq!(shell.view().phase, GenerationPhase::Succeeded);
}

#[tokio::test]
async fn test_ready_after_completion() {
    let client = Arc::new(MockGatewayClient::replying("again"));
    let shell = shell_with(client.clone());
    shell.set_input("text");

    shell.generate().await;
    shell.generate().await;

    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_blank_input_makes_no_call() {
    let client = Arc::new(MockGatewayClient::replying("unused"));
    let shell = shell_with(client.clone());
    shell.set_input(" \n\t ");

    let outcome = shell.generate().await;

    assert_eq!(outcome, GenerateOutcome::Rejected(SubmitRejection::EmptyInput));
    assert_eq!(client.call_count(), 0);
    assert_eq!(
        shell.view().error.as_deref(),
        Some("Please provide some text to polish.")
    );
    assert_eq!(shell.view().output, IDLE_OUTPUT_MESSAGE);
}

#[tokio::test]
async fn test_request_carries_selected_agent_and_raw_input() {
    let client = Arc::new(MockGatewayClient::replying("ok"));
    let shell = shell_with(client.clone());
    shell.select_agent("diary").unwrap();
    shell.set_input("  went hiking ");

    shell.generate().await;

    assert_eq!(
        client.requests(),
        vec![CompletionRequest::new("diary", "  went hiking ")]
    );
}

#[tokio::test]
async fn test_failure_keeps_previous_output() {
    let client = Arc::new(
        MockGatewayClient::replying("first result").then_failing("Unknown agent."),
    );
    let shell = shell_with(client.clone());
    shell.set_input("draft");

    assert_eq!(
        shell.generate().await,
        GenerateOutcome::Completed("first result".to_string())
    );
    assert_eq!(
        shell.generate().await,
        GenerateOutcome::Failed("Unknown agent.".to_string())
    );

    let view = shell.view();
    assert_eq!(view.phase, GenerationPhase::Failed);
    assert_eq!(view.error.as_deref(), Some("Unknown agent."));
    assert_eq!(view.output, "first result");
    assert!(view.can_copy);
    assert_eq!(shell.snapshot().output(), "first result");
}

#[tokio::test]
async fn test_select_agent_resets_error_and_copy_status() {
    let clipboard = Arc::new(Osc52Clipboard::new(Vec::new()));
    let client = Arc::new(MockGatewayClient::replying("result"));
    let shell = Shell::new(Arc::new(AgentRegistry::builtin()), client, clipboard);

    shell.set_input("text");
    shell.generate().await;
    assert_eq!(shell.copy_output().unwrap(), CopyOutcome::Copied);
    assert_eq!(shell.view().copy_status, CopyStatus::Copied);

    shell.set_input("");
    shell.generate().await;
    assert!(shell.view().error.is_some());

    shell.select_agent("commit").unwrap();

    let view = shell.view();
    assert_eq!(view.agent_id, "commit");
    assert!(view.error.is_none());
    assert_eq!(view.copy_status, CopyStatus::Idle);
    assert_eq!(view.output, "result");
}

#[tokio::test]
async fn test_copy_indicator_reverts_after_two_seconds() {
    let clipboard = Arc::new(Osc52Clipboard::new(Vec::new()));
    let client = Arc::new(MockGatewayClient::replying("result"));
    let shell = Shell::new(Arc::new(AgentRegistry::builtin()), client, clipboard);
    shell.set_input("text");
    shell.generate().await;

    shell.copy_output().unwrap();
    let copied_at = std::time::Instant::now();
    assert_eq!(shell.view_at(copied_at).copy_status, CopyStatus::Copied);
    assert_eq!(
        shell
            .view_at(copied_at + Duration::from_millis(2100))
            .copy_status,
        CopyStatus::Idle
    );
}

// ============= HTTP Gateway Client Tests =============

#[tokio::test]
async fn test_http_client_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/agents"))
        .and(body_json(json!({"agentId": "mail", "input": "hi"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "Hello."})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpGatewayClient::new(mock_server.uri());
    let result = client.complete(&CompletionRequest::new("mail", "hi")).await;
    assert_eq!(result, Ok("Hello.".to_string()));
}

#[tokio::test]
async fn test_http_client_relays_server_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/agents"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Unknown agent."})))
        .mount(&mock_server)
        .await;

    let client = HttpGatewayClient::new(mock_server.uri());
    let result = client.complete(&CompletionRequest::new("x", "hi")).await;
    assert_eq!(result, Err("Unknown agent.".to_string()));
}

#[tokio::test]
async fn test_http_client_error_without_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/agents"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let client = HttpGatewayClient::new(mock_server.uri());
    let result = client.complete(&CompletionRequest::new("mail", "hi")).await;
    assert_eq!(result, Err(GENERIC_ERROR_MESSAGE.to_string()));
}

#[tokio::test]
async fn test_http_client_undecodable_success_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = HttpGatewayClient::new(mock_server.uri());
    let result = client.complete(&CompletionRequest::new("mail", "hi")).await;
    assert_eq!(result, Err(NETWORK_ERROR_MESSAGE.to_string()));
}

#[tokio::test]
async fn test_http_client_lists_agents() {
    let mock_server = MockServer::start().await;
    let infos = AgentRegistry::builtin().infos();

    Mock::given(method("GET"))
        .and(path("/api/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"agents": infos})))
        .mount(&mock_server)
        .await;

    let client = HttpGatewayClient::new(mock_server.uri());
    let agents = client.list_agents().await.unwrap();
    assert_eq!(agents, infos);
}

// ============= Shell Against the Real Router =============

#[tokio::test]
async fn test_shell_against_running_server() {
    let mock = MockLLMClient::new("  Polished text.  ");
    let state = AppState::new(
        PolishConfig::default(),
        Arc::new(AgentRegistry::builtin()),
        mock.clone().into_provider(),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_app(state)).await.unwrap();
    });

    let client = Arc::new(HttpGatewayClient::new(format!("http://{}", addr)));
    let shell = Shell::new(
        Arc::new(AgentRegistry::builtin()),
        client,
        Arc::new(NoClipboard),
    );

    shell.select_agent("standup").unwrap();
    shell.set_input("worked on the parser");
    assert_eq!(
        shell.generate().await,
        GenerateOutcome::Completed("Polished text.".to_string())
    );
    assert_eq!(mock.calls()[0].1, "worked on the parser");

    shell.select_agent("mail").unwrap();
    shell.set_input("   ");
    assert_eq!(
        shell.generate().await,
        GenerateOutcome::Rejected(SubmitRejection::EmptyInput)
    );
    assert_eq!(mock.call_count(), 1);
}
