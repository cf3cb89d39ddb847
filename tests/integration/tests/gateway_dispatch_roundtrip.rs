//! End-to-end ingestion tests: a real bound listener, JSON envelopes in,
//! platform responses out, recording collaborators behind the engine.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use helm_command::{
    ArgumentKind, ArgumentSpec, AutocompleteChoice, AutocompleteHandler, CommandCategory,
    CommandDefinition, CommandHandler, CommandRegistry, ComponentRegistry, EnglishCatalog,
    InvocationContext, ParsedArgumentSet, ReplyPayload,
};
use helm_core::{PermissionTier, PremiumTier, Snowflake};
use helm_dispatch::{
    BrokerConfig, ChatTransport, Collaborators, DispatchEngine, EngineConfig, ErrorContext,
    ErrorReporter, InteractionEditor, PermissionLookup, PremiumLookup, PrivilegedUserDirectory,
    UsageMetrics,
};
use helm_gateway::build_gateway_router;
use serde_json::{json, Value};

// Deadlines shortened so the deferred paths run in test wall-clock time.
const FIRST_DEADLINE: Duration = Duration::from_millis(300);
const FOLLOW_UP_DEADLINE: Duration = Duration::from_millis(2000);

struct OpenPermissions;

#[async_trait]
impl PermissionLookup for OpenPermissions {
    async fn permission_tier(
        &self,
        _guild_id: Snowflake,
        _user_id: Snowflake,
    ) -> Result<PermissionTier> {
        Ok(PermissionTier::Everyone)
    }
}

struct NoPremium;

#[async_trait]
impl PremiumLookup for NoPremium {
    async fn premium_tier(&self, _guild_id: Snowflake) -> Result<PremiumTier> {
        Ok(PremiumTier::None)
    }
}

struct EmptyDirectory;

#[async_trait]
impl PrivilegedUserDirectory for EmptyDirectory {
    fn is_admin(&self, _user_id: Snowflake) -> bool {
        false
    }

    fn is_helper(&self, _user_id: Snowflake) -> bool {
        false
    }

    async fn is_blacklisted(&self, _guild_id: Snowflake, _user_id: Snowflake) -> Result<bool> {
        Ok(false)
    }
}

#[derive(Default)]
struct RecordingErrors {
    reported: Mutex<Vec<String>>,
}

impl ErrorReporter for RecordingErrors {
    fn report(&self, error: &anyhow::Error, _ctx: ErrorContext) {
        self.reported.lock().expect("lock").push(error.to_string());
    }
}

#[derive(Default)]
struct RecordingEditor {
    edits: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl InteractionEditor for RecordingEditor {
    async fn edit_original(&self, token: &str, payload: &ReplyPayload) -> Result<()> {
        self.edits
            .lock()
            .expect("lock")
            .push((token.to_string(), payload.content.clone()));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingMetrics {
    commands: Mutex<Vec<String>>,
}

impl UsageMetrics for RecordingMetrics {
    fn increment_command(&self, command_name: &str) {
        self.commands
            .lock()
            .expect("lock")
            .push(command_name.to_string());
    }
}

#[derive(Default)]
struct RecordingChat {
    sent: Mutex<Vec<(Snowflake, String)>>,
    deleted: Mutex<Vec<Snowflake>>,
}

#[async_trait]
impl ChatTransport for RecordingChat {
    async fn send_message(&self, channel_id: Snowflake, payload: &ReplyPayload) -> Result<()> {
        self.sent
            .lock()
            .expect("lock")
            .push((channel_id, payload.content.clone()));
        Ok(())
    }

    async fn react_cross(&self, _channel_id: Snowflake, _message_id: Snowflake) -> Result<()> {
        Ok(())
    }

    async fn delete_message(&self, _channel_id: Snowflake, message_id: Snowflake) -> Result<()> {
        self.deleted.lock().expect("lock").push(message_id);
        Ok(())
    }
}

struct EchoHandler {
    delay: Duration,
}

#[async_trait]
impl CommandHandler for EchoHandler {
    fn parameter_kinds(&self) -> &[ArgumentKind] {
        std::slice::from_ref(&ArgumentKind::String)
    }

    async fn execute(&self, ctx: InvocationContext, args: ParsedArgumentSet) -> Result<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let text = args.string(0).unwrap_or("<absent>").to_string();
        ctx.reply(ReplyPayload::text(format!("echo: {text}"))).await;
        Ok(())
    }
}

struct TagSuggestions;

#[async_trait]
impl AutocompleteHandler for TagSuggestions {
    async fn suggest(
        &self,
        _guild_id: Snowflake,
        partial: &str,
    ) -> Result<Vec<AutocompleteChoice>> {
        Ok(vec![AutocompleteChoice::new(
            format!("{partial}-match"),
            partial,
        )])
    }
}

struct Harness {
    addr: SocketAddr,
    http: reqwest::Client,
    errors: Arc<RecordingErrors>,
    editor: Arc<RecordingEditor>,
    metrics: Arc<RecordingMetrics>,
    chat: Arc<RecordingChat>,
}

impl Harness {
    async fn start() -> Result<Self> {
        let errors = Arc::new(RecordingErrors::default());
        let editor = Arc::new(RecordingEditor::default());
        let metrics = Arc::new(RecordingMetrics::default());
        let chat = Arc::new(RecordingChat::default());

        let collaborators = Collaborators {
            permissions: Arc::new(OpenPermissions),
            premium: Arc::new(NoPremium),
            directory: Arc::new(EmptyDirectory),
            errors: errors.clone(),
            editor: editor.clone(),
            metrics: metrics.clone(),
            chat: chat.clone(),
        };

        let registry = CommandRegistry::build(vec![
            CommandDefinition::new(
                "echo",
                CommandCategory::General,
                Arc::new(EchoHandler {
                    delay: Duration::ZERO,
                }),
            )
            .with_arguments(vec![ArgumentSpec::new("text", ArgumentKind::String, true)]),
            CommandDefinition::new(
                "slowecho",
                CommandCategory::General,
                Arc::new(EchoHandler {
                    delay: FIRST_DEADLINE * 2,
                }),
            )
            .with_arguments(vec![ArgumentSpec::new("text", ArgumentKind::String, true)
                .with_autocomplete(Arc::new(TagSuggestions))]),
        ])
        .map_err(|error| anyhow!("registry: {error}"))?;

        let engine = Arc::new(DispatchEngine::new(
            Arc::new(registry),
            Arc::new(ComponentRegistry::new()),
            Arc::new(EnglishCatalog),
            collaborators,
            EngineConfig {
                free_text_prefix: "t!".to_string(),
                delete_after: Duration::from_millis(100),
                broker: BrokerConfig {
                    first_deadline: FIRST_DEADLINE,
                    follow_up_deadline: FOLLOW_UP_DEADLINE,
                },
            },
        ));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = build_gateway_router(engine);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            http: reqwest::Client::new(),
            errors,
            editor,
            metrics,
            chat,
        })
    }

    async fn post(&self, endpoint: &str, body: Value) -> Result<(u16, Value)> {
        let response = self
            .http
            .post(format!("http://{}{endpoint}", self.addr))
            .body(body.to_string())
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.json().await?;
        Ok((status, body))
    }
}

fn command_envelope(name: &str, text: &str) -> Value {
    json!({
        "bot_id": 500,
        "interaction_type": 2,
        "event": {
            "token": "tok-1",
            "guild_id": 10,
            "channel_id": 20,
            "member": {"user": {"id": 30}},
            "data": {
                "name": name,
                "options": [{"name": "text", "value": text}]
            }
        }
    })
}

#[tokio::test]
async fn integration_fast_command_gets_immediate_message_response() {
    let harness = Harness::start().await.expect("harness");

    let (status, body) = harness
        .post("/interaction", command_envelope("echo", "hi"))
        .await
        .expect("request");

    assert_eq!(status, 200);
    assert_eq!(body["type"], 4);
    assert_eq!(body["data"]["content"], "echo: hi");
    assert!(harness.editor.edits.lock().expect("lock").is_empty());
    assert_eq!(
        harness.metrics.commands.lock().expect("lock").as_slice(),
        ["echo".to_string()]
    );
}

#[tokio::test]
async fn integration_slow_command_defers_then_edits_original() {
    let harness = Harness::start().await.expect("harness");

    let (status, body) = harness
        .post("/interaction", command_envelope("slowecho", "later"))
        .await
        .expect("request");

    assert_eq!(status, 200);
    assert_eq!(body["type"], 5);

    // Follow-up lands within the second window.
    tokio::time::sleep(FIRST_DEADLINE * 3).await;
    let edits = harness.editor.edits.lock().expect("lock");
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].0, "tok-1");
    assert_eq!(edits[0].1, "echo: later");
}

#[tokio::test]
async fn integration_malformed_envelope_is_rejected_with_error_body() {
    let harness = Harness::start().await.expect("harness");

    let (status, body) = harness
        .post("/event", json!({"bot_id": "not json shaped"}))
        .await
        .expect("request");
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));

    let (status, body) = harness
        .post(
            "/interaction",
            json!({"bot_id": 1, "interaction_type": 9, "event": {}}),
        )
        .await
        .expect("request");
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn integration_free_text_event_acks_then_replies_via_chat() {
    let harness = Harness::start().await.expect("harness");

    let (status, body) = harness
        .post(
            "/event",
            json!({
                "bot_id": 500,
                "event": {
                    "id": 900,
                    "channel_id": 20,
                    "guild_id": 10,
                    "author": {"id": 30},
                    "content": "t!echo hello there"
                }
            }),
        )
        .await
        .expect("request");
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    // The pipeline runs after the ack; poll briefly for the reply.
    let mut replied = false;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        let sent = harness.chat.sent.lock().expect("lock");
        if let Some((channel, content)) = sent.first() {
            assert_eq!(*channel, Snowflake(20));
            assert_eq!(content, "echo: hello there");
            replied = true;
            break;
        }
    }
    assert!(replied, "free-text reply never arrived");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(
        harness.chat.deleted.lock().expect("lock").as_slice(),
        [Snowflake(900)]
    );
    assert!(harness.errors.reported.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn integration_autocomplete_returns_capped_choice_list() {
    let harness = Harness::start().await.expect("harness");

    let (status, body) = harness
        .post(
            "/interaction",
            json!({
                "bot_id": 500,
                "interaction_type": 4,
                "event": {
                    "guild_id": 10,
                    "data": {
                        "name": "slowecho",
                        "options": [{"name": "text", "value": "wel", "focused": true}]
                    }
                }
            }),
        )
        .await
        .expect("request");

    assert_eq!(status, 200);
    assert_eq!(body["type"], 8);
    assert_eq!(body["data"]["choices"][0]["name"], "wel-match");
    assert_eq!(body["data"]["choices"][0]["value"], "wel");
}
