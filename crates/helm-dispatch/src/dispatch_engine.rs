//! Front-to-back invocation pipeline: resolve, authorize, coerce, dispatch,
//! and broker the response for each ingestion path.

use std::sync::Arc;
use std::time::Duration;

use helm_command::{
    AutocompleteChoice, CommandRegistry, ComponentRegistry, InvocationContext, MessageCatalog,
    MessageId, ModalField, ReplyPayload, ReplySink,
};
use helm_core::Snowflake;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::argument_coercer::{coerce_free_text, remap_interaction_options};
use crate::autocomplete_router::route_autocomplete;
use crate::collaborators::{Collaborators, ErrorContext};
use crate::command_authorizer::{authorize, AuthorizationFailure, InvocationSource};
use crate::command_dispatcher::{dispatch_handler, schedule_message_deletion};
use crate::command_resolver::{resolve_free_text, resolve_interaction_path};
use crate::invocation_types::{
    ApplicationCommandInvocation, AutocompleteInvocation, ComponentInvocation, InboundMessage,
    ModalInvocation, SurfaceKind,
};
use crate::reply_sinks::{pending_result, ChannelReplySink};
use crate::response_broker::{BrokerConfig, BrokerState, InitialResponse, ResponseBroker};

/// Engine-wide settings. Deadlines are wall-clock and process-wide; no
/// command can adjust them.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Free-text invocation prefix; the bot mention also counts.
    pub free_text_prefix: String,
    /// Delay before the triggering free-text message is deleted.
    pub delete_after: Duration,
    pub broker: BrokerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            free_text_prefix: "t!".to_string(),
            delete_after: Duration::from_secs(10),
            broker: BrokerConfig::default(),
        }
    }
}

/// One engine per process: owns the immutable registries and the
/// collaborator handles, and drives every invocation end to end.
pub struct DispatchEngine {
    registry: Arc<CommandRegistry>,
    components: Arc<ComponentRegistry>,
    catalog: Arc<dyn MessageCatalog>,
    collaborators: Collaborators,
    broker: ResponseBroker,
    config: EngineConfig,
}

impl DispatchEngine {
    pub fn new(
        registry: Arc<CommandRegistry>,
        components: Arc<ComponentRegistry>,
        catalog: Arc<dyn MessageCatalog>,
        collaborators: Collaborators,
        config: EngineConfig,
    ) -> Self {
        let broker = ResponseBroker::new(
            config.broker,
            collaborators.editor.clone(),
            collaborators.errors.clone(),
        );
        Self {
            registry,
            components,
            catalog,
            collaborators,
            broker,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Free-text path. Ordinary chat (no prefix, or no matching command)
    /// is dropped without any reply.
    pub async fn handle_free_text_message(
        &self,
        surface: SurfaceKind,
        bot_id: Snowflake,
        message: InboundMessage,
    ) {
        if message.author.bot || message.guild_id.is_zero() {
            return;
        }

        let content = match strip_invocation_prefix(
            &message.content,
            &self.config.free_text_prefix,
            bot_id,
        ) {
            Some(rest) => rest,
            None => return,
        };

        let tokens: Vec<String> = content.split_whitespace().map(str::to_string).collect();
        let resolution = match resolve_free_text(&self.registry, &tokens) {
            Some(resolution) => resolution,
            None => {
                debug!("free-text input matched no command");
                return;
            }
        };

        let error_ctx = ErrorContext {
            guild_id: message.guild_id,
            user_id: message.author.id,
            channel_id: message.channel_id,
        };
        let sink = Arc::new(ChannelReplySink::new(
            self.collaborators.chat.clone(),
            self.collaborators.errors.clone(),
            error_ctx,
            message.channel_id,
        ));

        let facts = match authorize(
            &self.collaborators,
            resolution.command,
            resolution.root,
            surface,
            InvocationSource::FreeText,
            message.guild_id,
            message.author.id,
            error_ctx,
        )
        .await
        {
            Ok(facts) => facts,
            Err(AuthorizationFailure::Rejected(id)) => {
                self.reject_free_text(&message, &sink, id, error_ctx).await;
                return;
            }
            Err(AuthorizationFailure::Blacklisted) => {
                self.react_cross(&message, error_ctx).await;
                return;
            }
            Err(AuthorizationFailure::LookupFailed) => return,
        };

        let args = match coerce_free_text(&resolution.command.arguments, resolution.remaining) {
            Ok(args) => args,
            Err(error) => {
                sink.deliver(self.render(error.message)).await;
                return;
            }
        };

        let ctx = InvocationContext::new(
            message.author.id,
            message.guild_id,
            message.channel_id,
            facts.permission_tier,
            facts.premium_tier,
            sink,
        );
        dispatch_handler(
            resolution.command.handler.clone(),
            &resolution.root.name,
            ctx,
            args,
            &self.collaborators,
            error_ctx,
        );
        schedule_message_deletion(
            &self.collaborators,
            message.channel_id,
            message.id,
            self.config.delete_after,
            error_ctx,
        );
    }

    /// Application-command path. Returns the synchronous reply decision and
    /// the broker state handle, or `None` when no response is produced at
    /// all (registration drift, blacklist, failed fact lookup).
    pub async fn handle_application_command(
        &self,
        surface: SurfaceKind,
        invocation: ApplicationCommandInvocation,
    ) -> Option<(InitialResponse, watch::Receiver<BrokerState>)> {
        let resolution = match resolve_interaction_path(
            &self.registry,
            &invocation.data.name,
            &invocation.data.options,
        ) {
            Some(resolution) => resolution,
            None => {
                warn!(command = %invocation.data.name, "interaction for unregistered command");
                return None;
            }
        };

        let caller = invocation.caller.user_id();
        let error_ctx = ErrorContext {
            guild_id: invocation.guild_id,
            user_id: caller,
            channel_id: invocation.channel_id,
        };
        let (sink, rx) = pending_result();

        let facts = match authorize(
            &self.collaborators,
            resolution.command,
            resolution.root,
            surface,
            InvocationSource::Interaction,
            invocation.guild_id,
            caller,
            error_ctx,
        )
        .await
        {
            Ok(facts) => facts,
            Err(AuthorizationFailure::Rejected(id)) => {
                sink.deliver(self.render(id).ephemeral()).await;
                return Some(
                    self.broker
                        .drive(rx, invocation.token, false, error_ctx)
                        .await,
                );
            }
            Err(AuthorizationFailure::Blacklisted) => return None,
            Err(AuthorizationFailure::LookupFailed) => return None,
        };

        let args = match remap_interaction_options(
            &resolution.command.arguments,
            resolution.options,
        ) {
            Ok(args) => args,
            Err(error) => {
                sink.deliver(self.render(error.message).ephemeral()).await;
                return Some(
                    self.broker
                        .drive(rx, invocation.token, false, error_ctx)
                        .await,
                );
            }
        };

        let ctx = InvocationContext::new(
            caller,
            invocation.guild_id,
            invocation.channel_id,
            facts.permission_tier,
            facts.premium_tier,
            sink,
        );
        dispatch_handler(
            resolution.command.handler.clone(),
            &resolution.root.name,
            ctx,
            args,
            &self.collaborators,
            error_ctx,
        );

        Some(
            self.broker
                .drive(
                    rx,
                    invocation.token,
                    resolution.command.default_ephemeral,
                    error_ctx,
                )
                .await,
        )
    }

    /// Message-component path: same two-deadline protocol, keyed by custom
    /// id instead of a command name.
    pub async fn handle_message_component(
        &self,
        invocation: ComponentInvocation,
    ) -> Option<(InitialResponse, watch::Receiver<BrokerState>)> {
        let handler = match self.components.component(&invocation.data.custom_id) {
            Some(handler) => handler.clone(),
            None => {
                warn!(custom_id = %invocation.data.custom_id, "unregistered component");
                return None;
            }
        };

        let caller = invocation.caller.user_id();
        let error_ctx = ErrorContext {
            guild_id: invocation.guild_id,
            user_id: caller,
            channel_id: invocation.channel_id,
        };
        let (sink, rx) = pending_result();
        let ctx = InvocationContext::new(
            caller,
            invocation.guild_id,
            invocation.channel_id,
            Default::default(),
            Default::default(),
            sink,
        );

        let errors = self.collaborators.errors.clone();
        tokio::spawn(async move {
            if let Err(error) = handler.handle(ctx).await {
                errors.report(&error, error_ctx);
            }
        });

        Some(
            self.broker
                .drive(rx, invocation.token, false, error_ctx)
                .await,
        )
    }

    /// Modal-submission path: always awaited synchronously to completion.
    pub async fn handle_modal_submit(&self, invocation: ModalInvocation) -> Option<ReplyPayload> {
        let handler = match self.components.modal(&invocation.data.custom_id) {
            Some(handler) => handler.clone(),
            None => {
                warn!(custom_id = %invocation.data.custom_id, "unregistered modal");
                return None;
            }
        };

        let caller = invocation.caller.user_id();
        let error_ctx = ErrorContext {
            guild_id: invocation.guild_id,
            user_id: caller,
            channel_id: invocation.channel_id,
        };
        let fields: Vec<ModalField> = invocation
            .data
            .components
            .iter()
            .flat_map(|row| row.components.iter())
            .map(|input| ModalField {
                custom_id: input.custom_id.clone(),
                value: input.value.clone(),
            })
            .collect();

        let (sink, rx) = pending_result();
        let ctx = InvocationContext::new(
            caller,
            invocation.guild_id,
            invocation.channel_id,
            Default::default(),
            Default::default(),
            sink,
        );

        let errors = self.collaborators.errors.clone();
        tokio::spawn(async move {
            if let Err(error) = handler.handle(ctx, fields).await {
                errors.report(&error, error_ctx);
            }
        });

        self.broker.await_modal(rx).await
    }

    /// Autocomplete path: synchronous, no defer branch.
    pub async fn handle_autocomplete(
        &self,
        invocation: &AutocompleteInvocation,
    ) -> Option<Vec<AutocompleteChoice>> {
        route_autocomplete(&self.registry, &self.collaborators, invocation).await
    }

    fn render(&self, id: MessageId) -> ReplyPayload {
        ReplyPayload::text(self.catalog.render(id))
    }

    async fn reject_free_text(
        &self,
        message: &InboundMessage,
        sink: &Arc<ChannelReplySink>,
        id: MessageId,
        error_ctx: ErrorContext,
    ) {
        self.react_cross(message, error_ctx).await;
        sink.deliver(self.render(id)).await;
    }

    async fn react_cross(&self, message: &InboundMessage, error_ctx: ErrorContext) {
        if let Err(error) = self
            .collaborators
            .chat
            .react_cross(message.channel_id, message.id)
            .await
        {
            self.collaborators.errors.report(&error, error_ctx);
        }
    }
}

/// Peels the recognized invocation prefix off a message, if present: the
/// bot mention, or the configured textual prefix (case-insensitive).
fn strip_invocation_prefix<'a>(
    content: &'a str,
    prefix: &str,
    bot_id: Snowflake,
) -> Option<&'a str> {
    let mention = format!("<@{bot_id}>");
    if let Some(rest) = content.strip_prefix(mention.as_str()) {
        return Some(rest);
    }
    match content.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => Some(&content[prefix.len()..]),
        _ => None,
    }
}
