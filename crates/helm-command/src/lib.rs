//! Command model for Helm: definitions, argument specs, the typed handler
//! abstraction, and the immutable registry built once at process start.

pub mod argument_spec;
pub mod command_definition;
pub mod command_registry;
pub mod component_registry;
pub mod invocation_context;
pub mod message_catalog;
pub mod parsed_arguments;
pub mod reply;

pub use argument_spec::{ArgumentKind, ArgumentSpec, AutocompleteChoice, AutocompleteHandler};
pub use command_definition::{CommandCategory, CommandDefinition, CommandHandler};
pub use command_registry::{CommandRegistry, RegistryError};
pub use component_registry::{ComponentHandler, ComponentRegistry, ModalField, ModalHandler};
pub use invocation_context::InvocationContext;
pub use message_catalog::{EnglishCatalog, MessageCatalog, MessageId};
pub use parsed_arguments::{ArgumentValue, ParsedArgumentSet};
pub use reply::{ReplyPayload, ReplySink};
