//! Scripted collaborator implementations shared by the dispatch tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use helm_command::ReplyPayload;
use helm_core::{PermissionTier, PremiumTier, Snowflake};

use crate::collaborators::{
    ChatTransport, Collaborators, ErrorContext, ErrorReporter, InteractionEditor,
    PermissionLookup, PremiumLookup, PrivilegedUserDirectory, UsageMetrics,
};

pub(crate) const GUILD: Snowflake = Snowflake(1001);
pub(crate) const USER: Snowflake = Snowflake(2002);
pub(crate) const CHANNEL: Snowflake = Snowflake(3003);

pub(crate) struct RecordingErrors {
    pub reported: Mutex<Vec<String>>,
}

impl ErrorReporter for RecordingErrors {
    fn report(&self, error: &anyhow::Error, _ctx: ErrorContext) {
        self.reported.lock().expect("lock").push(error.to_string());
    }
}

pub(crate) struct RecordingEditor {
    pub edits: Mutex<Vec<(String, ReplyPayload)>>,
    pub fail: bool,
}

#[async_trait]
impl InteractionEditor for RecordingEditor {
    async fn edit_original(&self, token: &str, payload: &ReplyPayload) -> Result<()> {
        if self.fail {
            return Err(anyhow!("scripted edit failure"));
        }
        self.edits
            .lock()
            .expect("lock")
            .push((token.to_string(), payload.clone()));
        Ok(())
    }
}

pub(crate) struct RecordingMetrics {
    pub commands: Mutex<Vec<String>>,
}

impl UsageMetrics for RecordingMetrics {
    fn increment_command(&self, command_name: &str) {
        self.commands
            .lock()
            .expect("lock")
            .push(command_name.to_string());
    }
}

pub(crate) struct RecordingChat {
    pub sent: Mutex<Vec<(Snowflake, ReplyPayload)>>,
    pub crosses: Mutex<Vec<(Snowflake, Snowflake)>>,
    pub deleted: Mutex<Vec<(Snowflake, Snowflake)>>,
}

#[async_trait]
impl ChatTransport for RecordingChat {
    async fn send_message(&self, channel_id: Snowflake, payload: &ReplyPayload) -> Result<()> {
        self.sent
            .lock()
            .expect("lock")
            .push((channel_id, payload.clone()));
        Ok(())
    }

    async fn react_cross(&self, channel_id: Snowflake, message_id: Snowflake) -> Result<()> {
        self.crosses
            .lock()
            .expect("lock")
            .push((channel_id, message_id));
        Ok(())
    }

    async fn delete_message(&self, channel_id: Snowflake, message_id: Snowflake) -> Result<()> {
        self.deleted
            .lock()
            .expect("lock")
            .push((channel_id, message_id));
        Ok(())
    }
}

struct StaticPermissions {
    tier: PermissionTier,
    fail: bool,
}

#[async_trait]
impl PermissionLookup for StaticPermissions {
    async fn permission_tier(
        &self,
        _guild_id: Snowflake,
        _user_id: Snowflake,
    ) -> Result<PermissionTier> {
        if self.fail {
            return Err(anyhow!("scripted permission lookup failure"));
        }
        Ok(self.tier)
    }
}

struct StaticPremium {
    tier: PremiumTier,
    fail: bool,
}

#[async_trait]
impl PremiumLookup for StaticPremium {
    async fn premium_tier(&self, _guild_id: Snowflake) -> Result<PremiumTier> {
        if self.fail {
            return Err(anyhow!("scripted premium lookup failure"));
        }
        Ok(self.tier)
    }
}

struct StaticDirectory {
    admins: HashSet<Snowflake>,
    helpers: HashSet<Snowflake>,
    blacklist: HashSet<(Snowflake, Snowflake)>,
}

#[async_trait]
impl PrivilegedUserDirectory for StaticDirectory {
    fn is_admin(&self, user_id: Snowflake) -> bool {
        self.admins.contains(&user_id)
    }

    fn is_helper(&self, user_id: Snowflake) -> bool {
        self.helpers.contains(&user_id)
    }

    async fn is_blacklisted(&self, guild_id: Snowflake, user_id: Snowflake) -> Result<bool> {
        Ok(self.blacklist.contains(&(guild_id, user_id)))
    }
}

pub(crate) struct CollaboratorsBuilder {
    permission_tier: PermissionTier,
    premium_tier: PremiumTier,
    failing_permission: bool,
    failing_premium: bool,
    admins: HashSet<Snowflake>,
    helpers: HashSet<Snowflake>,
    blacklist: HashSet<(Snowflake, Snowflake)>,
    pub errors: Arc<RecordingErrors>,
    pub editor: Arc<RecordingEditor>,
    pub metrics: Arc<RecordingMetrics>,
    pub chat: Arc<RecordingChat>,
}

impl Default for CollaboratorsBuilder {
    fn default() -> Self {
        Self {
            permission_tier: PermissionTier::Everyone,
            premium_tier: PremiumTier::None,
            failing_permission: false,
            failing_premium: false,
            admins: HashSet::new(),
            helpers: HashSet::new(),
            blacklist: HashSet::new(),
            errors: Arc::new(RecordingErrors {
                reported: Mutex::new(Vec::new()),
            }),
            editor: Arc::new(RecordingEditor {
                edits: Mutex::new(Vec::new()),
                fail: false,
            }),
            metrics: Arc::new(RecordingMetrics {
                commands: Mutex::new(Vec::new()),
            }),
            chat: Arc::new(RecordingChat {
                sent: Mutex::new(Vec::new()),
                crosses: Mutex::new(Vec::new()),
                deleted: Mutex::new(Vec::new()),
            }),
        }
    }
}

impl CollaboratorsBuilder {
    pub fn permission(mut self, tier: PermissionTier) -> Self {
        self.permission_tier = tier;
        self
    }

    pub fn premium(mut self, tier: PremiumTier) -> Self {
        self.premium_tier = tier;
        self
    }

    pub fn admin(mut self, user_id: Snowflake) -> Self {
        self.admins.insert(user_id);
        self
    }

    pub fn helper(mut self, user_id: Snowflake) -> Self {
        self.helpers.insert(user_id);
        self
    }

    pub fn blacklist(mut self, guild_id: Snowflake, user_id: Snowflake) -> Self {
        self.blacklist.insert((guild_id, user_id));
        self
    }

    pub fn failing_permission(mut self) -> Self {
        self.failing_permission = true;
        self
    }

    pub fn failing_premium(mut self) -> Self {
        self.failing_premium = true;
        self
    }

    pub fn failing_editor(mut self) -> Self {
        self.editor = Arc::new(RecordingEditor {
            edits: Mutex::new(Vec::new()),
            fail: true,
        });
        self
    }

    pub fn build(&self) -> Collaborators {
        Collaborators {
            permissions: Arc::new(StaticPermissions {
                tier: self.permission_tier,
                fail: self.failing_permission,
            }),
            premium: Arc::new(StaticPremium {
                tier: self.premium_tier,
                fail: self.failing_premium,
            }),
            directory: Arc::new(StaticDirectory {
                admins: self.admins.clone(),
                helpers: self.helpers.clone(),
                blacklist: self.blacklist.clone(),
            }),
            errors: self.errors.clone(),
            editor: self.editor.clone(),
            metrics: self.metrics.clone(),
            chat: self.chat.clone(),
        }
    }
}
