use dashmap::DashMap;
use serenity::model::id::GuildId as DiscordGuildId;
use std::sync::Arc;
use crate::player::Player;

pub type Registry = DashMap<DiscordGuildId, Arc<Player>>;
