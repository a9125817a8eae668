mod emoji;
pub mod omikuji;
mod policy;

pub use emoji::count_emojis;
pub use policy::{
    EMOJI_FLOOD_THRESHOLD, MASS_MENTION_TOKEN, ModerationError, Violation, check_emoji_flood,
    check_mass_mention, demote_to_readonly, demotion_failure_notice, demotion_notice,
};
