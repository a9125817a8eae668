use rand::Rng;
use rand::seq::SliceRandom;

pub const OMIKUJI_KEYWORD: &str = "おみくじ";

pub const FORTUNES: [&str; 6] = ["大吉", "中吉", "吉", "小吉", "凶", "★大凶★"];
pub const SPECIAL_FORTUNE: &str = "　ゆ　ゆ　ゆ　ス　ペ　シ　ャ　ル　大　吉　";

const SPECIAL_CHANCE: f64 = 0.002;
const SPECIAL_CHANCE_ADMIN: f64 = 0.25;

pub fn special_chance(is_admin: bool) -> f64 {
    if is_admin { SPECIAL_CHANCE_ADMIN } else { SPECIAL_CHANCE }
}

/// Draws a fortune. The special result is decided by its own sample first,
/// so its odds do not depend on how many ordinary fortunes exist.
pub fn draw_with<R: Rng>(rng: &mut R, is_admin: bool) -> &'static str {
    if rng.gen_range(0.0..1.0) < special_chance(is_admin) {
        return SPECIAL_FORTUNE;
    }
    FORTUNES.choose(rng).copied().unwrap_or(FORTUNES[0])
}

pub fn draw(is_admin: bool) -> &'static str {
    draw_with(&mut rand::thread_rng(), is_admin)
}

pub fn reply_message(
    account_id: i64,
    room_id: &str,
    message_id: &str,
    user_name: &str,
    result: &str,
) -> String {
    format!(
        "[rp aid={account_id} to={room_id}-{message_id}]{user_name}さん、[info][title]おみくじ[/title]おみくじの結果は…\n\n{result}\n\nでした！[/info]"
    )
}
