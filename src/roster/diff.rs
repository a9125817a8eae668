use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::models::{Member, RoomMember};

/// Members of `current` whose account is absent from `previous`, stamped with
/// `now` and kept in roster order. Departures are not reported.
pub fn find_new_members(
    current: &[RoomMember],
    previous: &[Member],
    now: DateTime<Utc>,
) -> Vec<Member> {
    let known: HashSet<i64> = previous.iter().map(|m| m.account_id).collect();
    current
        .iter()
        .filter(|m| !known.contains(&m.account_id))
        .map(|m| Member::joined(m, now))
        .collect()
}

/// The snapshot to persist: every current member, with the join time carried
/// over from `previous` when the account was already known.
pub fn merge_snapshot(
    current: &[RoomMember],
    previous: &[Member],
    now: DateTime<Utc>,
) -> Vec<Member> {
    let join_times: HashMap<i64, DateTime<Utc>> = previous
        .iter()
        .map(|m| (m.account_id, m.join_time))
        .collect();
    current
        .iter()
        .map(|m| {
            let join_time = join_times.get(&m.account_id).copied().unwrap_or(now);
            Member::joined(m, join_time)
        })
        .collect()
}
