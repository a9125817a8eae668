//! Periodic clock announcements posted to the monitored room.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

use crate::infrastructure::ChatApi;

/// Messages due at `now` (local wall-clock time).
pub fn announcements_for(now: NaiveDateTime) -> Vec<String> {
    let mut messages = Vec::new();
    if now.minute() != 0 {
        return messages;
    }
    if now.hour() % 2 == 0 {
        messages.push(format!("{}時です！", now.hour()));
    }
    if now.hour() == 0 {
        messages.push(format!(
            "日付変更！今日は{}年{}月{}日です！",
            now.year(),
            now.month(),
            now.day()
        ));
    }
    messages
}

pub fn spawn(chat: Arc<dyn ChatApi>, room_id: String) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(60));
        let mut last_minute = None;
        loop {
            ticker.tick().await;
            let now = Local::now().naive_local();
            let minute = (now.date(), now.hour(), now.minute());
            // ticks can drift; handle each minute once
            if last_minute == Some(minute) {
                continue;
            }
            last_minute = Some(minute);

            for message in announcements_for(now) {
                match chat.send_message(&room_id, &message).await {
                    Ok(()) => tracing::info!("Announced: {}", message),
                    Err(e) => tracing::error!("Failed to send announcement: {}", e),
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::announcements_for;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 8)
            .unwrap()
            .and_hms_opt(hour, minute, 30)
            .unwrap()
    }

    #[test]
    fn even_hours_are_announced_on_the_hour() {
        assert_eq!(announcements_for(at(14, 0)), vec!["14時です！".to_string()]);
        assert!(announcements_for(at(14, 1)).is_empty());
        assert!(announcements_for(at(15, 0)).is_empty());
    }

    #[test]
    fn midnight_also_announces_the_date() {
        assert_eq!(
            announcements_for(at(0, 0)),
            vec!["0時です！".to_string(), "日付変更！今日は2024年7月8日です！".to_string()]
        );
    }
}
