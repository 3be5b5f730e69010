//! Pure view helpers: everything the widgets show is derived here from the
//! engine snapshot.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::common::Message;
use crate::sync::ComposerState;
use crate::sync::constants::MAX_MESSAGE_LENGTH;

pub const TITLE: &str = "Групповой чат";
pub const LOADING: &str = "Загрузка...";
pub const NO_MESSAGES: &str = "Пока нет сообщений. Будьте первым!";
pub const INPUT_HINT: &str = "Введите сообщение...";

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

pub fn online_label(count: u32) -> String {
    let noun = if count == 1 {
        "пользователь"
    } else {
        "пользователей"
    };
    format!("Онлайн: {count} {noun}")
}

/// `DD.MM.YYYY HH:MM` in the given time zone.
pub fn format_timestamp<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(tz)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

pub fn format_local_timestamp(timestamp: &DateTime<Utc>) -> String {
    format_timestamp(timestamp, &Local)
}

pub fn is_own_message(message: &Message, username: Option<&str>) -> bool {
    username.is_some_and(|name| message.username == name)
}

/// What the composer widgets show for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerView {
    pub counter: String,
    pub over_limit: bool,
    pub input_enabled: bool,
    pub send_enabled: bool,
    pub send_label: &'static str,
    pub error: Option<String>,
}

impl ComposerView {
    pub fn from_state(state: &ComposerState) -> Self {
        Self {
            counter: format!("{} / {MAX_MESSAGE_LENGTH}", state.character_count()),
            over_limit: state.is_over_limit(),
            input_enabled: !state.sending,
            send_enabled: state.can_submit(),
            send_label: if state.sending {
                "Отправка..."
            } else {
                "Отправить"
            },
            error: state.last_error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;
    use crate::network::mock::message;

    #[test]
    fn online_label_uses_singular_only_for_one() {
        assert_eq!(online_label(1), "Онлайн: 1 пользователь");
        assert_eq!(online_label(0), "Онлайн: 0 пользователей");
        assert_eq!(online_label(5), "Онлайн: 5 пользователей");
    }

    #[test]
    fn timestamp_is_rendered_in_target_zone() {
        let timestamp = "2024-03-05T21:07:45Z".parse::<DateTime<Utc>>().unwrap();
        let moscow = FixedOffset::east_opt(3 * 3600).unwrap();

        assert_eq!(format_timestamp(&timestamp, &Utc), "05.03.2024 21:07");
        assert_eq!(format_timestamp(&timestamp, &moscow), "06.03.2024 00:07");
    }

    #[test]
    fn own_messages_match_session_username() {
        let mine = message(Some(1), "Guest42", "hi");
        assert!(is_own_message(&mine, Some("Guest42")));
        assert!(!is_own_message(&mine, Some("Guest7")));
        assert!(!is_own_message(&mine, None));
    }

    #[test]
    fn composer_view_disables_send_for_invalid_drafts() {
        let empty = ComposerView::from_state(&ComposerState::default());
        assert!(!empty.send_enabled);
        assert_eq!(empty.counter, "0 / 1000");

        let over = ComposerView::from_state(&ComposerState {
            draft: "x".repeat(1001),
            ..ComposerState::default()
        });
        assert!(!over.send_enabled);
        assert!(over.over_limit);
        assert_eq!(over.counter, "1001 / 1000");

        let ok = ComposerView::from_state(&ComposerState {
            draft: "hello".into(),
            ..ComposerState::default()
        });
        assert!(ok.send_enabled);
        assert_eq!(ok.send_label, "Отправить");
    }

    #[test]
    fn composer_view_while_sending() {
        let view = ComposerView::from_state(&ComposerState {
            draft: "hello".into(),
            sending: true,
            last_error: None,
        });
        assert!(!view.send_enabled);
        assert!(!view.input_enabled);
        assert_eq!(view.send_label, "Отправка...");
    }
}
