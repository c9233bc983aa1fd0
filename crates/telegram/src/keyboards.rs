//! Inline keyboard builders for interactive bot menus
//!
//! Every button carries the callback data of a [`MenuAction`], so the
//! callback handler only ever sees data it knows how to parse.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::types::MenuAction;

fn button(label: &str, action: MenuAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label, action.as_data())
}

/// Create the main menu keyboard
pub fn main_menu_keyboard() -> InlineKeyboardMarkup {
    let buttons = vec![
        vec![
            button("ℹ️ Help", MenuAction::Help),
            button("📊 Status", MenuAction::Status),
        ],
        vec![
            button("📋 How to Use", MenuAction::HowTo),
            button("🔑 My Chat ID", MenuAction::ChatId),
        ],
        vec![button("👨‍💻 Author", MenuAction::Author)],
    ];

    InlineKeyboardMarkup::new(buttons)
}

/// Single "back to menu" button under help and status pages
pub fn back_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("🔙 Back to Menu", MenuAction::Menu)]])
}

/// Shown under the "not a torrent file" rejection
pub fn see_help_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("📖 See Help", MenuAction::Help)]])
}

/// Shown when an authorized chat sends plain text
pub fn info_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button("📖 Help", MenuAction::Help),
        button("📋 How to Use", MenuAction::HowTo),
    ]])
}

/// Shown under an upload summary
pub fn summary_keyboard(all_failed: bool) -> InlineKeyboardMarkup {
    if all_failed {
        return InlineKeyboardMarkup::new(vec![vec![button("🔄 Try Again", MenuAction::Menu)]]);
    }

    InlineKeyboardMarkup::new(vec![vec![
        button("📊 Check Status", MenuAction::Status),
        button("🔙 Menu", MenuAction::Menu),
    ]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(keyboard: &InlineKeyboardMarkup) -> Vec<String> {
        keyboard
            .inline_keyboard
            .iter()
            .flatten()
            .map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                other => panic!("Expected callback button, got {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_every_button_parses_as_menu_action() {
        let keyboards = [
            main_menu_keyboard(),
            back_keyboard(),
            see_help_keyboard(),
            info_keyboard(),
            summary_keyboard(true),
            summary_keyboard(false),
        ];
        for keyboard in &keyboards {
            for data in callback_data(keyboard) {
                assert!(MenuAction::parse(&data).is_some(), "unknown callback {data}");
            }
        }
    }

    #[test]
    fn test_main_menu_keyboard() {
        let keyboard = main_menu_keyboard();
        assert_eq!(keyboard.inline_keyboard.len(), 3);
        assert_eq!(
            callback_data(&keyboard),
            vec!["help", "status", "howto", "chatid", "author"]
        );
    }

    #[test]
    fn test_summary_keyboard() {
        assert_eq!(callback_data(&summary_keyboard(false)), vec!["status", "menu"]);
        assert_eq!(callback_data(&summary_keyboard(true)), vec!["menu"]);
    }
}
