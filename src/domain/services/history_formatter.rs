use crate::domain::{HistoryTurn, Message};

/// Converts the stored conversation log into provider turns.
///
/// Every message becomes exactly one turn, in order, with its text carried
/// verbatim. The whole log is replayed: nothing is truncated or summarized.
pub fn format_history(messages: &[Message]) -> Vec<HistoryTurn> {
    messages
        .iter()
        .map(|msg| HistoryTurn::new(msg.role(), msg.text()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn test_empty_log_formats_to_no_turns() {
        assert!(format_history(&[]).is_empty());
    }

    #[test]
    fn test_roles_and_order_preserved() {
        let log = vec![
            Message::welcome(),
            Message::user("first idea"),
            Message::model("nice"),
            Message::user("second idea"),
        ];

        let turns = format_history(&log);

        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].role(), Role::Model);
        assert_eq!(turns[1], HistoryTurn::user("first idea"));
        assert_eq!(turns[2], HistoryTurn::model("nice"));
        assert_eq!(turns[3], HistoryTurn::user("second idea"));
    }

    #[test]
    fn test_text_is_verbatim() {
        let text = "  **bold**\n\n- item\n  ";
        let turns = format_history(&[Message::user(text)]);

        assert_eq!(turns[0].text(), text);
    }

    #[test]
    fn test_error_messages_are_replayed_as_model_turns() {
        let turns = format_history(&[Message::user("q"), Message::error()]);

        assert_eq!(turns[1].role(), Role::Model);
        assert_eq!(turns[1].text(), crate::domain::ERROR_APOLOGY);
    }
}
