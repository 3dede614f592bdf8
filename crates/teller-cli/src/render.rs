use colored::Colorize;
use teller_agents::{MessageRole, ThreadMessage};

pub(crate) fn role_label(role: MessageRole) -> &'static str {
    match role {
        MessageRole::System => "system:",
        MessageRole::User => "user:",
        MessageRole::Assistant => "Banking Avatar:",
    }
}

pub(crate) fn print_thread_message(message: &ThreadMessage) {
    let text = message.text_content();
    let label = role_label(message.role);
    match message.role {
        MessageRole::System => println!("{} {}\n", label.cyan(), text.cyan()),
        MessageRole::User => println!("{} {}\n", label.green(), text.green()),
        MessageRole::Assistant => println!("\n{} {}\n", label.yellow(), text.yellow()),
    }
}

#[cfg(test)]
mod tests {
    use teller_agents::MessageRole;

    use super::role_label;

    #[test]
    fn assistant_messages_render_as_the_banking_avatar() {
        assert_eq!(role_label(MessageRole::Assistant), "Banking Avatar:");
        assert_eq!(role_label(MessageRole::User), "user:");
        assert_eq!(role_label(MessageRole::System), "system:");
    }
}
