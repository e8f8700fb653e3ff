/// Discord's message content limit.
pub const MAX_CONTENT_LEN: usize = 2000;

/// Builds the bodies to post for one replayed message.
///
/// `unsent_attachments` are URLs of attachments that could not be re-uploaded;
/// they are appended as links. Long text is split on character boundaries so
/// every body fits in one message.
pub fn message_bodies(content: &str, unsent_attachments: &[String]) -> Vec<String> {
    let mut text = content.to_string();
    for url in unsent_attachments {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(url);
    }
    split_content(&text, MAX_CONTENT_LEN)
}

pub fn split_content(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub copied: u64,
    pub failed: u64,
    pub empty: u64,
}

impl std::fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} message(s) copied, {} failed, {} without content skipped",
            self.copied, self.failed, self.empty
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_content_is_one_body() {
        assert_eq!(message_bodies("hello", &[]), vec!["hello"]);
    }

    #[test]
    fn empty_message_has_no_bodies() {
        assert!(message_bodies("", &[]).is_empty());
    }

    #[test]
    fn unsent_attachments_become_links() {
        let bodies = message_bodies("look", &["https://cdn.example/a.png".to_string()]);
        assert_eq!(bodies, vec!["look\nhttps://cdn.example/a.png"]);

        let bodies = message_bodies("", &["https://cdn.example/a.png".to_string()]);
        assert_eq!(bodies, vec!["https://cdn.example/a.png"]);
    }

    #[test]
    fn long_content_is_split_on_char_boundaries() {
        let text = "é".repeat(MAX_CONTENT_LEN + 5);
        let bodies = message_bodies(&text, &[]);
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0].chars().count(), MAX_CONTENT_LEN);
        assert_eq!(bodies[1].chars().count(), 5);
    }
}
