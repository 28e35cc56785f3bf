/// How a message is styled; every kind stays until dismissed or cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Warning,
}

impl MessageKind {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Error => "message message-error",
            Self::Warning => "message message-warning",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageVm {
    pub id: u64,
    pub kind: MessageKind,
    pub text: String,
}

/// Dismissible message list shown at the top of a screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageLog {
    next_id: u64,
    entries: Vec<MessageVm>,
}

impl MessageLog {
    pub fn push(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.next_id += 1;
        self.entries.push(MessageVm {
            id: self.next_id,
            kind,
            text: text.into(),
        });
    }

    pub fn extend(&mut self, kind: MessageKind, texts: impl IntoIterator<Item = String>) {
        for text in texts {
            self.push(kind, text);
        }
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|entry| entry.id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn entries(&self) -> &[MessageVm] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_removes_only_the_chosen_entry() {
        let mut log = MessageLog::default();
        log.push(MessageKind::Error, "first");
        log.extend(
            MessageKind::Warning,
            vec!["second".to_owned(), "third".to_owned()],
        );
        let second = log.entries()[1].id;
        log.dismiss(second);
        let texts: Vec<_> = log.entries().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "third"]);

        log.clear();
        assert!(log.is_empty());
        log.push(MessageKind::Error, "again");
        assert!(log.entries()[0].id > second);
    }
}
