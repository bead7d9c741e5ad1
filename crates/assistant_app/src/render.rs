use assistant_core::{
    AppViewModel, BackendStatus, FileRowView, Mode, NotificationId, Readiness, Role, Severity,
    Turn,
};

/// Prints only what changed since the previous view.
#[derive(Debug, Default)]
pub struct Renderer {
    shown_turns: usize,
    chat_generation: u64,
    last_notification: Option<NotificationId>,
    last_status: Option<BackendStatus>,
    last_mode: Option<Mode>,
    last_files: Option<Vec<FileRowView>>,
    last_url: String,
    was_loading: bool,
    was_confirming: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut lines = Vec::new();

        if self.last_status != Some(view.status) {
            lines.push(format!("[status] {}", status_label(view.status)));
            self.last_status = Some(view.status);
        }

        if self.last_mode.is_some_and(|mode| mode != view.mode) {
            lines.push(format!("[mode] {}", mode_label(view.mode)));
        }
        self.last_mode = Some(view.mode);

        if self.last_files.as_ref() != Some(&view.files) {
            lines.extend(files_lines(&view.files));
            self.last_files = Some(view.files.clone());
        }

        if self.last_url != view.url_input {
            if !view.url_input.is_empty() {
                lines.push(format!("[url] {}", view.url_input));
            }
            self.last_url = view.url_input.clone();
        }

        if view.chat_generation != self.chat_generation {
            if self.shown_turns > 0 {
                lines.push("-- conversation cleared --".to_string());
            }
            self.chat_generation = view.chat_generation;
            self.shown_turns = 0;
        } else if view.turns.len() < self.shown_turns {
            lines.push("-- last question withdrawn --".to_string());
            self.shown_turns = view.turns.len();
        }
        for turn in &view.turns[self.shown_turns..] {
            lines.push(format_turn(turn));
        }
        self.shown_turns = view.turns.len();

        if let Some(notification) = &view.notification {
            if self.last_notification != Some(notification.id) {
                lines.push(format!(
                    "[{}] {}",
                    severity_label(notification.severity),
                    notification.message
                ));
                self.last_notification = Some(notification.id);
            }
        }

        if view.loading && !self.was_loading {
            lines.push("(request in flight)".to_string());
        }
        self.was_loading = view.loading;

        if view.awaiting_clear_confirmation && !self.was_confirming {
            lines.push("Delete every indexed document? This cannot be undone. [y/N]".to_string());
        }
        self.was_confirming = view.awaiting_clear_confirmation;

        lines
    }
}

/// Full session summary for `/status`.
pub fn summary(view: &AppViewModel, base_url: &str) -> Vec<String> {
    let mut lines = vec![
        format!("Backend: {base_url} ({})", status_label(view.status)),
        format!(
            "Mode: {} | Turns: {} | Busy: {}",
            mode_label(view.mode),
            view.turns.len(),
            if view.loading { "yes" } else { "no" }
        ),
    ];
    lines.extend(files_lines(&view.files));
    if !view.url_input.is_empty() {
        lines.push(format!("[url] {}", view.url_input));
    }
    lines
}

fn files_lines(files: &[FileRowView]) -> Vec<String> {
    if files.is_empty() {
        return vec!["[files] none selected".to_string()];
    }
    let total: u64 = files.iter().map(|file| file.size).sum();
    let mut lines = vec![format!(
        "[files] {} selected, {} bytes",
        files.len(),
        format_with_commas(total)
    )];
    lines.extend(files.iter().enumerate().map(|(i, file)| {
        format!(
            "  {}. {} ({} bytes)",
            i + 1,
            file.name,
            format_with_commas(file.size)
        )
    }));
    lines
}

fn format_turn(turn: &Turn) -> String {
    let label = match turn.role {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    let indent = " ".repeat(label.len() + 2);
    let body = turn.text.lines().collect::<Vec<_>>().join(&format!("\n{indent}"));
    format!("{label}> {body}")
}

fn status_label(status: BackendStatus) -> &'static str {
    match status.readiness {
        Readiness::Ready => "ready",
        Readiness::NoDocuments => "no documents indexed",
        Readiness::Unknown => "unknown",
    }
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::File => "files",
        Mode::Url => "website",
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "ok",
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
    }
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_core::Notification;
    use pretty_assertions::assert_eq;

    fn base_view() -> AppViewModel {
        AppViewModel {
            status: BackendStatus::ready(),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn first_render_shows_status_and_empty_selection() {
        let mut renderer = Renderer::new();
        assert_eq!(
            renderer.render(&base_view()),
            vec!["[status] ready", "[files] none selected"]
        );
        assert!(renderer.render(&base_view()).is_empty());
    }

    #[test]
    fn turns_are_printed_once_and_shrinking_is_marked() {
        let mut renderer = Renderer::new();
        renderer.render(&base_view());

        let asked = AppViewModel {
            turns: vec![Turn::user("What is X?")],
            ..base_view()
        };
        assert_eq!(renderer.render(&asked), vec!["you> What is X?"]);
        assert!(renderer.render(&asked).is_empty());

        let cleared = AppViewModel {
            chat_generation: 1,
            ..base_view()
        };
        assert_eq!(
            renderer.render(&cleared),
            vec!["-- conversation cleared --"]
        );
    }

    #[test]
    fn rollback_to_empty_is_a_withdrawal() {
        let mut renderer = Renderer::new();
        renderer.render(&base_view());

        let asked = AppViewModel {
            turns: vec![Turn::user("What is X?")],
            ..base_view()
        };
        renderer.render(&asked);

        assert_eq!(
            renderer.render(&base_view()),
            vec!["-- last question withdrawn --"]
        );
    }

    #[test]
    fn clearing_an_empty_chat_prints_nothing() {
        let mut renderer = Renderer::new();
        renderer.render(&base_view());
        let cleared = AppViewModel {
            chat_generation: 1,
            ..base_view()
        };
        assert!(renderer.render(&cleared).is_empty());
    }

    #[test]
    fn multi_line_answers_are_indented() {
        let mut renderer = Renderer::new();
        renderer.render(&base_view());
        let view = AppViewModel {
            turns: vec![Turn::user("q"), Turn::assistant("line one\nline two")],
            ..base_view()
        };
        assert_eq!(
            renderer.render(&view),
            vec!["you> q", "assistant> line one\n           line two"]
        );
    }

    #[test]
    fn notification_is_printed_once_per_id() {
        let mut renderer = Renderer::new();
        renderer.render(&base_view());
        let view = AppViewModel {
            notification: Some(Notification {
                id: 7,
                message: "index missing".to_string(),
                severity: Severity::Error,
            }),
            ..base_view()
        };
        assert_eq!(renderer.render(&view), vec!["[error] index missing"]);
        assert!(renderer.render(&view).is_empty());
    }

    #[test]
    fn sizes_use_thousands_separators() {
        assert_eq!(format_with_commas(0), "0");
        assert_eq!(format_with_commas(1234567), "1,234,567");
        assert_eq!(
            files_lines(&[FileRowView {
                name: "a.pdf".to_string(),
                size: 2048,
            }]),
            vec!["[files] 1 selected, 2,048 bytes", "  1. a.pdf (2,048 bytes)"]
        );
    }
}
