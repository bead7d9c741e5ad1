use std::path::PathBuf;

use assistant_core::{AppViewModel, Mode, Msg};

pub const HELP: &str = "\
Commands:
  /mode file|url      switch ingestion mode
  /files <path>...    select files to upload (replaces the selection)
  /remove <n>         drop the n-th selected file
  /url <address>      set the website to ingest
  /upload             submit the active mode's input
  /clear-chat         empty the conversation
  /clear-index        delete every indexed document (asks first)
  /status             show the session summary
  /help               show this text
  /quit               leave
Anything else is a question. End a line with \\ to continue on the next line.";

/// What one line of terminal input asks the host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Msgs(Vec<Msg>),
    /// Stat these paths, then select them.
    SelectFiles(Vec<PathBuf>),
    ShowStatus,
    Help,
    /// Refused locally; show the hint.
    Rejected(String),
    Quit,
    Empty,
}

pub fn parse(line: &str, view: &AppViewModel) -> Input {
    if view.awaiting_clear_confirmation {
        let confirmed = matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes");
        return Input::Msgs(vec![Msg::ClearIndexAnswered(confirmed)]);
    }

    let trimmed = line.trim();
    if let Some(command) = trimmed.strip_prefix('/') {
        return parse_command(command, view);
    }
    if trimmed.is_empty() && view.question_input.is_empty() {
        return Input::Empty;
    }
    parse_question_line(line, view)
}

fn parse_command(command: &str, view: &AppViewModel) -> Input {
    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match name {
        "mode" => match rest {
            "file" | "files" => Input::Msgs(vec![Msg::ModeSelected(Mode::File)]),
            "url" => Input::Msgs(vec![Msg::ModeSelected(Mode::Url)]),
            _ => Input::Rejected("Usage: /mode file|url".to_string()),
        },
        "files" => {
            let paths: Vec<PathBuf> = rest.split_whitespace().map(PathBuf::from).collect();
            if paths.is_empty() {
                Input::Rejected("Usage: /files <path>...".to_string())
            } else {
                Input::SelectFiles(paths)
            }
        }
        "remove" => match rest.parse::<usize>() {
            Ok(position) if position >= 1 => Input::Msgs(vec![Msg::FileRemoved {
                index: position - 1,
            }]),
            _ => Input::Rejected("Usage: /remove <n> (1-based)".to_string()),
        },
        "url" => Input::Msgs(vec![
            Msg::ModeSelected(Mode::Url),
            Msg::UrlInputChanged(rest.to_string()),
        ]),
        "upload" => match view.mode {
            Mode::File if view.can_upload_files => Input::Msgs(vec![Msg::UploadFilesClicked]),
            Mode::Url if view.can_upload_url => Input::Msgs(vec![Msg::UploadUrlClicked]),
            _ => Input::Rejected("Wait for the current request to finish".to_string()),
        },
        "clear-chat" => Input::Msgs(vec![Msg::ClearChatClicked]),
        "clear-index" => Input::Msgs(vec![Msg::ClearIndexClicked]),
        "status" => Input::ShowStatus,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => Input::Rejected(format!("Unknown command /{other}. Type /help.")),
    }
}

/// A trailing backslash is the terminal's modifier-held Enter: the line is
/// kept and the question continues on the next line.
fn parse_question_line(line: &str, view: &AppViewModel) -> Input {
    if !view.can_ask {
        let hint = if view.loading {
            "Wait for the current request to finish"
        } else {
            "Questions are available once documents are indexed"
        };
        return Input::Rejected(hint.to_string());
    }

    let (text, soft_newline) = match line.trim_end().strip_suffix('\\') {
        Some(text) => (text, true),
        None => (line, false),
    };
    Input::Msgs(vec![
        Msg::QuestionInputChanged(format!("{}{}", view.question_input, text)),
        Msg::QuestionEnterPressed { soft_newline },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistant_core::BackendStatus;
    use pretty_assertions::assert_eq;

    fn ready_view() -> AppViewModel {
        AppViewModel {
            status: BackendStatus::ready(),
            can_ask: true,
            can_upload_files: true,
            ..AppViewModel::default()
        }
    }

    #[test]
    fn plain_line_submits_question() {
        assert_eq!(
            parse("What is X?", &ready_view()),
            Input::Msgs(vec![
                Msg::QuestionInputChanged("What is X?".to_string()),
                Msg::QuestionEnterPressed {
                    soft_newline: false
                },
            ])
        );
    }

    #[test]
    fn trailing_backslash_continues_question() {
        let first = parse("first line\\", &ready_view());
        assert_eq!(
            first,
            Input::Msgs(vec![
                Msg::QuestionInputChanged("first line".to_string()),
                Msg::QuestionEnterPressed { soft_newline: true },
            ])
        );

        let view = AppViewModel {
            question_input: "first line\n".to_string(),
            ..ready_view()
        };
        assert_eq!(
            parse("second", &view),
            Input::Msgs(vec![
                Msg::QuestionInputChanged("first line\nsecond".to_string()),
                Msg::QuestionEnterPressed {
                    soft_newline: false
                },
            ])
        );
    }

    #[test]
    fn backslash_followed_by_spaces_still_continues() {
        assert_eq!(
            parse("first line\\ ", &ready_view()),
            Input::Msgs(vec![
                Msg::QuestionInputChanged("first line".to_string()),
                Msg::QuestionEnterPressed { soft_newline: true },
            ])
        );
        assert_eq!(
            parse("first line\\\t  ", &ready_view()),
            Input::Msgs(vec![
                Msg::QuestionInputChanged("first line".to_string()),
                Msg::QuestionEnterPressed { soft_newline: true },
            ])
        );
    }

    #[test]
    fn questions_are_refused_until_ready() {
        let view = AppViewModel::default();
        assert!(matches!(parse("hello", &view), Input::Rejected(_)));

        let busy = AppViewModel {
            loading: true,
            can_ask: false,
            ..ready_view()
        };
        assert_eq!(
            parse("hello", &busy),
            Input::Rejected("Wait for the current request to finish".to_string())
        );
    }

    #[test]
    fn blank_line_without_pending_question_is_ignored() {
        assert_eq!(parse("   ", &ready_view()), Input::Empty);
    }

    #[test]
    fn upload_targets_active_mode() {
        assert_eq!(
            parse("/upload", &ready_view()),
            Input::Msgs(vec![Msg::UploadFilesClicked])
        );
        let url_view = AppViewModel {
            mode: Mode::Url,
            can_upload_files: false,
            can_upload_url: true,
            ..ready_view()
        };
        assert_eq!(
            parse("/upload", &url_view),
            Input::Msgs(vec![Msg::UploadUrlClicked])
        );
    }

    #[test]
    fn upload_follows_the_controller_gate() {
        let busy = AppViewModel {
            loading: true,
            can_upload_files: false,
            can_upload_url: false,
            ..ready_view()
        };
        assert_eq!(
            parse("/upload", &busy),
            Input::Rejected("Wait for the current request to finish".to_string())
        );

        let url_not_enabled = AppViewModel {
            mode: Mode::Url,
            can_upload_url: false,
            ..ready_view()
        };
        assert!(matches!(
            parse("/upload", &url_not_enabled),
            Input::Rejected(_)
        ));
    }

    #[test]
    fn remove_is_one_based() {
        assert_eq!(
            parse("/remove 1", &ready_view()),
            Input::Msgs(vec![Msg::FileRemoved { index: 0 }])
        );
        assert!(matches!(parse("/remove 0", &ready_view()), Input::Rejected(_)));
        assert!(matches!(parse("/remove x", &ready_view()), Input::Rejected(_)));
    }

    #[test]
    fn files_and_url_commands() {
        assert_eq!(
            parse("/files a.pdf docs/b.txt", &ready_view()),
            Input::SelectFiles(vec![PathBuf::from("a.pdf"), PathBuf::from("docs/b.txt")])
        );
        assert_eq!(
            parse("/url  https://example.com ", &ready_view()),
            Input::Msgs(vec![
                Msg::ModeSelected(Mode::Url),
                Msg::UrlInputChanged("https://example.com".to_string()),
            ])
        );
    }

    #[test]
    fn pending_confirmation_consumes_next_line() {
        let view = AppViewModel {
            awaiting_clear_confirmation: true,
            ..ready_view()
        };
        assert_eq!(
            parse("YES", &view),
            Input::Msgs(vec![Msg::ClearIndexAnswered(true)])
        );
        assert_eq!(
            parse("/quit", &view),
            Input::Msgs(vec![Msg::ClearIndexAnswered(false)])
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert_eq!(
            parse("/frobnicate", &ready_view()),
            Input::Rejected("Unknown command /frobnicate. Type /help.".to_string())
        );
    }
}
