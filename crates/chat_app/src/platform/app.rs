use std::fs;
use std::io::{self, BufRead};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use chat_engine::{
    CommonMarkRenderer, EngineEvent, EngineHandle, ReqwestEndpoint, SubmissionController,
};
use chat_logging::chat_info;

use super::cli::Args;
use super::logging;
use super::preferences::PreferenceStore;
use super::ui::terminal::TerminalSink;

enum AppEvent {
    Line(String),
    InputClosed,
    Engine(EngineEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Submit(String),
    ToggleTheme,
    Quit,
}

fn parse_command(line: &str) -> Command {
    match line.trim() {
        "/quit" | "/exit" => Command::Quit,
        "/theme" => Command::ToggleTheme,
        _ => Command::Submit(line.to_string()),
    }
}

pub fn run_app(args: Args) -> anyhow::Result<()> {
    fs::create_dir_all(&args.state_dir)
        .with_context(|| format!("creating state directory {:?}", args.state_dir))?;
    logging::initialize(args.log, &args.state_dir);

    let preferences = PreferenceStore::new(args.state_dir.clone());
    let mut theme = preferences.load_theme();

    let endpoint = ReqwestEndpoint::new(args.endpoint_settings())?;
    chat_info!("Chat endpoint {}", endpoint.url());
    let engine = EngineHandle::new(Arc::new(endpoint));

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    spawn_input_reader(event_tx.clone());
    spawn_engine_forwarder(engine.clone(), event_tx);

    let mut sink = TerminalSink::new(io::stdout(), theme);
    sink.notice(format_args!(
        "Type a message and press enter. /theme toggles the theme, /quit exits."
    ));
    sink.prompt();
    let mut controller = SubmissionController::new(sink, engine, CommonMarkRenderer);

    let mut input_closed = false;
    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Line(line) => match parse_command(&line) {
                Command::Quit => break,
                Command::ToggleTheme => {
                    theme = theme.toggled();
                    preferences.save_theme(theme);
                    let sink = controller.sink_mut();
                    sink.set_theme(theme);
                    sink.prompt();
                }
                Command::Submit(text) => {
                    controller.submit(&text);
                    if text.trim().is_empty() {
                        controller.sink_mut().prompt();
                    }
                }
            },
            AppEvent::InputClosed => {
                input_closed = true;
                if !controller.is_busy() {
                    break;
                }
            }
            AppEvent::Engine(event) => {
                controller.handle_event(event);
                if input_closed && !controller.is_busy() {
                    break;
                }
            }
        }
    }

    chat_info!(
        "Session ended with {} turns",
        controller.transcript().len()
    );
    Ok(())
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if event_tx.send(AppEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

fn spawn_engine_forwarder(engine: EngineHandle, event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Some(event) = engine.recv() {
            if event_tx.send(AppEvent::Engine(event)).is_err() {
                return;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chat_core::{Outcome, Turn};
    use chat_engine::{EndpointSettings, RequestDispatcher};

    use super::*;

    #[test]
    fn forwarder_delivers_engine_completions() {
        let endpoint = ReqwestEndpoint::new(EndpointSettings {
            url: "http://127.0.0.1:1/api/chat".to_string(),
            ..EndpointSettings::default()
        })
        .unwrap();
        let engine = EngineHandle::new(Arc::new(endpoint));
        let (event_tx, event_rx) = mpsc::channel();
        spawn_engine_forwarder(engine.clone(), event_tx);

        engine.dispatch(1, vec![Turn::user("Hello")]).unwrap();

        match event_rx.recv_timeout(Duration::from_secs(5)) {
            Ok(AppEvent::Engine(EngineEvent::Completed {
                request_id: 1,
                outcome: Outcome::Transport { .. },
            })) => {}
            Ok(_) => panic!("unexpected app event"),
            Err(err) => panic!("no completion forwarded: {err}"),
        }
    }

    #[test]
    fn slash_commands_are_recognized() {
        assert_eq!(parse_command("/quit"), Command::Quit);
        assert_eq!(parse_command("  /exit  "), Command::Quit);
        assert_eq!(parse_command("/theme"), Command::ToggleTheme);
    }

    #[test]
    fn other_lines_are_submitted_verbatim() {
        assert_eq!(
            parse_command("  hello /theme "),
            Command::Submit("  hello /theme ".to_string())
        );
        assert_eq!(parse_command(""), Command::Submit(String::new()));
    }
}
