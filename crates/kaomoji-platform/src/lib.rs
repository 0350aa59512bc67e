//! Platform runners (terminal, one command per input line)
//!
//! The runner mounts the root component, draws the first frame, then for each
//! input line resolves the targeted button against the current frame,
//! dispatches the click, settles the scheduler and draws again.

mod backend;
mod command;
mod common;
mod config;

pub use backend::{FRAME_RULE, TextBackend};
pub use command::{Command, HELP};
pub use config::{ColorMode, TerminalConfig};

use std::io::{self, BufRead, Write};

use kaomoji_core::*;
use kaomoji_ui::layout_and_paint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    #[error("invalid argument `{0}`")]
    InvalidArgument(String),
    #[error("no such button: {0}")]
    NoSuchButton(String),
}

pub fn run_terminal_app<F>(root: F, config: TerminalConfig) -> Result<(), PlatformError>
where
    F: Fn() -> View + 'static,
{
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with_io(root, config, stdin.lock(), stdout.lock())
}

pub fn run_with_io<F, R, W>(
    root: F,
    config: TerminalConfig,
    input: R,
    output: W,
) -> Result<(), PlatformError>
where
    F: Fn() -> View + 'static,
    R: BufRead,
    W: Write,
{
    let mut sched = Scheduler::mount_root(root, config.scheduler_config())?;
    let mut backend = TextBackend::new(output, config.color);
    backend.configure_surface(config.width, config.height);
    backend.frame(&sched.frame(&layout_and_paint).scene)?;

    for line in input.lines() {
        let line = line?;
        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                backend.notice(&format!("error: {e}"))?;
                continue;
            }
        };
        log::debug!("command {cmd:?}");

        let target = {
            let frame = sched.frame(&layout_and_paint);
            match &cmd {
                Command::Quit => break,
                Command::Help => {
                    backend.notice(HELP)?;
                    continue;
                }
                Command::Frame => {
                    backend.frame(&frame.scene)?;
                    continue;
                }
                Command::Click(n) => {
                    common::nth_button_id(frame, *n).ok_or_else(|| n.to_string())
                }
                Command::Press(label) => {
                    common::button_id_by_label(frame, label).ok_or_else(|| label.clone())
                }
                Command::Tap(x, y) => common::top_hit_id(frame, Vec2 { x: *x, y: *y })
                    .ok_or_else(|| format!("{x},{y}")),
            }
        };

        let id = match target {
            Ok(id) => id,
            Err(what) => {
                backend.notice(&format!("error: {}", PlatformError::NoSuchButton(what)))?;
                continue;
            }
        };
        if !sched.dispatch_click(id)? {
            log::warn!("hit region {id} has no click handler");
        }
        backend.frame(&sched.frame(&layout_and_paint).scene)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaomoji_ui::{Button, Column, Heading, Text};

    fn counter() -> View {
        let n = remember(|| signal(0u32));
        Column(vec![
            Heading("Count"),
            Text(n.get().to_string()).color("blue"),
            Button("+1", {
                let n = (*n).clone();
                move || {
                    n.update(|v| *v += 1);
                }
            }),
        ])
    }

    fn run(input: &str) -> String {
        let mut out = Vec::new();
        run_with_io(counter, TerminalConfig::default().plain(), input.as_bytes(), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_session_transcript() {
        let out = run("click 1\npress +1\nbogus\ntap 5 200\n\nquit\nclick 1\n");
        insta::assert_snapshot!(out.trim_end(), @r"
        Count
        0
        [ +1 ]
        ----
        Count
        1
        [ +1 ]
        ----
        Count
        2
        [ +1 ]
        ----
        error: unknown command `bogus` (try `help`)
        error: no such button: 5,200
        ");
    }

    #[test]
    fn test_tap_hits_button() {
        // heading 0..40, text 40..60, button 60..88
        let out = run("tap 5 70\n");
        assert!(out.ends_with("Count\n1\n[ +1 ]\n----\n"), "{out}");
    }

    #[test]
    fn test_frame_and_help() {
        let out = run("frame\nhelp\n");
        assert_eq!(out.matches(FRAME_RULE).count(), 2);
        assert!(out.contains("click <n>"));
    }

    #[test]
    fn test_update_loop_is_fatal() {
        fn runaway() -> View {
            let n = remember(|| signal(0u64));
            use_reaction(deps![n], {
                let n = (*n).clone();
                move || {
                    n.update(|v| *v += 1);
                }
            });
            Text("spinning")
        }
        let mut out = Vec::new();
        let cfg = TerminalConfig {
            max_settle_rounds: 4,
            ..TerminalConfig::default().plain()
        };
        let err = run_with_io(runaway, cfg, "".as_bytes(), &mut out).unwrap_err();
        assert!(matches!(
            err,
            PlatformError::Runtime(RuntimeError::UpdateLoop { rounds: 4 })
        ));
    }
}
