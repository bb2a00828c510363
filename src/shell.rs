//! Line-oriented command shell over [`SceneController`].
//!
//! One command per line. Shape commands act on the selected star.
//!
//! ```text
//! add                   add a star at the centre and select it
//! clear                 remove every star
//! undo | redo
//! drag <handle> <dy>    drag a handle vertically (radius, depth, spokes, tl, ... mb)
//! drag <handle> <dx> <dy>
//! move <x> <y>          place the star's centre at (x, y)
//! scale <sx> <sy>
//! select <id> | select none
//! delete                delete the selected star
//! wait <ms>             let time pass so pending drags are committed
//! svg | json | history
//! quit
//! ```

use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use starkit_designer::{ManualClock, ObjectId, Point, SceneController};
use starkit_settings::Config;

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Add,
    Clear,
    Undo,
    Redo,
    Drag { handle: String, delta: Point },
    Move { x: f64, y: f64 },
    Scale { sx: f64, sy: f64 },
    Select(Option<ObjectId>),
    Delete,
    Wait(Duration),
    Svg,
    Json,
    History,
    Help,
    Quit,
}

fn number<T: FromStr>(word: Option<&str>, what: &str) -> anyhow::Result<T> {
    let word = word.ok_or_else(|| anyhow!("missing {}", what))?;
    word.parse()
        .map_err(|_| anyhow!("invalid {} '{}'", what, word))
}

impl FromStr for ShellCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            bail!("empty command");
        };

        let command = match name {
            "add" => ShellCommand::Add,
            "clear" => ShellCommand::Clear,
            "undo" => ShellCommand::Undo,
            "redo" => ShellCommand::Redo,
            "drag" => {
                let handle = words
                    .next()
                    .ok_or_else(|| anyhow!("missing handle"))?
                    .to_string();
                let first: f64 = number(words.next(), "delta")?;
                let delta = match words.next() {
                    Some(dy) => Point::new(first, number(Some(dy), "dy")?),
                    None => Point::new(0.0, first),
                };
                ShellCommand::Drag { handle, delta }
            }
            "move" => ShellCommand::Move {
                x: number(words.next(), "x")?,
                y: number(words.next(), "y")?,
            },
            "scale" => ShellCommand::Scale {
                sx: number(words.next(), "sx")?,
                sy: number(words.next(), "sy")?,
            },
            "select" => match words.next() {
                Some("none") => ShellCommand::Select(None),
                other => ShellCommand::Select(Some(number(other, "object id")?)),
            },
            "delete" => ShellCommand::Delete,
            "wait" => ShellCommand::Wait(Duration::from_millis(number(words.next(), "milliseconds")?)),
            "svg" => ShellCommand::Svg,
            "json" => ShellCommand::Json,
            "history" => ShellCommand::History,
            "help" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => bail!("unknown command '{}'", other),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument '{}'", extra);
        }
        Ok(command)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// How `wait` lets time pass.
type Pause = Box<dyn FnMut(Duration)>;

pub struct Shell {
    scene: SceneController,
    pause: Pause,
}

impl Shell {
    /// A shell on the system clock; `wait` sleeps.
    pub fn new(config: Config) -> Self {
        Self {
            scene: SceneController::new(config),
            pause: Box::new(std::thread::sleep),
        }
    }

    /// A shell on a manual clock; `wait` advances the clock.
    pub fn with_manual_clock(config: Config, clock: ManualClock) -> Self {
        let scene = SceneController::with_clock(config, clock.clone());
        Self {
            scene,
            pause: Box::new(move |by| clock.advance(by)),
        }
    }

    pub fn scene(&self) -> &SceneController {
        &self.scene
    }

    /// Fire due debounce timers. Returns the number of history entries written.
    pub fn poll(&mut self) -> usize {
        self.scene.poll()
    }

    pub fn run_line(&mut self, line: &str) -> anyhow::Result<Reply> {
        if line.trim().is_empty() {
            return Ok(Reply::Text(String::new()));
        }
        let command: ShellCommand = line.parse()?;
        self.execute(command)
    }

    fn selected(&self) -> anyhow::Result<ObjectId> {
        self.scene
            .canvas()
            .selected()
            .ok_or_else(|| anyhow!("no star selected"))
    }

    pub fn execute(&mut self, command: ShellCommand) -> anyhow::Result<Reply> {
        tracing::debug!("Shell command {:?}", command);

        let text = match command {
            ShellCommand::Add => {
                let id = self.scene.add_shape();
                format!("added star {}", id)
            }
            ShellCommand::Clear => {
                self.scene.clear()?;
                "cleared".to_string()
            }
            ShellCommand::Undo => {
                self.scene.undo()?;
                self.summary()
            }
            ShellCommand::Redo => {
                self.scene.redo()?;
                self.summary()
            }
            ShellCommand::Drag { handle, delta } => {
                let id = self.selected()?;
                self.scene.drag_handle_named(id, &handle, delta)?;
                self.summary()
            }
            ShellCommand::Move { x, y } => {
                let id = self.selected()?;
                self.scene.move_object(id, x, y)?;
                self.summary()
            }
            ShellCommand::Scale { sx, sy } => {
                let id = self.selected()?;
                self.scene.scale_object(id, sx, sy)?;
                self.summary()
            }
            ShellCommand::Select(id) => {
                self.scene.select(id)?;
                match id {
                    Some(id) => format!("selected star {}", id),
                    None => "selection cleared".to_string(),
                }
            }
            ShellCommand::Delete => match self.scene.delete_selected()? {
                Some(id) => format!("deleted star {}", id),
                None => "nothing selected".to_string(),
            },
            ShellCommand::Wait(by) => {
                (self.pause)(by);
                let committed = self.scene.poll();
                format!("committed {} edit(s)", committed)
            }
            ShellCommand::Svg => self.scene.render_svg(),
            ShellCommand::Json => self.scene.to_json().context("serializing scene")?,
            ShellCommand::History => self.history(),
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Quit => return Ok(Reply::Quit),
        };

        Ok(Reply::Text(text))
    }

    /// One line per star: id, parameters and position.
    fn summary(&self) -> String {
        let canvas = self.scene.canvas();
        if canvas.is_empty() {
            return "(empty canvas)".to_string();
        }
        canvas
            .objects()
            .iter()
            .map(|object| {
                let params = object.parameters();
                let t = object.transform();
                let marker = if canvas.selected() == Some(object.id()) { "*" } else { " " };
                format!(
                    "{}star {}: spokes={} outer={} inner={} roundness={:.3} at ({}, {}) scale ({}, {})",
                    marker,
                    object.id(),
                    params.spoke_count(),
                    params.outer_radius(),
                    params.inner_radius(),
                    params.roundness(),
                    t.left,
                    t.top,
                    t.scale_x,
                    t.scale_y
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn history(&self) -> String {
        let history = self.scene.history();
        let mut lines: Vec<String> = history
            .labels()
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let marker = if i < history.cursor() { "+" } else { "-" };
                format!("{} {}", marker, label)
            })
            .collect();
        if self.scene.has_pending() {
            lines.push("~ pending drag".to_string());
        }
        if lines.is_empty() {
            "(no history)".to_string()
        } else {
            lines.join("\n")
        }
    }
}

const HELP: &str = "commands: add, clear, undo, redo, drag <handle> [dx] <dy>, move <x> <y>, \
scale <sx> <sy>, select <id|none>, delete, wait <ms>, svg, json, history, quit";

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> Shell {
        Shell::with_manual_clock(Config::default(), ManualClock::new())
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("add".parse::<ShellCommand>().unwrap(), ShellCommand::Add);
        assert_eq!(
            "drag spokes 2".parse::<ShellCommand>().unwrap(),
            ShellCommand::Drag {
                handle: "spokes".to_string(),
                delta: Point::new(0.0, 2.0),
            }
        );
        assert_eq!(
            "drag br 5 -3".parse::<ShellCommand>().unwrap(),
            ShellCommand::Drag {
                handle: "br".to_string(),
                delta: Point::new(5.0, -3.0),
            }
        );
        assert_eq!(
            "wait 600".parse::<ShellCommand>().unwrap(),
            ShellCommand::Wait(Duration::from_millis(600))
        );
        assert_eq!(
            "select none".parse::<ShellCommand>().unwrap(),
            ShellCommand::Select(None)
        );

        assert!("move 1".parse::<ShellCommand>().is_err());
        assert!("scale a b".parse::<ShellCommand>().is_err());
        assert!("undo now".parse::<ShellCommand>().is_err());
        assert!("spin".parse::<ShellCommand>().is_err());
    }

    #[test]
    fn test_session() {
        let mut shell = shell();

        assert_eq!(text(shell.run_line("add").unwrap()), "added star 1");
        shell.run_line("drag spokes 2").unwrap();
        shell.run_line("drag spokes 2").unwrap();
        assert!(text(shell.run_line("history").unwrap()).contains("~ pending drag"));

        assert_eq!(text(shell.run_line("wait 500").unwrap()), "committed 1 edit(s)");
        assert_eq!(
            text(shell.run_line("history").unwrap()),
            "+ Add star 1\n+ Edit star 1"
        );

        let summary = text(shell.run_line("undo").unwrap());
        assert!(summary.contains("spokes=8"), "{}", summary);
        assert_eq!(shell.run_line("quit").unwrap(), Reply::Quit);
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let mut shell = shell();

        let err = shell.run_line("undo").unwrap_err();
        assert_eq!(err.to_string(), "Nothing to undo!");

        let err = shell.run_line("drag spokes 2").unwrap_err();
        assert_eq!(err.to_string(), "no star selected");

        shell.run_line("add").unwrap();
        let err = shell.run_line("drag spin 2").unwrap_err();
        assert_eq!(err.to_string(), "Unknown handle 'spin' on object 1");

        assert_eq!(text(shell.run_line("").unwrap()), "");
    }
}
