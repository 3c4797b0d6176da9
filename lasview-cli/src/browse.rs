//! Interactive browse loop.
//!
//! Reads one command per line and drives a [`Viewer`] over a [`TextSurface`].

use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use lasview_core::{Navigation, PickOutcome, Point3, Viewer};
use lasview_io::FolderIngestor;

use crate::text::{EchoClipboard, TextSurface};

const HELP: &str = "\
commands:
  list              list loaded files (* = visible)
  next | prev       step to the next / previous file
  show N | hide N   toggle visibility of file N
  only N            show only file N
  clear             hide every file
  pick X Y Z        report a picked point
  picking on|off    enable / disable point picking
  style             toggle attribute / uniform colouring
  id | coords       copy detection id / centroid of the current file
  reload            re-ingest the folder
  quit";

/// Malformed browse input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    BadArguments {
        command: &'static str,
        expected: &'static str,
    },
}

/// One line of browse input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrowseCommand {
    List,
    Next,
    Previous,
    Show(usize),
    Hide(usize),
    Only(usize),
    Clear,
    Pick(Point3),
    Picking(bool),
    Style,
    CopyId,
    CopyCoordinates,
    Reload,
    Help,
    Quit,
}

fn index_arg(command: &'static str, args: &[&str]) -> Result<usize, CommandError> {
    match args {
        [n] => n.parse().map_err(|_| CommandError::BadArguments {
            command,
            expected: "a file index",
        }),
        _ => Err(CommandError::BadArguments {
            command,
            expected: "a file index",
        }),
    }
}

impl FromStr for BrowseCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Unknown(String::new()));
        };
        let args: Vec<&str> = words.collect();

        let command = match head {
            "list" | "ls" => BrowseCommand::List,
            "next" | "n" => BrowseCommand::Next,
            "prev" | "previous" | "p" => BrowseCommand::Previous,
            "show" => BrowseCommand::Show(index_arg("show", &args)?),
            "hide" => BrowseCommand::Hide(index_arg("hide", &args)?),
            "only" => BrowseCommand::Only(index_arg("only", &args)?),
            "clear" => BrowseCommand::Clear,
            "pick" => {
                let bad = CommandError::BadArguments {
                    command: "pick",
                    expected: "three coordinates",
                };
                let coords: Vec<f64> = args
                    .iter()
                    .map(|a| a.parse::<f64>())
                    .collect::<Result<_, _>>()
                    .map_err(|_| bad.clone())?;
                let &[x, y, z] = coords.as_slice() else {
                    return Err(bad);
                };
                BrowseCommand::Pick(Point3::new(x, y, z))
            }
            "picking" => match args.as_slice() {
                ["on"] => BrowseCommand::Picking(true),
                ["off"] => BrowseCommand::Picking(false),
                _ => {
                    return Err(CommandError::BadArguments {
                        command: "picking",
                        expected: "'on' or 'off'",
                    })
                }
            },
            "style" | "t" => BrowseCommand::Style,
            "id" | "d" => BrowseCommand::CopyId,
            "coords" | "c" => BrowseCommand::CopyCoordinates,
            "reload" | "r" => BrowseCommand::Reload,
            "help" | "?" => BrowseCommand::Help,
            "quit" | "exit" | "q" => BrowseCommand::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

/// Runs the browse loop until `quit` or end of input.
///
/// # Errors
/// Only I/O errors on `input`/`out` end the loop early; engine errors are
/// printed and the loop continues.
pub fn run<R: BufRead, W: Write>(
    viewer: &mut Viewer<TextSurface>,
    ingestor: &FolderIngestor,
    dir: &Path,
    input: R,
    out: &mut W,
) -> std::io::Result<()> {
    let mut clipboard = EchoClipboard::default();
    flush_events(viewer, out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<BrowseCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };
        if command == BrowseCommand::Quit {
            break;
        }
        execute(command, viewer, ingestor, dir, &mut clipboard, out)?;
        flush_events(viewer, out)?;
    }
    Ok(())
}

fn flush_events<W: Write>(viewer: &mut Viewer<TextSurface>, out: &mut W) -> std::io::Result<()> {
    for event in viewer.surface_mut().drain() {
        writeln!(out, "{event}")?;
    }
    Ok(())
}

fn execute<W: Write>(
    command: BrowseCommand,
    viewer: &mut Viewer<TextSurface>,
    ingestor: &FolderIngestor,
    dir: &Path,
    clipboard: &mut EchoClipboard,
    out: &mut W,
) -> std::io::Result<()> {
    match command {
        BrowseCommand::List => {
            let session = viewer.session();
            for (index, record) in session.records().iter().enumerate() {
                let mark = if session.is_visible(record.source_path()) {
                    '*'
                } else {
                    ' '
                };
                writeln!(out, "{mark} {index:>3}  {}", record.file_name())?;
            }
        }
        BrowseCommand::Next | BrowseCommand::Previous => {
            let result = if command == BrowseCommand::Next {
                viewer.next()
            } else {
                viewer.previous()
            };
            match result {
                Ok(Navigation::Moved { index }) => writeln!(out, "file {index}")?,
                Ok(Navigation::Boundary(boundary)) => writeln!(out, "{boundary}")?,
                Err(e) => writeln!(out, "{e}")?,
            }
        }
        BrowseCommand::Show(index) => report(viewer.show(index), out)?,
        BrowseCommand::Hide(index) => report(viewer.hide(index), out)?,
        BrowseCommand::Only(index) => report(viewer.select_only(index), out)?,
        BrowseCommand::Clear => viewer.clear_visible(),
        BrowseCommand::Pick(point) => match viewer.pick(point) {
            None => writeln!(out, "picking is off")?,
            Some(PickOutcome::Pending { .. }) => writeln!(out, "first point recorded")?,
            Some(PickOutcome::Completed { measurement, .. }) => {
                writeln!(out, "Z-distance: {:.3}", measurement.distance)?;
            }
        },
        BrowseCommand::Picking(enabled) => {
            viewer.set_picking(enabled);
            writeln!(out, "picking {}", if enabled { "on" } else { "off" })?;
        }
        BrowseCommand::Style => {
            let style = viewer.toggle_style();
            writeln!(out, "style {style:?}")?;
        }
        BrowseCommand::CopyId => match viewer.copy_detection_id(clipboard) {
            Ok(id) => writeln!(out, "Detection ID '{id}' copied")?,
            Err(e) => writeln!(out, "{e}")?,
        },
        BrowseCommand::CopyCoordinates => match viewer.copy_coordinates(clipboard) {
            Ok(coords) => writeln!(out, "Coordinates '{coords}' copied")?,
            Err(e) => writeln!(out, "{e}")?,
        },
        BrowseCommand::Reload => match ingestor.ingest(dir) {
            Ok(records) => {
                writeln!(out, "reloaded {} files", records.len())?;
                viewer.load_records(records);
            }
            Err(e) => writeln!(out, "{e}; keeping current session")?,
        },
        BrowseCommand::Help => writeln!(out, "{HELP}")?,
        BrowseCommand::Quit => {}
    }
    Ok(())
}

fn report<W: Write>(
    result: Result<(), lasview_core::SessionError>,
    out: &mut W,
) -> std::io::Result<()> {
    if let Err(e) = result {
        writeln!(out, "{e}")?;
    }
    Ok(())
}
