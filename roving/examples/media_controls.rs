//! Two media-control radio groups driven from the terminal.
//!
//! Tab/Shift+Tab moves between groups, arrows move within the focused group,
//! 1-4 selects directly, q quits. Debug logs go to `media_controls.log`.

use std::fs::File;
use std::io::{self, Write};

use crossterm::event::{self, Event};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use roving::{Key, KeyMap, RovingGroup, SelectionError};
use simplelog::{Config, LevelFilter, WriteLogger};

const CONTROLS: [&str; 4] = ["back", "play", "pause", "forward"];

fn main() -> io::Result<()> {
    // Set up file logging
    let log_file = File::create("media_controls.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let groups = [
        RovingGroup::with_default(CONTROLS, "pause").map_err(to_io)?,
        RovingGroup::with_default(CONTROLS, "pause")
            .map_err(to_io)?
            .with_keymap(KeyMap::horizontal().vim_keys(true)),
    ];
    for group in &groups {
        group.subscribe(|change| log::info!("now playing: {}", change.current));
    }
    groups[0].focus();

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut stdout, &groups);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(out: &mut impl Write, groups: &[RovingGroup<&'static str>]) -> io::Result<()> {
    let mut active = 0;
    let mut focused: Option<&str> = None;
    let mut first_frame = true;

    loop {
        if first_frame || groups.iter().any(RovingGroup::is_dirty) {
            draw(out, groups, active, focused)?;
            first_frame = false;
        }

        // Focus moves only after the new selection has been rendered.
        if let Some(item) = groups[active].take_focus_request() {
            log::debug!("focus -> group {} item {}", active, item);
            focused = Some(item);
            draw(out, groups, active, focused)?;
        }

        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        let Some((key, modifiers)) = roving::translate(&key_event) else {
            continue;
        };

        match key {
            Key::Char('q') | Key::Escape => return Ok(()),
            Key::Tab | Key::BackTab => {
                active = (active + 1) % groups.len();
                groups[active].focus();
            }
            Key::Char(c @ '1'..='4') if modifiers.none() => {
                let index = c as usize - '1' as usize;
                groups[active].select(&CONTROLS[index]).map_err(to_io)?;
            }
            _ => {
                let result = groups[active].on_key(key, modifiers).map_err(to_io)?;
                if !result.is_handled() {
                    log::trace!("unhandled key {:?}", key);
                }
            }
        }
    }
}

fn draw(
    out: &mut impl Write,
    groups: &[RovingGroup<&'static str>],
    active: usize,
    focused: Option<&str>,
) -> io::Result<()> {
    queue!(
        out,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        Print("Media controls (Tab switches group, arrows move, 1-4 select, q quits)")
    )?;

    for (row, group) in groups.iter().enumerate() {
        queue!(out, cursor::MoveTo(2, 2 + row as u16 * 2))?;
        for item in group.items() {
            let indicator = if group.is_current(&item) { '◉' } else { '◯' };
            let has_focus = row == active && focused == Some(item);
            if has_focus {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            }
            queue!(
                out,
                Print(format!("{indicator} {item} [tab {}]", group.tab_index(&item))),
                SetAttribute(Attribute::Reset),
                Print("  ")
            )?;
        }
        group.clear_dirty();
    }
    out.flush()
}

fn to_io(err: SelectionError) -> io::Error {
    io::Error::other(err)
}
