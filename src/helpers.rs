use crate::{
    config::Config,
    error::{Error, Result},
    rain::CellSize,
};

use std::{path::PathBuf, process, time::Duration};

pub fn print_usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage: termfolio [-fps N] [-reveal-delay MS] [-reset-chance P] [-cell WxH] [-no-rain] [-log PATH]

Options:
  -fps N            Background repaint rate, 1 to 120 (default 30)
  -reveal-delay MS  Delay before each shell session line appears (default 1000)
  -reset-chance P   Chance a column past the bottom restarts each tick, 0 to 1 (default 0.01)
  -cell WxH         Character cell of the background in terminal cells (default 2x1)
  -no-rain          Disable the background
  -log PATH         Write logs to PATH, filtered by TERMFOLIO_LOG (default info)

Keys: arrows/j/k/PgUp/PgDn scroll, 1-4 or Tab jump to a section, : goto, q/Esc quit."
    );

    process::exit(code);
}

pub fn parse_args<I>(args: I) -> Result<Config>
where
    I: IntoIterator<Item = String>,
{
    let mut config = Config::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(Error::Help),

            "-f" | "-fps" | "--fps" => {
                let value = next_value(&mut args, &arg)?;
                let fps: u32 = parse_number(&arg, &value)?;

                if !(1..=120).contains(&fps) {
                    return Err(invalid(&arg, &value, "expected 1 to 120"));
                }

                config.fps = fps;
            }

            "-r" | "-reveal-delay" | "--reveal-delay" => {
                let value = next_value(&mut args, &arg)?;
                config.reveal_delay = Duration::from_millis(parse_number(&arg, &value)?);
            }

            "-p" | "-reset-chance" | "--reset-chance" => {
                let value = next_value(&mut args, &arg)?;
                let chance: f64 = parse_number(&arg, &value)?;

                if !(0.0..=1.0).contains(&chance) {
                    return Err(invalid(&arg, &value, "expected a probability between 0 and 1"));
                }

                config.reset_chance = chance;
            }

            "-c" | "-cell" | "--cell" => {
                let value = next_value(&mut args, &arg)?;
                config.cell = parse_cell(&arg, &value)?;
            }

            "-n" | "-no-rain" | "--no-rain" => config.rain = false,

            "-l" | "-log" | "--log" => {
                let value = next_value(&mut args, &arg)?;
                config.log_path = Some(PathBuf::from(value));
            }

            other => return Err(Error::UnknownArgument(other.to_string())),
        }
    }

    Ok(config)
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| Error::MissingValue(flag.to_string()))
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| invalid(flag, value, "not a number"))
}

fn parse_cell(flag: &str, value: &str) -> Result<CellSize> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| invalid(flag, value, "expected WIDTHxHEIGHT"))?;

    let width: u16 = parse_number(flag, w)?;
    let height: u16 = parse_number(flag, h)?;

    if width == 0 || height == 0 {
        return Err(invalid(flag, value, "cell sides must be at least 1"));
    }

    Ok(CellSize { width, height })
}

fn invalid(flag: &str, value: &str, reason: &'static str) -> Error {
    Error::InvalidArgument {
        flag: flag.to_string(),
        value: value.to_string(),
        reason,
    }
}

/// Greedy word wrap. Words longer than `width` get a line of their own and
/// are left for the renderer to clip.
pub fn layout_text(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;

    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut col = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if col > 0 && col + 1 + word_len > width {
            lines.push(std::mem::take(&mut line));
            col = 0;
        }

        if col > 0 {
            line.push(' ');
            col += 1;
        }

        line.push_str(word);
        col += word_len;
    }

    lines.push(line);
    lines
}

/// Packs labels into rows no wider than `width`, separated by `gap` spaces.
pub fn pack_labels<'a>(labels: &[&'a str], width: u16, gap: usize) -> Vec<Vec<&'a str>> {
    let width = width.max(1) as usize;

    let mut rows: Vec<Vec<&'a str>> = Vec::new();
    let mut used = 0usize;

    for &label in labels {
        let len = label.chars().count();

        match rows.last_mut() {
            Some(row) if used + gap + len <= width => {
                row.push(label);
                used += gap + len;
            }
            _ => {
                rows.push(vec![label]);
                used = len;
            }
        }
    }

    rows
}

/// Right-pads `text` with spaces to `width` characters.
pub fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let mut out = String::from(text);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    out
}
