//! Parsing of `ls -l` output into file entries.
//!
//! Android devices ship several `ls` implementations (toolbox, toybox,
//! busybox) that disagree on columns and timestamp format. The parser locates
//! the timestamp columns first and reads everything before them by count;
//! everything after them is the path, kept verbatim.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// File type, from the first character of the mode column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `-`
    File,
    /// `d`
    Directory,
    /// `l`
    Symlink,
    /// `c`
    CharDevice,
    /// `b`
    BlockDevice,
    /// `p`
    Fifo,
    /// `s`
    Socket,
}

impl FileKind {
    fn from_mode_char(c: char) -> Option<Self> {
        Some(match c {
            '-' => Self::File,
            'd' => Self::Directory,
            'l' => Self::Symlink,
            'c' => Self::CharDevice,
            'b' => Self::BlockDevice,
            'p' => Self::Fifo,
            's' => Self::Socket,
            _ => return None,
        })
    }

    /// The `S_IFMT` bits for this kind.
    #[must_use]
    pub fn type_bits(self) -> u32 {
        match self {
            Self::File => 0o100_000,
            Self::Directory => 0o040_000,
            Self::Symlink => 0o120_000,
            Self::CharDevice => 0o020_000,
            Self::BlockDevice => 0o060_000,
            Self::Fifo => 0o010_000,
            Self::Socket => 0o140_000,
        }
    }

    /// Single-character tag as printed by `ls`.
    #[must_use]
    pub fn tag(self) -> char {
        match self {
            Self::File => '-',
            Self::Directory => 'd',
            Self::Symlink => 'l',
            Self::CharDevice => 'c',
            Self::BlockDevice => 'b',
            Self::Fifo => 'p',
            Self::Socket => 's',
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "regular file",
            Self::Directory => "directory",
            Self::Symlink => "symbolic link",
            Self::CharDevice => "character device",
            Self::BlockDevice => "block device",
            Self::Fifo => "fifo",
            Self::Socket => "socket",
        })
    }
}

/// One parsed line of a long listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File type.
    pub kind: FileKind,
    /// The nine `rwx` characters following the type character, verbatim.
    pub permissions: String,
    /// Hard link count, when the listing has that column.
    pub links: Option<u64>,
    /// Owner name or uid.
    pub owner: String,
    /// Group name or gid.
    pub group: String,
    /// Size in bytes; zero for device nodes and sizeless directories.
    pub size: u64,
    /// Modification time, in the device's local time.
    pub modified: NaiveDateTime,
    /// Path as printed by `ls`.
    pub path: String,
    /// Target of a symlink.
    pub link_target: Option<String>,
}

impl FileEntry {
    /// The final component of `path`.
    #[must_use]
    pub fn name(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    /// Full `st_mode`: type bits plus permission bits.
    #[must_use]
    pub fn mode(&self) -> u32 {
        self.kind.type_bits() | permission_bits(&self.permissions)
    }
}

/// Converts an `rwxr-x--x` style string to numeric permission bits,
/// including setuid, setgid and sticky.
#[must_use]
pub fn permission_bits(permissions: &str) -> u32 {
    let mut bits = 0;
    for (i, c) in permissions.chars().take(9).enumerate() {
        let bit = 0o400 >> i;
        match (i, c) {
            (_, 'r' | 'w' | 'x') => bits |= bit,
            (2, 's') => bits |= bit | 0o4000,
            (2, 'S') => bits |= 0o4000,
            (5, 's') => bits |= bit | 0o2000,
            (5, 'S') => bits |= 0o2000,
            (8, 't') => bits |= bit | 0o1000,
            (8, 'T') => bits |= 0o1000,
            _ => {}
        }
    }
    bits
}

/// Parses every recognizable entry in `text`, skipping anything else
/// (`total` lines, diagnostics, blank lines).
#[must_use]
pub fn parse_listing(text: &str) -> Vec<FileEntry> {
    text.split('\n')
        .filter_map(|line| parse_line(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

/// Parses a single listing line.
#[must_use]
pub fn parse_line(line: &str) -> Option<FileEntry> {
    let tokens = tokenize(line);
    let (_, mode) = *tokens.first()?;
    let kind = FileKind::from_mode_char(mode.chars().next()?)?;
    let permissions = mode.get(1..10)?;
    if !permissions.chars().all(|c| matches!(c, 'r' | 'w' | 'x' | 's' | 'S' | 't' | 'T' | '-')) {
        return None;
    }

    let (date_idx, modified) = (2..tokens.len().saturating_sub(1))
        .find_map(|i| parse_timestamp(tokens[i].1, tokens[i + 1].1).map(|ts| (i, ts)))?;

    let (time_start, time) = tokens[date_idx + 1];
    let rest = &line[time_start + time.len()..];
    let rest = rest.strip_prefix([' ', '\t']).unwrap_or(rest);
    if rest.is_empty() {
        return None;
    }

    let mut fields: Vec<&str> = tokens[1..date_idx].iter().map(|&(_, t)| t).collect();
    let is_device = matches!(kind, FileKind::CharDevice | FileKind::BlockDevice);
    if let Some(pos) = fields.iter().position(|t| t.contains(',')) {
        if !is_device {
            return None;
        }
        fields.truncate(pos);
    }

    let (links, owner, group, size) = match (is_device, fields.as_slice()) {
        (false, [links, owner, group, size]) => {
            (Some(links.parse::<u64>().ok()?), owner, group, size.parse::<u64>().ok()?)
        }
        (false, [owner, group, size]) => (None, owner, group, size.parse::<u64>().ok()?),
        (_, [owner, group]) => (None, owner, group, 0),
        (true, [links, owner, group]) => (Some(links.parse::<u64>().ok()?), owner, group, 0),
        _ => return None,
    };

    let (path, link_target) = match (kind, rest.split_once(" -> ")) {
        (FileKind::Symlink, Some((path, target))) => (path, Some(target.to_string())),
        _ => (rest, None),
    };

    Some(FileEntry {
        kind,
        permissions: permissions.to_string(),
        links,
        owner: (*owner).to_string(),
        group: (*group).to_string(),
        size,
        modified,
        path: path.to_string(),
        link_target,
    })
}

fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
        .ok()?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .ok()?;
    Some(date.and_time(time))
}

/// Splits on spaces and tabs, keeping each token's byte offset.
fn tokenize(line: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices() {
        if c == ' ' || c == '\t' {
            if let Some(s) = start.take() {
                tokens.push((s, &line[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push((s, &line[s..]));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn parses_numeric_busybox_line() {
        let entry = parse_line(
            "-rw-rw----  1 0  1015  0 01/01/2010 22:11:01 /storage/emulated/0/Grüß Gott",
        )
        .unwrap();
        assert_eq!(entry.kind, FileKind::File);
        assert_eq!(entry.permissions, "rw-rw----");
        assert_eq!(entry.links, Some(1));
        assert_eq!(entry.owner, "0");
        assert_eq!(entry.group, "1015");
        assert_eq!(entry.size, 0);
        assert_eq!(entry.modified, at(2010, 1, 1, 22, 11, 1));
        assert_eq!(entry.path, "/storage/emulated/0/Grüß Gott");
        assert_eq!(entry.name(), "Grüß Gott");
        assert_eq!(entry.mode(), 0o100_660);
    }

    #[test]
    fn parses_toybox_directory() {
        let entry =
            parse_line("drwxrwx--x 4 root sdcard_rw 4096 2021-03-04 09:15 Android").unwrap();
        assert_eq!(entry.kind, FileKind::Directory);
        assert_eq!(entry.size, 4096);
        assert_eq!(entry.modified, at(2021, 3, 4, 9, 15, 0));
        assert_eq!(entry.path, "Android");
        assert_eq!(entry.mode(), 0o040_771);
    }

    #[test]
    fn parses_toolbox_lines_without_link_count() {
        let dir =
            parse_line("drwxrwx--x root     sdcard_rw          2010-01-01 22:11 DCIM").unwrap();
        assert_eq!(dir.links, None);
        assert_eq!(dir.owner, "root");
        assert_eq!(dir.size, 0);

        let file =
            parse_line("-rw-rw---- root     sdcard_rw       12 2010-01-01 22:11 a.txt").unwrap();
        assert_eq!(file.links, None);
        assert_eq!(file.size, 12);
    }

    #[test]
    fn parses_symlink_target() {
        let entry =
            parse_line("lrwxrwxrwx 1 root root 21 2010-01-01 22:11 sdcard -> /storage/self/primary")
                .unwrap();
        assert_eq!(entry.kind, FileKind::Symlink);
        assert_eq!(entry.path, "sdcard");
        assert_eq!(entry.link_target.as_deref(), Some("/storage/self/primary"));
    }

    #[test]
    fn parses_device_numbers_as_zero_size() {
        let toybox = parse_line("crw-rw-rw- 1 root root 1,   3 2010-01-01 22:11 null").unwrap();
        assert_eq!(toybox.kind, FileKind::CharDevice);
        assert_eq!(toybox.links, Some(1));
        assert_eq!(toybox.size, 0);
        assert_eq!(toybox.path, "null");

        let toolbox =
            parse_line("brw------- root     root     179,   0 2010-01-01 22:11 mmcblk0").unwrap();
        assert_eq!(toolbox.kind, FileKind::BlockDevice);
        assert_eq!(toolbox.owner, "root");
    }

    #[test]
    fn keeps_spaces_and_fallback_characters_in_names() {
        let entry =
            parse_line("-rw-rw---- 1 0 1015 5 01/01/2010 22:11:01 /sdcard/a  b \u{e2}").unwrap();
        assert_eq!(entry.path, "/sdcard/a  b \u{e2}");
    }

    #[test]
    fn rejects_non_entries() {
        assert_eq!(parse_line("total 24"), None);
        assert_eq!(parse_line("ls: /nope: No such file or directory"), None);
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("-rw-rw---- 1 0 1015 0 01/01/2010 22:11:01"), None);
        assert_eq!(parse_line("-rw-rw---- 1 0 1015 1, 2 01/01/2010 22:11:01 x"), None);
    }

    #[test]
    fn parse_listing_skips_noise_and_crlf() {
        let text = "total 8\r\n\
                    drwxrwx--x 2 root root 4096 2010-01-01 22:11 .\r\n\
                    -rw-rw---- 1 root root 3 2010-01-01 22:11 a b\r\n";
        let entries = parse_listing(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].path, "a b");
    }

    #[test]
    fn permission_bits_handle_special_modes() {
        assert_eq!(permission_bits("rwsr-sr-t"), 0o7755);
        assert_eq!(permission_bits("rwSr-Sr-T"), 0o7644);
        assert_eq!(permission_bits("---------"), 0);
    }
}
