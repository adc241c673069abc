//! Terminfo file discovery and binary parsing.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::caps::{BOOLEAN_CAPS, NUMBER_CAPS, STRING_CAPS};
use crate::capability::Capability;
use crate::database::Terminfo;
use crate::error::Error;

const LEGACY_MAGIC: i16 = 0o432;

/// Resolve a terminal name (explicit, else `$TERM`, else `fallback`) and
/// load its compiled terminfo description.
///
/// # Errors
///
/// [`Error::Unset`] if no name was given and `TERM` is unset with no
/// fallback; [`Error::NotFound`] if no terminfo file exists for the
/// resolved name; parse errors if the file is malformed.
pub fn load_terminfo(name: Option<&str>, fallback: Option<&str>) -> Result<Terminfo, Error> {
    let owned;
    let resolved: &str = match name {
        Some(n) => n,
        None => match env::var("TERM") {
            Ok(t) if !t.is_empty() => {
                owned = t;
                &owned
            }
            _ => match fallback {
                Some(f) if !f.is_empty() => f,
                _ => return Err(Error::Unset),
            },
        },
    };

    let path = find_terminfo_path(resolved).ok_or_else(|| Error::NotFound(resolved.to_owned()))?;
    debug!(terminal = resolved, path = %path.display(), "loading terminfo");
    let data = fs::read(&path)?;
    parse_compiled(&data)
}

fn search_dirs() -> Vec<PathBuf> {
    if let Ok(dir) = env::var("TERMINFO") {
        return vec![PathBuf::from(dir)];
    }

    let mut dirs = Vec::new();

    if let Ok(list) = env::var("TERMINFO_DIRS") {
        for entry in list.split(':') {
            dirs.push(if entry.is_empty() {
                PathBuf::from("/usr/share/terminfo")
            } else {
                PathBuf::from(entry)
            });
        }
    }

    if let Some(home) = env::var_os("HOME") {
        dirs.push(Path::new(&home).join(".terminfo"));
    }
    dirs.push(PathBuf::from("/etc/terminfo"));
    dirs.push(PathBuf::from("/usr/local/ncurses/share/terminfo"));
    dirs.push(PathBuf::from("/lib/terminfo"));
    dirs.push(PathBuf::from("/usr/share/terminfo"));

    let mut seen = std::collections::HashSet::new();
    dirs.retain(|d| seen.insert(d.clone()));
    dirs
}

fn find_terminfo_path(name: &str) -> Option<PathBuf> {
    let first = name.chars().next()?;
    for dir in search_dirs() {
        let candidate = dir.join(first.to_string()).join(name);
        if candidate.exists() {
            return Some(candidate);
        }
    }
    None
}

/// Parse an in-memory compiled terminfo file (legacy 16-bit format).
///
/// # Errors
///
/// [`Error::BadMagic`], [`Error::Truncated`] or [`Error::OffsetOutOfRange`]
/// if the bytes are not a well-formed legacy terminfo blob.
pub fn parse_compiled(data: &[u8]) -> Result<Terminfo, Error> {
    let header = read_header(data)?;

    let mut pos = 12usize;
    let names_end = pos
        .checked_add(header.size_names)
        .ok_or(Error::Truncated("names"))?;
    let names_bytes = data.get(pos..names_end).ok_or(Error::Truncated("names"))?;
    pos = names_end;

    let names_str = String::from_utf8_lossy(names_bytes);
    let trimmed = names_str.trim_end_matches('\0');
    let mut names = trimmed.split('|').map(str::to_owned).collect::<Vec<_>>();
    if names.is_empty() {
        names.push(String::new());
    }
    let name = names.remove(0);

    let bools_end = pos
        .checked_add(header.size_booleans)
        .ok_or(Error::Truncated("booleans"))?;
    let bool_bytes = data.get(pos..bools_end).ok_or(Error::Truncated("booleans"))?;
    let booleans = bool_bytes
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            let def = BOOLEAN_CAPS.get(i).unwrap_or(&UNNAMED_BOOL);
            Capability::boolean(def, b != 0)
        })
        .collect::<Vec<_>>();
    pos = bools_end;

    // numbers section must start on an even byte
    if pos % 2 != 0 {
        pos += 1;
    }

    let numbers_end = pos
        .checked_add(2 * header.num_numbers)
        .ok_or(Error::Truncated("numbers"))?;
    let number_bytes = data
        .get(pos..numbers_end)
        .ok_or(Error::Truncated("numbers"))?;
    let numbers = number_bytes
        .chunks_exact(2)
        .enumerate()
        .map(|(i, chunk)| {
            let v = i16::from_le_bytes([chunk[0], chunk[1]]);
            let def = NUMBER_CAPS.get(i).unwrap_or(&UNNAMED_NUM);
            Capability::number(def, v)
        })
        .collect::<Vec<_>>();
    pos = numbers_end;

    let offsets_end = pos
        .checked_add(2 * header.num_offsets)
        .ok_or(Error::Truncated("string offsets"))?;
    let offset_bytes = data
        .get(pos..offsets_end)
        .ok_or(Error::Truncated("string offsets"))?;
    let offsets = offset_bytes
        .chunks_exact(2)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect::<Vec<_>>();
    pos = offsets_end;

    let table_end = pos
        .checked_add(header.size_strings)
        .ok_or(Error::Truncated("string table"))?;
    let table = data.get(pos..table_end).ok_or(Error::Truncated("string table"))?;

    let mut strings = Vec::with_capacity(offsets.len());
    for (i, &offset) in offsets.iter().enumerate() {
        let def = STRING_CAPS.get(i).unwrap_or(&UNNAMED_STR);
        let value = if offset < 0 {
            Vec::new()
        } else {
            let start = offset as usize;
            if start >= table.len() {
                return Err(Error::OffsetOutOfRange {
                    offset,
                    table_len: table.len(),
                });
            }
            let end = table[start..]
                .iter()
                .position(|&b| b == 0)
                .map_or(table.len(), |p| start + p);
            // iso-8859-1: every byte round-trips, so just copy it verbatim
            table[start..end].to_vec()
        };
        strings.push(Capability::string(def, value));
    }

    Ok(Terminfo::new(name, names, booleans, numbers, strings))
}

const UNNAMED_BOOL: crate::caps::CapDef = crate::caps::CapDef {
    variable: "",
    capname: "",
    tcap_code: "",
    description: "",
};
const UNNAMED_NUM: crate::caps::CapDef = UNNAMED_BOOL;
const UNNAMED_STR: crate::caps::CapDef = UNNAMED_BOOL;

struct Header {
    size_names: usize,
    size_booleans: usize,
    num_numbers: usize,
    num_offsets: usize,
    size_strings: usize,
}

fn read_header(data: &[u8]) -> Result<Header, Error> {
    let raw = data.get(..12).ok_or(Error::Truncated("header"))?;
    let read = |i: usize| i16::from_le_bytes([raw[2 * i], raw[2 * i + 1]]);

    let magic = read(0);
    if magic != LEGACY_MAGIC as i16 {
        return Err(Error::BadMagic(magic));
    }

    Ok(Header {
        size_names: read(1).max(0) as usize,
        size_booleans: read(2).max(0) as usize,
        num_numbers: read(3).max(0) as usize,
        num_offsets: read(4).max(0) as usize,
        size_strings: read(5).max(0) as usize,
    })
}
