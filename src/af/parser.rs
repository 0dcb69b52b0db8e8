//! AF file readers/writers (C12): the ICCMA `.af` format of §6, plus an
//! Aspartix-style `arg(x). att(x,y).` reader/writer carried from the
//! teacher crate for ergonomic test fixtures.

use super::{AAFramework, Argument, ArgumentSet};
use crate::error::{CoreError, CoreResult};
use std::io::{BufRead, Write};
use std::path::Path;

/// Parses an AF in the ICCMA `.af` format from `path`.
///
/// Format (§6): `#`-prefixed lines are comments, blank lines are ignored, a
/// single `p af <N>` header declares `N` arguments `1..=N`, and every other
/// line is `<i> <j>` meaning `i` attacks `j`. An attack line naming an
/// unknown identifier is a warning, not a fatal error; a missing or
/// unparseable header is fatal.
pub fn read_iccma_af(path: impl AsRef<Path>) -> CoreResult<AAFramework> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| CoreError::InputError(format!("cannot open {}: {e}", path.display())))?;
    let reader = std::io::BufReader::new(file);
    parse_iccma_af(reader)
}

fn parse_iccma_af(reader: impl BufRead) -> CoreResult<AAFramework> {
    let mut n_args: Option<usize> = None;
    let mut attack_lines: Vec<(usize, usize)> = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CoreError::InputError(format!("read error: {e}")))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("p af") {
            let n = rest
                .trim()
                .parse::<usize>()
                .map_err(|_| CoreError::InputError(format!("malformed header line: {line}")))?;
            n_args = Some(n);
            continue;
        }
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) => match (a.parse::<usize>(), b.parse::<usize>()) {
                (Ok(i), Ok(j)) => attack_lines.push((i, j)),
                _ => log::warn!("skipping malformed attack line {}: {line}", lineno + 1),
            },
            _ => log::warn!("skipping malformed attack line {}: {line}", lineno + 1),
        }
    }

    let n_args = n_args.ok_or_else(|| {
        CoreError::InputError("missing or unparseable `p af <N>` header".to_string())
    })?;

    let labels: Vec<usize> = (1..=n_args).collect();
    let argument_set = ArgumentSet::new_with_labels(&labels);
    let mut af = AAFramework::new_with_argument_set(argument_set);
    for (i, j) in attack_lines {
        if af.argument_set().get_argument(i).is_none() || af.argument_set().get_argument(j).is_none()
        {
            log::warn!("skipping attack line referencing unknown argument: {i} {j}");
            continue;
        }
        af.new_attack(i, j)
            .expect("both labels were just checked to exist");
    }
    Ok(af)
}

/// Reads an Aspartix-style instance (`arg(1). att(1,2).`) from a byte
/// source, with arbitrary whitespace/newline layout.
pub fn read_aspartix(mut reader: impl std::io::Read) -> CoreResult<AAFramework> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| CoreError::InputError(format!("read error: {e}")))?;

    let arg_re = regex::Regex::new(r"arg\(\s*(\d+)\s*\)\s*\.").unwrap();
    let att_re = regex::Regex::new(r"att\(\s*(\d+)\s*,\s*(\d+)\s*\)\s*\.").unwrap();

    let mut labels = Vec::new();
    for cap in arg_re.captures_iter(&content) {
        labels.push(cap[1].parse::<usize>().unwrap());
    }
    let argument_set = ArgumentSet::new_with_labels(&labels);
    let mut af = AAFramework::new_with_argument_set(argument_set);
    for cap in att_re.captures_iter(&content) {
        let i = cap[1].parse::<usize>().unwrap();
        let j = cap[2].parse::<usize>().unwrap();
        if af.argument_set().get_argument(i).is_none() || af.argument_set().get_argument(j).is_none()
        {
            log::warn!("skipping att() referencing unknown argument: {i} {j}");
            continue;
        }
        af.new_attack(i, j).expect("labels checked above");
    }
    Ok(af)
}

/// Writes `af` in Aspartix syntax.
pub fn write_aspartix(af: &AAFramework, writer: &mut dyn Write) -> CoreResult<()> {
    let write_err = |e: std::io::Error| CoreError::SolverError(format!("write error: {e}"));
    for arg in af.argument_set().iter() {
        writeln!(writer, "arg({}).", arg.label()).map_err(write_err)?;
    }
    for att in af.iter_attacks() {
        let from: &Argument = af.argument_set().get_argument_by_id(att.attacker_id());
        let to: &Argument = af.argument_set().get_argument_by_id(att.attacked_id());
        writeln!(writer, "att({},{}).", from.label(), to.label()).map_err(write_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_iccma_af_basic() {
        let text = "# comment\np af 3\n1 2\n2 3\n";
        let af = parse_iccma_af(Cursor::new(text)).unwrap();
        assert_eq!(af.n_arguments(), 3);
        assert_eq!(af.n_attacks(), 2);
    }

    #[test]
    fn test_parse_iccma_af_unknown_id_is_warning_not_error() {
        let text = "p af 2\n1 2\n1 5\n";
        let af = parse_iccma_af(Cursor::new(text)).unwrap();
        assert_eq!(af.n_arguments(), 2);
        assert_eq!(af.n_attacks(), 1);
    }

    #[test]
    fn test_parse_iccma_af_missing_header_is_error() {
        let text = "1 2\n2 3\n";
        assert!(parse_iccma_af(Cursor::new(text)).is_err());
    }

    #[test]
    fn test_aspartix_round_trip() {
        let instance = "arg(1).\narg(2).\natt(1,2).\n";
        let af = read_aspartix(instance.as_bytes()).unwrap();
        assert_eq!(af.n_arguments(), 2);
        assert_eq!(af.n_attacks(), 1);
        let mut buf = Vec::new();
        write_aspartix(&af, &mut buf).unwrap();
        let written = String::from_utf8(buf).unwrap();
        assert!(written.contains("arg(1)."));
        assert!(written.contains("att(1,2)."));
    }
}
