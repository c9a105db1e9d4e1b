use std::fs;
use std::path::Path;

use crate::core::error::FfxError;

/// One logical command from a script, tagged with the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line_no: usize,
    pub text: String,
}

pub fn parse_script(path: &Path) -> Result<Vec<ScriptLine>, FfxError> {
    Ok(parse_script_str(&fs::read_to_string(path)?))
}

/// Skips blanks and `#` comments; a trailing `\` continues onto the next line.
pub fn parse_script_str(source: &str) -> Vec<ScriptLine> {
    let mut commands = Vec::new();
    let mut pending: Option<ScriptLine> = None;

    for (idx, raw) in source.lines().enumerate() {
        let trimmed = raw.trim();

        if pending.is_none() && (trimmed.is_empty() || trimmed.starts_with('#')) {
            continue;
        }

        let entry = pending.get_or_insert_with(|| ScriptLine {
            line_no: idx + 1,
            text: String::new(),
        });

        match trimmed.strip_suffix('\\') {
            Some(head) => {
                entry.text.push_str(head.trim());
                entry.text.push(' ');
            }
            None => {
                entry.text.push_str(trimmed);
                if let Some(done) = pending.take() {
                    commands.push(done);
                }
            }
        }
    }

    if let Some(mut rest) = pending {
        rest.text = rest.text.trim_end().to_string();
        if !rest.text.is_empty() {
            commands.push(rest);
        }
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_and_joins_continuations() {
        let script = "\
# nightly jobs
compress -i a.mp4 -o a.small.mp4 \\
    --bitrate 800

extract-audio -i a.mp4 -o a.aac
";
        let lines = parse_script_str(script);
        assert_eq!(
            lines,
            vec![
                ScriptLine {
                    line_no: 2,
                    text: "compress -i a.mp4 -o a.small.mp4 --bitrate 800".to_string(),
                },
                ScriptLine {
                    line_no: 5,
                    text: "extract-audio -i a.mp4 -o a.aac".to_string(),
                },
            ]
        );
    }

    #[test]
    fn dangling_continuation_is_kept() {
        let lines = parse_script_str("probe -i x.mp4 \\");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "probe -i x.mp4");
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.ffc");
        std::fs::write(&path, "probe -i clip.mp4\n").unwrap();
        let lines = parse_script(&path).unwrap();
        assert_eq!(lines[0].line_no, 1);
        assert!(parse_script(&dir.path().join("missing.ffc")).is_err());
    }
}
