// src/pointer.rs - Pointer events and recorded event scripts

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SelectorError};
use crate::geometry::{ImageLayout, Point};

/// Phase of a touch / mouse interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEventKind {
    Press,
    Move,
    Release,
}

/// A pointer event in the image's local coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    #[serde(rename = "type")]
    pub kind: PointerEventKind,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl PointerEvent {
    pub fn press(x: f64, y: f64) -> Self {
        Self { kind: PointerEventKind::Press, x, y }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self { kind: PointerEventKind::Move, x, y }
    }

    pub fn release(x: f64, y: f64) -> Self {
        Self { kind: PointerEventKind::Release, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One step of a recorded session: either a new image layout or a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Load { load: ImageLayout },
    Pointer(PointerEvent),
}

/// Parse a line-oriented event script.
///
/// Each non-empty line is `press X Y`, `move X Y`, `release [X Y]` or
/// `load WIDTH HEIGHT`. Everything after `#` is ignored.
pub fn parse_event_script(text: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().unwrap_or("").to_ascii_lowercase();
        let numbers = tokens
            .map(|token| {
                token
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| SelectorError::InvalidEvent {
                        line: line_number,
                        reason: format!("'{}' is not a finite number", token),
                    })
            })
            .collect::<Result<Vec<f64>>>()?;

        let step = match (keyword.as_str(), numbers.as_slice()) {
            ("press", [x, y]) => ScriptStep::Pointer(PointerEvent::press(*x, *y)),
            ("move", [x, y]) => ScriptStep::Pointer(PointerEvent::moved(*x, *y)),
            ("release", []) => ScriptStep::Pointer(PointerEvent::release(0.0, 0.0)),
            ("release", [x, y]) => ScriptStep::Pointer(PointerEvent::release(*x, *y)),
            ("load", [width, height]) => {
                let load = ImageLayout::checked(*width, *height).map_err(|reason| {
                    SelectorError::InvalidEvent { line: line_number, reason }
                })?;
                ScriptStep::Load { load }
            }
            ("press" | "move" | "release" | "load", _) => {
                return Err(SelectorError::InvalidEvent {
                    line: line_number,
                    reason: format!("wrong number of arguments for '{}'", keyword),
                });
            }
            _ => {
                return Err(SelectorError::InvalidEvent {
                    line: line_number,
                    reason: format!("unknown event '{}'", keyword),
                });
            }
        };

        steps.push(step);
    }

    Ok(steps)
}

/// Load an event script from disk (`.json` arrays or the line format)
pub fn load_event_file<P: AsRef<Path>>(path: P) -> Result<Vec<ScriptStep>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        Ok(serde_json::from_str(&content)?)
    } else {
        parse_event_script(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_line_format() {
        let script = "\
            # scenario one\n\
            load 200 200\n\
            press 50 50\n\
            move 100 100   # drag\n\
            \n\
            release\n";

        let steps = parse_event_script(script).unwrap();

        assert_eq!(
            steps,
            vec![
                ScriptStep::Load { load: ImageLayout::new(200.0, 200.0) },
                ScriptStep::Pointer(PointerEvent::press(50.0, 50.0)),
                ScriptStep::Pointer(PointerEvent::moved(100.0, 100.0)),
                ScriptStep::Pointer(PointerEvent::release(0.0, 0.0)),
            ]
        );
    }

    #[test]
    fn reports_the_offending_line() {
        let err = parse_event_script("press 1 2\nmove 3\n").unwrap_err();
        match err {
            SelectorError::InvalidEvent { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {}", other),
        }

        let err = parse_event_script("tap 1 2").unwrap_err();
        assert!(err.to_string().contains("unknown event 'tap'"));

        let err = parse_event_script("press one 2").unwrap_err();
        assert!(err.to_string().contains("'one' is not a finite number"));
    }

    #[test]
    fn rejects_empty_layouts() {
        assert!(parse_event_script("load 0 200").is_err());
        assert!(parse_event_script("load -100 -100").is_err());
    }

    #[test]
    fn rejects_non_finite_numbers() {
        for script in [
            "load NaN NaN\npress 50 50\nmove 5000 5000\nrelease",
            "load inf inf\npress 50 50\nmove 1e300 1e300\nrelease",
            "load 200 200\npress NaN 10",
            "load 200 200\npress 10 10\nmove 20 -inf",
        ] {
            match parse_event_script(script) {
                Err(SelectorError::InvalidEvent { reason, .. }) => {
                    assert!(reason.contains("not a finite number"), "{}", reason)
                }
                other => panic!("{:?} accepted: {:?}", script, other),
            }
        }
    }

    #[test]
    fn json_layouts_go_through_the_same_check() {
        let negative = r#"[{"load": {"width": -100, "height": -100}}, {"type": "press", "x": 5, "y": 5}]"#;
        assert!(serde_json::from_str::<Vec<ScriptStep>>(negative).is_err());

        let zero = r#"[{"load": {"width": 0, "height": 200}}]"#;
        assert!(serde_json::from_str::<Vec<ScriptStep>>(zero).is_err());
    }

    #[test]
    fn json_steps_use_type_tags() {
        let json = r#"[
            {"load": {"width": 200, "height": 200}},
            {"type": "press", "x": 50, "y": 50},
            {"type": "move", "x": 100, "y": 100},
            {"type": "release"}
        ]"#;

        let steps: Vec<ScriptStep> = serde_json::from_str(json).unwrap();

        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0], ScriptStep::Load { load: ImageLayout::new(200.0, 200.0) });
        assert_eq!(steps[3], ScriptStep::Pointer(PointerEvent::release(0.0, 0.0)));
    }
}
