//! Line commands understood by the drawing console

use anyhow::{anyhow, bail, Context, Result};
use lahan_core::models::{EditingMode, RecordKind};
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  click <lat> <lng>          click on the map
  pick <index>               click an existing vertex
  mode <parcel|warehouse|delete>
  name <text>                set the name used by the next save
  save                       save the boundary or warehouse
  reset                      discard everything in progress
  status                     show the session state
  render                     print the renderable frame as JSON
  list                       list saved records
  delete <parcel|warehouse> <id>
  confirm | cancel           answer a pending delete
  help
  quit";

/// One console line
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Click { lat: f64, lng: f64 },
    Pick(usize),
    Mode(EditingMode),
    Name(String),
    Save,
    Reset,
    Status,
    Render,
    List,
    Delete { kind: RecordKind, id: String },
    Confirm,
    Cancel,
    Help,
    Quit,
}

fn parse_coordinate(value: Option<&str>, axis: &str) -> Result<f64> {
    let raw = value.ok_or_else(|| anyhow!("Missing {}", axis))?;
    raw.parse::<f64>().with_context(|| format!("Invalid {}: {}", axis, raw))
}

impl FromStr for ConsoleCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();

        let command = match verb.to_lowercase().as_str() {
            "click" | "c" => {
                // Accept "lat lng" or "lat,lng"
                let normalized = rest.replace(',', " ");
                let mut parts = normalized.split_whitespace();
                let lat = parse_coordinate(parts.next(), "latitude")?;
                let lng = parse_coordinate(parts.next(), "longitude")?;
                ConsoleCommand::Click { lat, lng }
            }
            "pick" => {
                let raw = args.next().ok_or_else(|| anyhow!("Missing vertex index"))?;
                ConsoleCommand::Pick(raw.parse().with_context(|| format!("Invalid index: {}", raw))?)
            }
            "mode" | "m" => {
                let raw = args.next().ok_or_else(|| anyhow!("Missing mode"))?;
                ConsoleCommand::Mode(raw.parse()?)
            }
            "name" => {
                if rest.is_empty() {
                    bail!("Missing name");
                }
                ConsoleCommand::Name(rest.to_string())
            }
            "save" | "s" => ConsoleCommand::Save,
            "reset" => ConsoleCommand::Reset,
            "status" => ConsoleCommand::Status,
            "render" => ConsoleCommand::Render,
            "list" | "ls" => ConsoleCommand::List,
            "delete" | "rm" => {
                let kind = args.next().ok_or_else(|| anyhow!("Missing record kind"))?.parse()?;
                let id = args.next().ok_or_else(|| anyhow!("Missing record id"))?.to_string();
                ConsoleCommand::Delete { kind, id }
            }
            "confirm" | "yes" | "y" => ConsoleCommand::Confirm,
            "cancel" | "no" | "n" => ConsoleCommand::Cancel,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" | "q" => ConsoleCommand::Quit,
            other => bail!("Unknown command: {}. Type 'help' for a list", other),
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_click_forms() {
        let expected = ConsoleCommand::Click { lat: -5.3, lng: 105.4 };
        assert_eq!("click -5.3 105.4".parse::<ConsoleCommand>().unwrap(), expected);
        assert_eq!("c -5.3, 105.4".parse::<ConsoleCommand>().unwrap(), expected);
        assert!("click -5.3".parse::<ConsoleCommand>().is_err());
        assert!("click north east".parse::<ConsoleCommand>().is_err());
    }

    #[test]
    fn test_parse_name_keeps_spaces() {
        assert_eq!(
            "name  Kebun Sawit Utara ".parse::<ConsoleCommand>().unwrap(),
            ConsoleCommand::Name("Kebun Sawit Utara".to_string())
        );
        assert!("name".parse::<ConsoleCommand>().is_err());
    }

    #[test]
    fn test_parse_mode_and_delete() {
        assert_eq!(
            "mode gudang".parse::<ConsoleCommand>().unwrap(),
            ConsoleCommand::Mode(EditingMode::PlaceWarehouse)
        );
        assert_eq!(
            "delete lahan 12".parse::<ConsoleCommand>().unwrap(),
            ConsoleCommand::Delete { kind: RecordKind::Parcel, id: "12".to_string() }
        );
        assert!("delete parcel".parse::<ConsoleCommand>().is_err());
        assert!("fly away".parse::<ConsoleCommand>().is_err());
    }
}
