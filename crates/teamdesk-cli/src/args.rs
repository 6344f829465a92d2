//! Command-line argument parsing.

use anyhow::{anyhow, bail, Context, Result};

use teamdesk_core::models::{EventSortColumn, TeamSortColumn};

pub const USAGE: &str = "\
Usage:
  teamdesk teams [SEARCH] [--sort name|sport|members] [--desc]
  teamdesk events [SEARCH] [--status upcoming|ongoing|completed|cancelled]
                  [--sort name|date|location|status] [--desc]
  teamdesk pool <EVENT_ID> [--class CLASS] [--search TEXT]
  teamdesk enroll <EVENT_ID> [--team TEAM_ID] [--student STUDENT_ID]...
  teamdesk init [--url API_URL] [--school SCHOOL_ID] [--token TOKEN]

Environment:
  TEAMDESK_API_URL, TEAMDESK_SCHOOL_ID, TEAMDESK_TOKEN override config.json
  TEAMDESK_LOG_DIR enables a daily log file; RUST_LOG sets the level";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Teams {
        search: String,
        sort: Option<TeamSortColumn>,
        descending: bool,
    },
    Events {
        search: String,
        status: Option<String>,
        sort: Option<EventSortColumn>,
        descending: bool,
    },
    Pool {
        event_id: i64,
        class_name: Option<String>,
        search: String,
    },
    Enroll {
        event_id: i64,
        team_id: Option<i64>,
        student_ids: Vec<i64>,
    },
    Init {
        api_url: Option<String>,
        school_id: Option<i64>,
        token: Option<String>,
    },
    Help,
}

fn parse_id(value: Option<&String>, what: &str) -> Result<i64> {
    let raw = value.ok_or_else(|| anyhow!("Missing {}", what))?;
    raw.parse::<i64>()
        .with_context(|| format!("Invalid {}: {}", what, raw))
}

fn value_for(value: Option<&String>, flag: &str) -> Result<String> {
    value
        .cloned()
        .ok_or_else(|| anyhow!("Missing value for {}", flag))
}

fn sort_column<T>(value: Option<&String>, from_name: fn(&str) -> Option<T>) -> Result<T> {
    let raw = value_for(value, "--sort")?;
    from_name(&raw).ok_or_else(|| anyhow!("Unknown sort column: {}", raw))
}

/// Parse arguments (without the program name)
pub fn parse(args: &[String]) -> Result<Command> {
    let Some(command) = args.first() else {
        return Ok(Command::Help);
    };
    let rest = &args[1..];

    match command.as_str() {
        "teams" => {
            let mut search = Vec::new();
            let mut sort = None;
            let mut descending = false;
            let mut iter = rest.iter();
            while let Some(arg) = iter.next() {
                match arg.as_str() {
                    "--sort" => sort = Some(sort_column(iter.next(), TeamSortColumn::from_name)?),
                    "--desc" => descending = true,
                    _ => search.push(arg.as_str()),
                }
            }
            Ok(Command::Teams {
                search: search.join(" "),
                sort,
                descending,
            })
        }
        "events" => {
            let mut search = Vec::new();
            let mut status = None;
            let mut sort = None;
            let mut descending = false;
            let mut iter = rest.iter();
            while let Some(arg) = iter.next() {
                match arg.as_str() {
                    "--status" => status = Some(value_for(iter.next(), "--status")?),
                    "--sort" => sort = Some(sort_column(iter.next(), EventSortColumn::from_name)?),
                    "--desc" => descending = true,
                    _ => search.push(arg.as_str()),
                }
            }
            Ok(Command::Events {
                search: search.join(" "),
                status,
                sort,
                descending,
            })
        }
        "pool" => {
            let event_id = parse_id(rest.first(), "event id")?;
            let mut class_name = None;
            let mut search = String::new();
            let mut iter = rest[1..].iter();
            while let Some(arg) = iter.next() {
                match arg.as_str() {
                    "--class" => class_name = Some(value_for(iter.next(), "--class")?),
                    "--search" => search = value_for(iter.next(), "--search")?,
                    other => bail!("Unexpected argument: {}", other),
                }
            }
            Ok(Command::Pool {
                event_id,
                class_name,
                search,
            })
        }
        "enroll" => {
            let event_id = parse_id(rest.first(), "event id")?;
            let mut team_id = None;
            let mut student_ids = Vec::new();
            let mut iter = rest[1..].iter();
            while let Some(arg) = iter.next() {
                match arg.as_str() {
                    "--team" => team_id = Some(parse_id(iter.next(), "team id")?),
                    "--student" => student_ids.push(parse_id(iter.next(), "student id")?),
                    other => bail!("Unexpected argument: {}", other),
                }
            }
            Ok(Command::Enroll {
                event_id,
                team_id,
                student_ids,
            })
        }
        "init" => {
            let mut api_url = None;
            let mut school_id = None;
            let mut token = None;
            let mut iter = rest.iter();
            while let Some(arg) = iter.next() {
                match arg.as_str() {
                    "--url" => api_url = Some(value_for(iter.next(), "--url")?),
                    "--school" => school_id = Some(parse_id(iter.next(), "school id")?),
                    "--token" => token = Some(value_for(iter.next(), "--token")?),
                    other => bail!("Unexpected argument: {}", other),
                }
            }
            Ok(Command::Init {
                api_url,
                school_id,
                token,
            })
        }
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => bail!("Unknown command: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_empty_is_help() {
        assert_eq!(parse(&[]).expect("parse"), Command::Help);
        assert_eq!(parse(&args("--help")).expect("parse"), Command::Help);
    }

    #[test]
    fn test_parse_teams_search() {
        assert_eq!(
            parse(&args("teams junior soccer")).expect("parse"),
            Command::Teams {
                search: "junior soccer".to_string(),
                sort: None,
                descending: false,
            }
        );
    }

    #[test]
    fn test_parse_teams_sort() {
        assert_eq!(
            parse(&args("teams --sort members --desc")).expect("parse"),
            Command::Teams {
                search: String::new(),
                sort: Some(TeamSortColumn::Members),
                descending: true,
            }
        );
        assert!(parse(&args("teams --sort coach")).is_err());
        assert!(parse(&args("teams --sort")).is_err());
    }

    #[test]
    fn test_parse_events_status() {
        assert_eq!(
            parse(&args("events relay --status upcoming")).expect("parse"),
            Command::Events {
                search: "relay".to_string(),
                status: Some("upcoming".to_string()),
                sort: None,
                descending: false,
            }
        );
        assert!(parse(&args("events --status")).is_err());
        assert_eq!(
            parse(&args("events --sort location")).expect("parse"),
            Command::Events {
                search: String::new(),
                status: None,
                sort: Some(EventSortColumn::Location),
                descending: false,
            }
        );
    }

    #[test]
    fn test_parse_pool() {
        assert_eq!(
            parse(&args("pool 42 --class 8B --search lin")).expect("parse"),
            Command::Pool {
                event_id: 42,
                class_name: Some("8B".to_string()),
                search: "lin".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_pool_missing_values() {
        let err = parse(&args("pool 42 --class")).expect_err("missing class");
        assert_eq!(err.to_string(), "Missing value for --class");
        let err = parse(&args("pool 42 --search")).expect_err("missing search");
        assert_eq!(err.to_string(), "Missing value for --search");
    }

    #[test]
    fn test_parse_init() {
        assert_eq!(
            parse(&args("init --url https://school.test/api --school 12")).expect("parse"),
            Command::Init {
                api_url: Some("https://school.test/api".to_string()),
                school_id: Some(12),
                token: None,
            }
        );
        assert!(parse(&args("init --school abc")).is_err());
        assert!(parse(&args("init --token")).is_err());
    }

    #[test]
    fn test_parse_enroll() {
        assert_eq!(
            parse(&args("enroll 42 --team 7 --student 3 --student 9")).expect("parse"),
            Command::Enroll {
                event_id: 42,
                team_id: Some(7),
                student_ids: vec![3, 9],
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&args("enroll")).is_err());
        assert!(parse(&args("enroll abc")).is_err());
        assert!(parse(&args("enroll 42 --team x")).is_err());
        assert!(parse(&args("enroll 42 --bogus")).is_err());
        assert!(parse(&args("frobnicate")).is_err());
    }
}
