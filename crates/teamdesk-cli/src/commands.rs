//! Command implementations. Each one talks to the API through `ApiClient`
//! and prints a plain-text table to stdout.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use teamdesk_core::lists::{EventQuery, TeamQuery};
use teamdesk_core::models::{EventDetail, EventSortColumn, EventStatus, Student, TeamSortColumn};
use teamdesk_core::roster::available_classes;
use teamdesk_core::utils::truncate_string;
use teamdesk_core::{ApiClient, Config, ParticipantReconciler};

/// Column width for names in list output
const NAME_WIDTH: usize = 28;

pub async fn list_teams(
    api: &ApiClient,
    school_id: i64,
    search: &str,
    sort: Option<TeamSortColumn>,
    descending: bool,
) -> Result<()> {
    let teams = api
        .fetch_school_teams(school_id)
        .await
        .context("Failed to load teams")?;

    let query = TeamQuery {
        search: search.to_string(),
        sort_column: sort.unwrap_or_default(),
        ascending: !descending,
    };
    let rows = query.apply(&teams);

    println!("{:>6}  {:<NAME_WIDTH$}  {:<14}  {:<18}  {:>7}", "ID", "Team", "Sport", "Coach", "Members");
    for team in &rows {
        println!(
            "{:>6}  {:<NAME_WIDTH$}  {:<14}  {:<18}  {:>7}",
            team.id,
            truncate_string(&team.name, NAME_WIDTH),
            truncate_string(team.sport_display(), 14),
            truncate_string(team.coach_display(), 18),
            team.member_count,
        );
    }
    println!("{} of {} teams", rows.len(), teams.len());
    Ok(())
}

pub async fn list_events(
    api: &ApiClient,
    school_id: i64,
    search: &str,
    status: Option<&str>,
    sort: Option<EventSortColumn>,
    descending: bool,
) -> Result<()> {
    let events = api
        .fetch_school_events(school_id)
        .await
        .context("Failed to load events")?;

    let status = status.map(|s| EventStatus::parse(Some(s)));
    if status == Some(EventStatus::Unknown) {
        warn!("Unrecognized status filter, showing events with no known status");
    }
    let query = EventQuery {
        search: search.to_string(),
        status,
        sort_column: sort.unwrap_or_default(),
        ascending: !descending,
    };
    let rows = query.apply(&events);

    println!("{:>6}  {:<NAME_WIDTH$}  {:<13}  {:<16}  {:<10}  {:>6}", "ID", "Event", "Date", "Location", "Status", "Joined");
    for event in &rows {
        println!(
            "{:>6}  {:<NAME_WIDTH$}  {:<13}  {:<16}  {:<10}  {:>6}",
            event.id,
            truncate_string(&event.name, NAME_WIDTH),
            event.formatted_date(),
            truncate_string(event.location.as_deref().unwrap_or("-"), 16),
            event.status().to_string(),
            event.participant_count,
        );
    }
    println!("{} of {} events", rows.len(), events.len());
    Ok(())
}

/// Load the candidate pool and the event detail together
async fn load_enrollment_context(
    api: &ApiClient,
    school_id: i64,
    event_id: i64,
) -> Result<(Vec<Student>, EventDetail)> {
    futures::try_join!(
        api.fetch_school_students(school_id),
        api.fetch_event_detail(event_id),
    )
    .context("Failed to load students and event")
}

fn print_event_header(event: &EventDetail) {
    let (from_team, individual) = event.origin_counts();
    println!(
        "{} ({} already enrolled: {} via team, {} individually)",
        event.name,
        from_team + individual,
        from_team,
        individual
    );
}

fn print_students<'a>(students: impl IntoIterator<Item = &'a Student>) {
    println!("{:>6}  {:<10}  {:<NAME_WIDTH$}  {}", "ID", "Code", "Name", "Grade / Class");
    for s in students {
        println!(
            "{:>6}  {:<10}  {:<NAME_WIDTH$}  {}",
            s.id,
            truncate_string(&s.code, 10),
            truncate_string(&s.name, NAME_WIDTH),
            s.grade_class(),
        );
    }
}

fn print_selection(reconciler: &ParticipantReconciler) {
    println!("{:>6}  {:<10}  {:<NAME_WIDTH$}  {}", "ID", "Code", "Name", "Source");
    for p in reconciler.selection() {
        let source = match p.team_id() {
            Some(team_id) => format!("team {}", team_id),
            None => "individual".to_string(),
        };
        println!(
            "{:>6}  {:<10}  {:<NAME_WIDTH$}  {}",
            p.id,
            truncate_string(&p.code, 10),
            truncate_string(&p.name, NAME_WIDTH),
            source,
        );
    }
}

pub async fn show_pool(
    api: &ApiClient,
    school_id: i64,
    event_id: i64,
    class_name: Option<&str>,
    search: &str,
) -> Result<()> {
    let (students, event) = load_enrollment_context(api, school_id, event_id).await?;
    let enrolled = event.participant_ids();

    let reconciler = ParticipantReconciler::new(event_id);
    let pool = reconciler.selectable_pool(&students, &enrolled, search, class_name);

    print!("Selectable students for ");
    print_event_header(&event);
    println!("Classes: {}", available_classes(&students).join(", "));
    print_students(pool.iter().copied());
    println!("{} of {} students", pool.len(), students.len());
    Ok(())
}

pub async fn enroll(
    api: &ApiClient,
    school_id: i64,
    event_id: i64,
    team_id: Option<i64>,
    student_ids: &[i64],
) -> Result<()> {
    let (students, event) = load_enrollment_context(api, school_id, event_id).await?;
    let enrolled = event.participant_ids();

    let mut reconciler = ParticipantReconciler::new(event_id);
    if team_id.is_some() {
        reconciler.select_team(api, team_id).await?;
    }

    for &id in student_ids {
        // Only students still in the selectable pool may be added
        let candidate = reconciler
            .selectable_pool(&students, &enrolled, "", None)
            .into_iter()
            .find(|s| s.id == id);
        match candidate {
            Some(student) => {
                reconciler.add_individual(student);
            }
            None if enrolled.contains(&id) => warn!(student_id = id, "Already enrolled, skipping"),
            None if reconciler.contains(id) => warn!(student_id = id, "Already selected via team, skipping"),
            None => warn!(student_id = id, "Not on the school roster, skipping"),
        }
    }

    print!("Enrolling in ");
    print_event_header(&event);
    print_selection(&reconciler);

    let outcome = reconciler.submit(api).await?;
    info!(event_id, requests = outcome.requests, "Enrollment submitted");
    println!(
        "Enrolled {} from team and {} individually",
        outcome.from_team, outcome.individual
    );
    Ok(())
}

/// Write the given settings into the config file, keeping the others
pub fn init_config(
    path: &Path,
    api_url: Option<String>,
    school_id: Option<i64>,
    token: Option<String>,
) -> Result<Config> {
    let mut config = Config::load_from(path)?;
    if api_url.is_some() {
        config.api_base_url = api_url;
    }
    if school_id.is_some() {
        config.school_id = school_id;
    }
    if token.is_some() {
        config.api_token = token;
    }
    config
        .save_to(path)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    info!(path = %path.display(), "Config saved");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_config_keeps_unset_fields() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");

        let first = init_config(&path, Some("https://school.test/api".to_string()), Some(4), None)
            .expect("first init");
        assert_eq!(first.school_id, Some(4));

        let second = init_config(&path, None, None, Some("tok".to_string())).expect("second init");
        assert_eq!(second.api_base_url(), "https://school.test/api");
        assert_eq!(second.school_id, Some(4));
        assert_eq!(second.api_token.as_deref(), Some("tok"));
        assert_eq!(Config::load_from(&path).expect("reload"), second);
    }
}
