//! Nested JSON export: session → subsession → group → player → decision.
//!
//! Each level is a fixed struct, so field sets and their order are decided
//! at compile time. Rows are bulk-loaded one table at a time and stitched
//! together in memory.

use std::collections::HashMap;
use std::hash::Hash;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;

use crate::domain::reason::Reason;
use crate::error::AppError;
use crate::repos::decisions::{self as decisions_repo, Decision};
use crate::repos::rounds::{self as rounds_repo, Group, Player, Subsession};
use crate::repos::sessions::{self as sessions_repo, Session};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionExport {
    pub code: String,
    pub label: String,
    pub experimenter_name: Option<String>,
    pub time_started: Option<String>,
    pub comment: Option<String>,
    pub is_demo: bool,
    pub subsessions: Vec<SubsessionExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubsessionExport {
    pub round_number: i32,
    pub groups: Vec<GroupExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupExport {
    pub id_in_subsession: i32,
    pub players: Vec<PlayerExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerExport {
    pub id_in_group: i32,
    pub payoff: Option<i32>,
    pub participant_id_in_session: i32,
    pub decisions: Vec<DecisionExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionExport {
    pub value: i32,
    pub player_decision: Option<bool>,
    pub reason: Option<Reason>,
}

/// Bucket rows by parent id, keeping each bucket in input order.
fn group_by<T, K, F>(rows: Vec<T>, key: F) -> HashMap<K, Vec<T>>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut map: HashMap<K, Vec<T>> = HashMap::new();
    for row in rows {
        map.entry(key(&row)).or_default().push(row);
    }
    map
}

fn format_time(t: Option<OffsetDateTime>) -> Option<String> {
    t.and_then(|t| t.format(&Rfc3339).ok())
}

/// Rows of every table touched by the export.
#[derive(Debug, Default)]
pub struct ExportRows {
    pub sessions: Vec<Session>,
    /// participant id → id_in_session
    pub participant_positions: HashMap<i64, i32>,
    pub subsessions: Vec<Subsession>,
    pub groups: Vec<Group>,
    pub players: Vec<Player>,
    pub decisions: Vec<Decision>,
}

/// Whole-table loads: the export covers every session, so no id lists are
/// bound and the query size does not grow with the data.
pub async fn load_rows<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<ExportRows, AppError> {
    let sessions = sessions_repo::list_sessions(conn).await?;

    let participant_positions = sessions_repo::list_participants(conn)
        .await?
        .into_iter()
        .map(|p| (p.id, p.id_in_session))
        .collect();

    let subsessions = rounds_repo::list_subsessions(conn).await?;
    let groups = rounds_repo::list_groups(conn).await?;
    let players = rounds_repo::list_players(conn).await?;
    let decisions = decisions_repo::list_all(conn).await?;

    Ok(ExportRows {
        sessions,
        participant_positions,
        subsessions,
        groups,
        players,
        decisions,
    })
}

/// Assemble the tree. Expects sessions ordered by (label, id), subsessions
/// by round, groups by id_in_subsession and decisions by id; players are
/// ordered here by their participant's position in the session.
pub fn assemble(rows: ExportRows) -> Vec<SessionExport> {
    let ExportRows {
        sessions,
        participant_positions,
        subsessions,
        groups,
        players,
        decisions,
    } = rows;

    let position = |p: &Player| participant_positions.get(&p.participant_id).copied();

    let mut decisions_by_player = group_by(decisions, |d| d.player_id);
    let mut players_by_group = group_by(players, |p| p.group_id);
    let mut groups_by_subsession = group_by(groups, |g| g.subsession_id);
    let mut subsessions_by_session = group_by(subsessions, |s| s.session_id);

    let mut export_player = |p: Player| PlayerExport {
        id_in_group: p.id_in_group,
        payoff: p.payoff,
        participant_id_in_session: position(&p).unwrap_or_default(),
        decisions: decisions_by_player
            .remove(&p.id)
            .unwrap_or_default()
            .into_iter()
            .map(|d| DecisionExport {
                value: d.value,
                player_decision: d.player_decision,
                reason: d.reason,
            })
            .collect(),
    };

    let mut export_group = |g: Group| {
        let mut members = players_by_group.remove(&g.id).unwrap_or_default();
        members.sort_by_key(|p| (position(p), p.id));
        GroupExport {
            id_in_subsession: g.id_in_subsession,
            players: members.into_iter().map(&mut export_player).collect(),
        }
    };

    let mut export_subsession = |s: Subsession| SubsessionExport {
        round_number: s.round_number,
        groups: groups_by_subsession
            .remove(&s.id)
            .unwrap_or_default()
            .into_iter()
            .map(&mut export_group)
            .collect(),
    };

    sessions
        .into_iter()
        .map(|s| SessionExport {
            subsessions: subsessions_by_session
                .remove(&s.id)
                .unwrap_or_default()
                .into_iter()
                .map(&mut export_subsession)
                .collect(),
            code: s.code,
            label: s.label,
            experimenter_name: s.experimenter_name,
            time_started: format_time(s.time_started),
            comment: s.comment,
            is_demo: s.is_demo,
        })
        .collect()
}

pub async fn build_export<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<SessionExport>, AppError> {
    let rows = load_rows(conn).await?;
    info!(
        sessions = rows.sessions.len(),
        players = rows.players.len(),
        decisions = rows.decisions.len(),
        "Export loaded"
    );
    Ok(assemble(rows))
}
