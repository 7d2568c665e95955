//! Team roster CRUD and list-view ordering end to end.

use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use salesboard::dashboard::{TeamsDashboard, TeamsError};
use salesboard::model::{FormError, TeamEntity, TeamForm};
use salesboard::query::{sort_and_filter, SortOrder, TeamSortKey};
use salesboard::seed;
use salesboard::store::{StoreError, TeamStore, INITIAL_PERFORMANCE};

fn form(name: &str, members: u32) -> TeamForm {
    TeamForm {
        name: name.to_string(),
        description: "Inbound partner deals".to_string(),
        leader: "Noah Fischer".to_string(),
        members,
    }
}

#[test]
fn create_update_delete_round() {
    let mut rng = StdRng::seed_from_u64(2024);
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
    let mut teams = TeamsDashboard::new(seed::teams());

    let created = teams.submit_create(form("Partnerships", 3), now, &mut rng).unwrap();
    assert_eq!(created.id, 6);
    assert_eq!(created.created_at, now);
    assert!(INITIAL_PERFORMANCE.contains(&created.performance));

    let mut edit = teams.edit_form(created.id).unwrap();
    edit.members = 9;
    let updated = teams.submit_update(created.id, edit).unwrap();
    assert_eq!(updated.members, 9);
    assert_eq!(updated.performance, created.performance);
    assert_eq!(updated.created_at, created.created_at);

    let removed = teams.confirm_delete(created.id).unwrap();
    assert_eq!(removed.id, 6);
    assert_eq!(teams.store().len(), 5);
    assert_eq!(teams.confirm_delete(6), Err(TeamsError::Store(StoreError::UnknownTeam { id: 6 })));

    let again = teams.submit_create(form("Partnerships", 3), now, &mut rng).unwrap();
    assert_eq!(again.id, 7);
}

#[test]
fn gap_in_ids_is_skipped() {
    let mut seeded = seed::teams();
    seeded.retain(|t| t.id == 1 || t.id == 3);
    let mut store = TeamStore::new(seeded);
    let team = store.create(form("Gamma", 2), Utc::now(), &mut StdRng::seed_from_u64(1));
    assert_eq!(team.id, 4);
}

#[test]
fn blank_fields_are_rejected_before_the_store() {
    let mut teams = TeamsDashboard::new(Vec::new());
    let mut rng = StdRng::seed_from_u64(5);
    let blank_leader = TeamForm { leader: "   ".to_string(), ..form("Ops", 2) };
    assert_eq!(
        teams.submit_create(blank_leader, Utc::now(), &mut rng),
        Err(TeamsError::Form(FormError::EmptyField("leader")))
    );
    assert_eq!(teams.submit_create(form("Ops", 0), Utc::now(), &mut rng), Err(TeamsError::Form(FormError::NoMembers)));
    assert!(teams.store().is_empty());
    assert_eq!(teams.submit_create(form("Ops", 2), Utc::now(), &mut rng).unwrap().id, 1);
}

fn with_tie() -> Vec<TeamEntity> {
    let mut roster = seed::teams();
    let mut twin = roster[4].clone();
    twin.id = 6;
    twin.name = "Solutions Engineering".to_string();
    roster.push(twin);
    roster
}

#[test]
fn numeric_sort_reverses_but_keeps_ties_in_place() {
    let roster = with_tie();
    let asc: Vec<u32> = sort_and_filter(&roster, "", TeamSortKey::Members, SortOrder::Asc).iter().map(|t| t.id).collect();
    let desc: Vec<u32> = sort_and_filter(&roster, "", TeamSortKey::Members, SortOrder::Desc).iter().map(|t| t.id).collect();
    // members: 1=8, 2=12, 3=6, 4=5, 5=7, 6=7
    assert_eq!(asc, vec![4, 3, 5, 6, 1, 2]);
    assert_eq!(desc, vec![2, 1, 5, 6, 3, 4]);
}

#[test]
fn sorting_is_deterministic() {
    let roster = with_tie();
    for key in [TeamSortKey::Name, TeamSortKey::Leader, TeamSortKey::Performance, TeamSortKey::CreatedAt] {
        for order in [SortOrder::Asc, SortOrder::Desc] {
            let first: Vec<u32> = sort_and_filter(&roster, "", key, order).iter().map(|t| t.id).collect();
            let second: Vec<u32> = sort_and_filter(&roster, "", key, order).iter().map(|t| t.id).collect();
            assert_eq!(first, second);
        }
    }
}

#[test]
fn search_and_sort_are_independent() {
    let mut teams = TeamsDashboard::new(seed::teams());
    teams.sort_by(TeamSortKey::CreatedAt);
    teams.search("SALES");
    let ids: Vec<u32> = teams.visible().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 5]);
    teams.sort_by(TeamSortKey::CreatedAt);
    assert_eq!(teams.query().search, "SALES");
    let ids: Vec<u32> = teams.visible().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![5, 1]);
    teams.search("");
    assert_eq!(teams.visible().len(), 5);
    assert_eq!(teams.query().order, SortOrder::Desc);
}

#[test]
fn accented_name_sorts_among_its_base_letter() {
    let mut teams = TeamsDashboard::new(seed::teams());
    teams.submit_create(form("Élan Ventures", 3), Utc::now(), &mut StdRng::seed_from_u64(8)).unwrap();
    let ids: Vec<u32> = teams.visible().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 3, 6, 4, 5, 1]);
}
